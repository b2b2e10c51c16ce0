pub mod preview;
pub mod report;
pub mod rules;

use chrono::NaiveDate;

use crate::ingest::NormalizedRecord;
use crate::contracts::types::RecordRow;

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn format_month(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

pub(crate) fn record_row(record: &NormalizedRecord) -> RecordRow {
    RecordRow {
        date: format_date(record.date),
        month: format_month(record.month),
        amount: record.amount,
        description: record.description.clone(),
        category: record
            .category
            .clone()
            .unwrap_or_else(|| crate::classify::UNCATEGORIZED.to_string()),
    }
}
