use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::contracts::types::{ResolvedColumns, RunSummary};
use crate::ingest::NormalizedRecord;
use crate::ingest::decode::Ledger;
use crate::{CoreError, CoreResult};

/// Formats tried, in order, when no explicit date format is given. ISO
/// first, then the slash/dot/compact layouts common in Korean exports,
/// then date-time variants whose time part is discarded.
const AUTO_DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%Y년 %m월 %d일",
];

const AUTO_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M"];

#[derive(Debug, Clone)]
pub(crate) struct NormalizedRows {
    pub records: Vec<NormalizedRecord>,
    pub summary: RunSummary,
}

/// Coerces the resolved date and amount columns row by row. A row failing
/// either coercion is dropped rather than raised; zero surviving rows is
/// reported through the summary and left for callers to judge, since the
/// raw ledger can still be worth showing.
pub(crate) fn normalize(
    ledger: &Ledger,
    columns: &ResolvedColumns,
    date_format: Option<&str>,
) -> CoreResult<NormalizedRows> {
    let date_index = column_index(ledger, &columns.date)?;
    let amount_index = column_index(ledger, &columns.amount)?;
    let desc_index = column_index(ledger, &columns.description)?;

    let rows_read = ledger.rows.len() as i64;
    let mut records = Vec::new();

    for row in &ledger.rows {
        let date_cell = ledger.cell(row, date_index);
        let amount_cell = ledger.cell(row, amount_index);

        let Some(date) = parse_date(date_cell, date_format) else {
            continue;
        };
        let Some(amount) = parse_amount(amount_cell) else {
            continue;
        };

        records.push(NormalizedRecord {
            date,
            month: month_of(date),
            amount,
            description: ledger.cell(row, desc_index).to_string(),
            category: None,
        });
    }

    let rows_valid = records.len() as i64;
    let rows_dropped = rows_read - rows_valid;

    Ok(NormalizedRows {
        records,
        summary: RunSummary {
            rows_read,
            rows_valid,
            rows_dropped,
        },
    })
}

fn column_index(ledger: &Ledger, name: &str) -> CoreResult<usize> {
    ledger.column_index(name).ok_or_else(|| {
        CoreError::internal_serialization(&format!(
            "resolved column `{name}` disappeared from the ledger"
        ))
    })
}

/// First calendar day of the date's month, the stable group key for all
/// monthly aggregation.
pub(crate) fn month_of(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn parse_date(value: &str, explicit_format: Option<&str>) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(format) = explicit_format {
        return NaiveDate::parse_from_str(trimmed, format).ok();
    }

    for format in AUTO_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in AUTO_DATETIME_FORMATS {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(stamp.date());
        }
    }

    None
}

/// Amount cells in card exports carry thousands separators and currency
/// adornments; strip those, then require a finite number.
fn parse_amount(value: &str) -> Option<f64> {
    let cleaned = value
        .trim()
        .chars()
        .filter(|character| !matches!(character, ',' | '₩' | '$' | ' '))
        .collect::<String>();
    let cleaned = cleaned.strip_suffix('원').unwrap_or(&cleaned);

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|amount| amount.is_finite())
}
