use serde_json::json;

use crate::commands::format_month;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CategoryTotal, MonthlyTotal, PivotRow, PivotTable, ReportData};
use crate::ingest::input;
use crate::pipeline::{self, PipelineOptions};
use crate::report::ReportBundle;
use crate::CoreResult;

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub path: Option<String>,
    pub date_col: Option<String>,
    pub amount_col: Option<String>,
    pub desc_col: Option<String>,
    pub date_format: Option<String>,
    pub rules_path: Option<String>,
    /// Test seam; real stdin is read when this is None and input is piped.
    pub stdin_override: Option<Vec<u8>>,
}

pub fn run(options: ReportOptions) -> CoreResult<SuccessEnvelope> {
    let source = input::resolve_source(options.path.clone(), options.stdin_override.clone())?;
    let output = pipeline::run(
        &source.content,
        &PipelineOptions {
            date_col: options.date_col,
            amount_col: options.amount_col,
            desc_col: options.desc_col,
            date_format: options.date_format,
            rules_path: options.rules_path,
        },
    )?;

    success(
        "report",
        json!({
            "source_kind": source.source_kind.as_str(),
            "source_ref": source.source_ref,
            "encoding": output.encoding,
            "columns": output.columns,
            "summary": output.summary,
            "report": report_data(&output.report),
        }),
    )
}

pub(crate) fn report_data(bundle: &ReportBundle) -> ReportData {
    let monthly_totals = bundle
        .monthly_totals
        .iter()
        .map(|(month, amount)| MonthlyTotal {
            month: format_month(*month),
            amount: *amount,
        })
        .collect::<Vec<MonthlyTotal>>();

    let category_totals = bundle
        .category_totals
        .iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.clone(),
            amount: *amount,
        })
        .collect::<Vec<CategoryTotal>>();

    // Pivot columns follow category rank; rows follow the monthly series.
    // Absent (month, category) pairs materialize as 0 only here, at the
    // presentation boundary.
    let categories = category_totals
        .iter()
        .map(|entry| entry.category.clone())
        .collect::<Vec<String>>();
    let rows = bundle
        .monthly_totals
        .iter()
        .map(|(month, _)| PivotRow {
            month: format_month(*month),
            amounts: categories
                .iter()
                .map(|category| bundle.pivot.amount(*month, category))
                .collect(),
        })
        .collect::<Vec<PivotRow>>();

    ReportData {
        total_amount: bundle.total_amount,
        average_monthly: bundle.average_monthly(),
        top_category: bundle.top_category().map(|(category, amount)| CategoryTotal {
            category: category.clone(),
            amount: *amount,
        }),
        monthly_totals,
        category_totals,
        pivot: PivotTable { categories, rows },
    }
}
