use serde::Serialize;

/// Row accounting for one pipeline run. Dropped rows are the intentional
/// per-row failure policy, not errors.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunSummary {
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_dropped: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedColumns {
    pub date: String,
    pub amount: String,
    pub description: String,
}

/// Head of the decoded, still-raw ledger for the raw-data preview.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerPreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: i64,
    pub truncated: bool,
}

/// One normalized, classified transaction as shown to presentation.
#[derive(Debug, Clone, Serialize)]
pub struct RecordRow {
    pub date: String,
    pub month: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTotal {
    pub month: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Month × category matrix. `categories` orders the columns (by spend rank);
/// each row carries one amount per category, 0.0 where no records exist.
#[derive(Debug, Clone, Serialize)]
pub struct PivotTable {
    pub categories: Vec<String>,
    pub rows: Vec<PivotRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PivotRow {
    pub month: String,
    pub amounts: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub total_amount: f64,
    pub average_monthly: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_category: Option<CategoryTotal>,
    pub monthly_totals: Vec<MonthlyTotal>,
    pub category_totals: Vec<CategoryTotal>,
    pub pivot: PivotTable,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleInfo {
    pub priority: i64,
    pub keyword: String,
    pub category: String,
}
