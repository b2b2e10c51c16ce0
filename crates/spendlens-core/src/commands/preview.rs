use serde_json::json;

use crate::commands::record_row;
use crate::{CoreError, CoreResult};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{LedgerPreview, RecordRow};
use crate::ingest::input;
use crate::pipeline::{self, PipelineOptions};

pub const DEFAULT_PREVIEW_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct PreviewOptions {
    pub path: Option<String>,
    pub limit: usize,
    pub date_col: Option<String>,
    pub amount_col: Option<String>,
    pub desc_col: Option<String>,
    pub date_format: Option<String>,
    pub rules_path: Option<String>,
    pub stdin_override: Option<Vec<u8>>,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            path: None,
            limit: DEFAULT_PREVIEW_LIMIT,
            date_col: None,
            amount_col: None,
            desc_col: None,
            date_format: None,
            rules_path: None,
            stdin_override: None,
        }
    }
}

/// Raw-ledger head plus transformed-record head, so the user can check
/// column choices and coercion before trusting the report. Uses the lenient
/// pipeline: a ledger whose every row drops still shows its raw head, which
/// is exactly the situation preview exists to diagnose.
pub fn run(options: PreviewOptions) -> CoreResult<SuccessEnvelope> {
    if options.limit == 0 {
        return Err(CoreError::invalid_argument_with_recovery(
            "--limit must be at least 1.",
            vec![format!(
                "Rerun with a positive --limit (default {DEFAULT_PREVIEW_LIMIT})."
            )],
        ));
    }

    let source = input::resolve_source(options.path.clone(), options.stdin_override.clone())?;
    let output = pipeline::run_lenient(
        &source.content,
        &PipelineOptions {
            date_col: options.date_col,
            amount_col: options.amount_col,
            desc_col: options.desc_col,
            date_format: options.date_format,
            rules_path: options.rules_path,
        },
    )?;

    let limit = options.limit;
    let raw = LedgerPreview {
        columns: output.ledger.columns.clone(),
        rows: output
            .ledger
            .rows
            .iter()
            .take(limit)
            .map(|row| row.cells.clone())
            .collect(),
        total_rows: output.ledger.rows.len() as i64,
        truncated: output.ledger.rows.len() > limit,
    };

    let records = output
        .records
        .iter()
        .take(limit)
        .map(record_row)
        .collect::<Vec<RecordRow>>();

    success(
        "preview",
        json!({
            "source_kind": source.source_kind.as_str(),
            "source_ref": source.source_ref,
            "encoding": output.encoding,
            "columns": output.columns,
            "summary": output.summary,
            "raw": raw,
            "records": records,
            "total_records": output.records.len() as i64,
            "records_truncated": output.records.len() > limit,
        }),
    )
}
