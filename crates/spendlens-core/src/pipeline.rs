use crate::classify;
use crate::{CoreError, CoreResult};
use crate::contracts::types::{ResolvedColumns, RunSummary};
use crate::ingest::NormalizedRecord;
use crate::ingest::decode::{self, Ledger};
use crate::ingest::normalize;
use crate::ingest::resolve;
use crate::report::{self, ReportBundle};

#[derive(Debug, Clone, Default)]
pub(crate) struct PipelineOptions {
    pub date_col: Option<String>,
    pub amount_col: Option<String>,
    pub desc_col: Option<String>,
    pub date_format: Option<String>,
    pub rules_path: Option<String>,
}

/// Everything one run hands to presentation: the raw ledger, the classified
/// records, and the aggregate report. Each stage fully owns its output;
/// nothing here borrows into a prior stage.
#[derive(Debug, Clone)]
pub(crate) struct PipelineOutput {
    pub ledger: Ledger,
    pub encoding: &'static str,
    pub columns: ResolvedColumns,
    pub summary: RunSummary,
    pub records: Vec<NormalizedRecord>,
    pub report: ReportBundle,
}

/// decode → resolve → normalize → classify → aggregate, in one pass over
/// one byte buffer. Per-row failures drop rows; stage failures abort the
/// run with a user-displayable error, and zero surviving rows is the
/// terminal empty-result condition.
pub(crate) fn run(bytes: &[u8], options: &PipelineOptions) -> CoreResult<PipelineOutput> {
    let output = run_lenient(bytes, options)?;
    if output.records.is_empty() {
        return Err(CoreError::empty_result(
            output.summary.rows_read,
            output.summary.rows_dropped,
        ));
    }
    Ok(output)
}

/// The same stages, but an all-dropped ledger is not an error: the decoded
/// raw rows and the zero-valid summary come back so callers can still show
/// the user what was read.
pub(crate) fn run_lenient(bytes: &[u8], options: &PipelineOptions) -> CoreResult<PipelineOutput> {
    let rule_set = classify::load_rules(options.rules_path.as_deref())?;

    let decoded = decode::decode_ledger(bytes)?;
    let columns = resolve::resolve_columns(
        &decoded.ledger.columns,
        options.date_col.as_deref(),
        options.amount_col.as_deref(),
        options.desc_col.as_deref(),
    )?;

    let normalized = normalize::normalize(
        &decoded.ledger,
        &columns,
        options.date_format.as_deref(),
    )?;

    let mut records = normalized.records;
    classify::classify_records(&mut records, &rule_set.rules);
    let report = report::aggregate(&records);

    Ok(PipelineOutput {
        ledger: decoded.ledger,
        encoding: decoded.encoding,
        columns,
        summary: normalized.summary,
        records,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::{PipelineOptions, run, run_lenient};

    const SAMPLE: &str = "날짜,내용,금액\n\
         2024-01-05,스타벅스,4500\n\
         2024-01-20,버스,1500\n\
         2024-02-03,스타벅스,5000\n";

    #[test]
    fn full_run_produces_classified_records_and_report() {
        let output = run(SAMPLE.as_bytes(), &PipelineOptions::default());
        assert!(output.is_ok());
        if let Ok(value) = output {
            assert_eq!(value.encoding, "utf-8");
            assert_eq!(value.columns.date, "날짜");
            assert_eq!(value.records.len(), 3);
            assert_eq!(value.records[0].category.as_deref(), Some("Cafe"));
            assert_eq!(value.records[1].category.as_deref(), Some("Transport"));
            assert_eq!(value.report.total_amount, 11000.0);
            assert_eq!(value.report.monthly_totals.len(), 2);
        }
    }

    #[test]
    fn strict_run_treats_an_all_dropped_ledger_as_empty_result() {
        let bytes = b"date,desc,amount\nnope,a,xyz\nalso-bad,b,\n";
        let output = run(bytes, &PipelineOptions::default());
        assert!(output.is_err());
        if let Err(error) = output {
            assert_eq!(error.code, "empty_result");
        }
    }

    #[test]
    fn lenient_run_keeps_the_raw_ledger_when_no_rows_survive() {
        let bytes = b"date,desc,amount\nnope,a,xyz\nalso-bad,b,\n";
        let output = run_lenient(bytes, &PipelineOptions::default());
        assert!(output.is_ok());
        if let Ok(value) = output {
            assert_eq!(value.ledger.rows.len(), 2);
            assert!(value.records.is_empty());
            assert_eq!(value.summary.rows_valid, 0);
            assert_eq!(value.summary.rows_dropped, 2);
            assert_eq!(value.report.total_amount, 0.0);
        }
    }

    #[test]
    fn reruns_on_identical_bytes_are_identical() {
        let first = run(SAMPLE.as_bytes(), &PipelineOptions::default());
        let second = run(SAMPLE.as_bytes(), &PipelineOptions::default());
        assert!(first.is_ok());
        assert!(second.is_ok());
        if let (Ok(a), Ok(b)) = (first, second) {
            assert_eq!(a.report.total_amount, b.report.total_amount);
            assert_eq!(a.report.monthly_totals, b.report.monthly_totals);
            assert_eq!(a.report.category_totals, b.report.category_totals);
        }
    }
}
