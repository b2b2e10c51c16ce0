use clap::{Parser, Subcommand};
use spendlens_core::commands::preview::DEFAULT_PREVIEW_LIMIT;

/// Extended help shown after `spendlens report --help`.
pub const REPORT_AFTER_HELP: &str = "\
How analysis works:
  spendlens reads one delimited ledger export per run. Decoding tries
  utf-8, utf-8 with BOM, then euc-kr (covers cp949), so Korean bank and
  card exports work without re-encoding.

  Date, amount, and description columns are guessed from the header row
  (date/날짜/일자, amount/금액/지출, desc/내용/메모 and friends). When the
  guess is wrong, override it with --date-col / --amount-col / --desc-col.

  Rows whose date or amount cannot be converted are dropped, not fatal;
  the summary reports how many. A file where every row drops is an error,
  not an empty report.

Category rules:
  Each record gets exactly one category by first-match keyword rules.
  Supply your own with --rules <path> (CSV lines of keyword,category;
  line order is priority) or the SPENDLENS_RULES environment variable.
  Run `spendlens rules` to inspect the active set.
";

#[derive(Debug, Parser)]
#[command(
    name = "spendlens",
    version,
    about = "spending ledger analyzer",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Analyze a ledger CSV and print totals, series, and the pivot
    #[command(after_long_help = REPORT_AFTER_HELP)]
    Report {
        /// Path to the ledger CSV (use `-` for stdin)
        path: Option<String>,
        /// Override the date column name
        #[arg(long)]
        date_col: Option<String>,
        /// Override the amount column name
        #[arg(long)]
        amount_col: Option<String>,
        /// Override the description column name
        #[arg(long)]
        desc_col: Option<String>,
        /// Strict date format (e.g. %Y-%m-%d); omit for auto detection
        #[arg(long)]
        date_format: Option<String>,
        /// Category rules CSV (keyword,category per line, order = priority)
        #[arg(long)]
        rules: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show the decoded raw rows next to the transformed records
    Preview {
        /// Path to the ledger CSV (use `-` for stdin)
        path: Option<String>,
        /// Rows to show from each table
        #[arg(long, default_value_t = DEFAULT_PREVIEW_LIMIT)]
        limit: usize,
        /// Override the date column name
        #[arg(long)]
        date_col: Option<String>,
        /// Override the amount column name
        #[arg(long)]
        amount_col: Option<String>,
        /// Override the description column name
        #[arg(long)]
        desc_col: Option<String>,
        /// Strict date format (e.g. %Y-%m-%d); omit for auto detection
        #[arg(long)]
        date_format: Option<String>,
        /// Category rules CSV (keyword,category per line, order = priority)
        #[arg(long)]
        rules: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List the active category rules in priority order
    Rules {
        /// Category rules CSV to inspect instead of the built-in set
        #[arg(long)]
        rules: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::{Commands, parse_from};

    #[test]
    fn parse_command_paths() {
        let cases: [Vec<&str>; 10] = [
            vec!["spendlens", "report", "ledger.csv"],
            vec!["spendlens", "report", "-"],
            vec!["spendlens", "report", "ledger.csv", "--json"],
            vec![
                "spendlens",
                "report",
                "ledger.csv",
                "--date-col",
                "거래일자",
                "--amount-col",
                "금액",
            ],
            vec!["spendlens", "report", "ledger.csv", "--date-format", "%Y-%m-%d"],
            vec!["spendlens", "report", "ledger.csv", "--rules", "rules.csv"],
            vec!["spendlens", "preview", "ledger.csv"],
            vec!["spendlens", "preview", "ledger.csv", "--limit", "10", "--json"],
            vec!["spendlens", "rules"],
            vec!["spendlens", "rules", "--rules", "rules.csv", "--json"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse: {case:?}");
        }
    }

    #[test]
    fn report_flags_land_in_the_right_fields() {
        let parsed = parse_from([
            "spendlens",
            "report",
            "ledger.csv",
            "--desc-col",
            "내용",
            "--json",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Report {
                    json: true,
                    path: Some(_),
                    desc_col: Some(_),
                    ..
                }
            ));
        }
    }

    #[test]
    fn preview_defaults_to_five_rows() {
        let parsed = parse_from(["spendlens", "preview", "ledger.csv"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Preview { limit: 5, .. }
            ));
        }
    }

    #[test]
    fn help_command_is_rejected() {
        let parsed = parse_from(["spendlens", "help"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn subcommand_help_uses_clap_display_help() {
        let parsed = parse_from(["spendlens", "report", "--help"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }

    #[test]
    fn unknown_command_is_rejected() {
        let parsed = parse_from(["spendlens", "analyze"]);
        assert!(parsed.is_err());
    }
}
