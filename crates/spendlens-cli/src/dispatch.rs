use spendlens_core::commands::preview::{self, PreviewOptions};
use spendlens_core::commands::report::{self, ReportOptions};
use spendlens_core::commands::rules::{self, RulesOptions};
use spendlens_core::{CoreResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> CoreResult<SuccessEnvelope> {
    match cli.command.clone() {
        Commands::Report {
            path,
            date_col,
            amount_col,
            desc_col,
            date_format,
            rules,
            json: _,
        } => report::run(ReportOptions {
            path,
            date_col,
            amount_col,
            desc_col,
            date_format,
            rules_path: rules,
            stdin_override: None,
        }),
        Commands::Preview {
            path,
            limit,
            date_col,
            amount_col,
            desc_col,
            date_format,
            rules,
            json: _,
        } => preview::run(PreviewOptions {
            path,
            limit,
            date_col,
            amount_col,
            desc_col,
            date_format,
            rules_path: rules,
            stdin_override: None,
        }),
        Commands::Rules { rules, json: _ } => rules::run(RulesOptions { rules_path: rules }),
    }
}
