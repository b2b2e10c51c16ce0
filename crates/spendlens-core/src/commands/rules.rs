use serde_json::json;

use crate::CoreResult;
use crate::classify;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::RuleInfo;

#[derive(Debug, Clone, Default)]
pub struct RulesOptions {
    pub rules_path: Option<String>,
}

/// Lists the active rule set in priority order. Because the first matching
/// rule wins, the listed order is the classification contract.
pub fn run(options: RulesOptions) -> CoreResult<SuccessEnvelope> {
    let rule_set = classify::load_rules(options.rules_path.as_deref())?;

    let rules = rule_set
        .rules
        .iter()
        .enumerate()
        .map(|(index, rule)| RuleInfo {
            priority: (index as i64) + 1,
            keyword: rule.keyword.clone(),
            category: rule.category.clone(),
        })
        .collect::<Vec<RuleInfo>>();

    success(
        "rules",
        json!({
            "source": rule_set.source,
            "fallback_category": classify::UNCATEGORIZED,
            "rules": rules,
        }),
    )
}
