use std::fs;

use crate::ingest::NormalizedRecord;
use crate::{CoreError, CoreResult};

pub(crate) const UNCATEGORIZED: &str = "Uncategorized";

pub(crate) const RULES_ENV_VAR: &str = "SPENDLENS_RULES";

/// One keyword-to-category mapping. Rule order is part of the contract:
/// the first rule whose keyword appears in the description wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryRule {
    pub keyword: String,
    pub category: String,
}

impl CategoryRule {
    fn new(keyword: &str, category: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            category: category.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RuleSet {
    pub source: String,
    pub rules: Vec<CategoryRule>,
}

/// Built-in rules covering common Korean/English merchant vocabulary in
/// bank and card exports. Order is priority; keep overlapping keywords
/// (e.g. 이마트 vs 마트) within the same category or ordered deliberately.
pub(crate) fn default_rules() -> Vec<CategoryRule> {
    [
        ("스타벅스", "Cafe"),
        ("starbucks", "Cafe"),
        ("커피", "Cafe"),
        ("coffee", "Cafe"),
        ("카페", "Cafe"),
        ("배달의민족", "Food"),
        ("요기요", "Food"),
        ("식당", "Food"),
        ("김밥", "Food"),
        ("맥도날드", "Food"),
        ("버거", "Food"),
        ("치킨", "Food"),
        ("restaurant", "Food"),
        ("이마트", "Groceries"),
        ("홈플러스", "Groceries"),
        ("마트", "Groceries"),
        ("mart", "Groceries"),
        ("편의점", "Groceries"),
        ("지하철", "Transport"),
        ("버스", "Transport"),
        ("택시", "Transport"),
        ("taxi", "Transport"),
        ("uber", "Transport"),
        ("주유", "Transport"),
        ("쿠팡", "Shopping"),
        ("coupang", "Shopping"),
        ("11번가", "Shopping"),
        ("지마켓", "Shopping"),
        ("amazon", "Shopping"),
        ("넷플릭스", "Subscriptions"),
        ("netflix", "Subscriptions"),
        ("유튜브", "Subscriptions"),
        ("youtube", "Subscriptions"),
        ("spotify", "Subscriptions"),
        ("멜론", "Subscriptions"),
        ("약국", "Health"),
        ("병원", "Health"),
        ("pharmacy", "Health"),
        ("월세", "Housing"),
        ("관리비", "Housing"),
        ("rent", "Housing"),
    ]
    .iter()
    .map(|(keyword, category)| CategoryRule::new(keyword, category))
    .collect()
}

/// Assigns exactly one category by case-insensitive substring containment.
/// First matching rule in configured order wins; no match (including an
/// empty description) is the fallback category, which aggregates normally.
pub(crate) fn classify(description: &str, rules: &[CategoryRule]) -> String {
    let lowered = description.to_lowercase();
    for rule in rules {
        if lowered.contains(&rule.keyword.to_lowercase()) {
            return rule.category.clone();
        }
    }
    UNCATEGORIZED.to_string()
}

pub(crate) fn classify_records(records: &mut [NormalizedRecord], rules: &[CategoryRule]) {
    for record in records {
        record.category = Some(classify(&record.description, rules));
    }
}

/// Rule loading precedence: explicit path, then the SPENDLENS_RULES env
/// var, then the built-in set. File rules fully replace the defaults so the
/// configured priority order stays the only order.
pub(crate) fn load_rules(rules_path: Option<&str>) -> CoreResult<RuleSet> {
    let env_path = std::env::var(RULES_ENV_VAR).ok();
    let path = rules_path.or(env_path.as_deref());

    let Some(path_value) = path else {
        return Ok(RuleSet {
            source: "default".to_string(),
            rules: default_rules(),
        });
    };

    let content = fs::read_to_string(path_value)
        .map_err(|error| CoreError::invalid_rules(path_value, &error.to_string()))?;
    let rules = parse_rules_csv(path_value, &content)?;
    Ok(RuleSet {
        source: path_value.to_string(),
        rules,
    })
}

fn parse_rules_csv(source: &str, content: &str) -> CoreResult<Vec<CategoryRule>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rules = Vec::new();
    for (index, result_row) in reader.records().enumerate() {
        let record = result_row
            .map_err(|error| CoreError::invalid_rules(source, &error.to_string()))?;

        let keyword = record.get(0).unwrap_or("").to_string();
        let category = record.get(1).unwrap_or("").to_string();
        if keyword.is_empty() && category.is_empty() {
            continue;
        }
        if keyword.is_empty() || category.is_empty() {
            return Err(CoreError::invalid_rules(
                source,
                &format!("line {} must have both a keyword and a category", index + 1),
            ));
        }
        rules.push(CategoryRule { keyword, category });
    }

    if rules.is_empty() {
        return Err(CoreError::invalid_rules(source, "the file contains no rules"));
    }

    Ok(rules)
}
