use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_rules(data: &Value) -> io::Result<String> {
    let source = data
        .get("source")
        .and_then(Value::as_str)
        .unwrap_or("default");
    let fallback = data
        .get("fallback_category")
        .and_then(Value::as_str)
        .unwrap_or("Uncategorized");
    let rules = data
        .get("rules")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("rules output requires rules"))?;

    let source_label = if source == "default" {
        "built-in".to_string()
    } else {
        source.to_string()
    };

    let mut lines = Vec::new();
    lines.push(format!(
        "{} category rules ({source_label}). First match wins.",
        rules.len()
    ));
    lines.push(String::new());

    let columns = [
        Column {
            name: "Priority",
            align: Align::Right,
        },
        Column {
            name: "Keyword",
            align: Align::Left,
        },
        Column {
            name: "Category",
            align: Align::Left,
        },
    ];
    let rows = rules
        .iter()
        .map(|rule| {
            vec![
                rule.get("priority")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
                rule.get("keyword")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                rule.get("category")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table(&columns, &rows));

    lines.push(String::new());
    lines.push(format!("Records matching no rule get `{fallback}`."));

    Ok(lines.join("\n"))
}
