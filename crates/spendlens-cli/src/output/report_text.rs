use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_report(data: &Value) -> io::Result<String> {
    let source_ref = data
        .get("source_ref")
        .and_then(Value::as_str)
        .unwrap_or("stdin");
    let encoding = data
        .get("encoding")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let report = data
        .get("report")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("report output requires report"))?;

    let mut lines = Vec::new();
    lines.push(format!("Spending report for {source_ref} ({encoding})"));
    lines.push(String::new());

    lines.push("Columns:".to_string());
    lines.extend(render_columns(data));
    lines.push(String::new());

    lines.push("Rows:".to_string());
    lines.extend(render_summary(data));
    lines.push(String::new());

    lines.push("Totals:".to_string());
    let total = report.get("total_amount").and_then(Value::as_f64).unwrap_or(0.0);
    let average = report
        .get("average_monthly")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    let top = match report.get("top_category").filter(|value| !value.is_null()) {
        Some(entry) => format!(
            "{} ({})",
            entry.get("category").and_then(Value::as_str).unwrap_or("unknown"),
            format::format_amount(entry.get("amount").and_then(Value::as_f64).unwrap_or(0.0)),
        ),
        None => "-".to_string(),
    };
    lines.extend(format::key_value_rows(
        &[
            ("Total spent:", format::format_amount(total)),
            ("Average monthly:", format::format_amount(average)),
            ("Top category:", top),
        ],
        2,
    ));
    lines.push(String::new());

    lines.push("Monthly totals:".to_string());
    lines.extend(render_monthly_totals(report.get("monthly_totals")));
    lines.push(String::new());

    lines.push("Category totals:".to_string());
    lines.extend(render_category_totals(report.get("category_totals")));

    let pivot_lines = render_pivot(report.get("pivot"))?;
    if !pivot_lines.is_empty() {
        lines.push(String::new());
        lines.push("Monthly breakdown by category:".to_string());
        lines.extend(pivot_lines);
    }

    Ok(lines.join("\n"))
}

fn render_columns(data: &Value) -> Vec<String> {
    let column_str = |key: &str| {
        data.get("columns")
            .and_then(|columns| columns.get(key))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string()
    };

    format::key_value_rows(
        &[
            ("Date:", column_str("date")),
            ("Amount:", column_str("amount")),
            ("Description:", column_str("description")),
        ],
        2,
    )
}

fn render_summary(data: &Value) -> Vec<String> {
    let summary_i64 = |key: &str| {
        data.get("summary")
            .and_then(|summary| summary.get(key))
            .and_then(Value::as_i64)
            .unwrap_or(0)
            .to_string()
    };

    format::key_value_rows(
        &[
            ("Read:", summary_i64("rows_read")),
            ("Valid:", summary_i64("rows_valid")),
            ("Dropped:", summary_i64("rows_dropped")),
        ],
        2,
    )
}

fn render_monthly_totals(entries: Option<&Value>) -> Vec<String> {
    let columns = [
        Column {
            name: "Month",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
    ];

    let rows = entries
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .map(|entry| {
                    vec![
                        entry.get("month").and_then(Value::as_str).unwrap_or("").to_string(),
                        format::format_amount(
                            entry.get("amount").and_then(Value::as_f64).unwrap_or(0.0),
                        ),
                    ]
                })
                .collect::<Vec<Vec<String>>>()
        })
        .unwrap_or_default();

    format::render_table(&columns, &rows)
}

fn render_category_totals(entries: Option<&Value>) -> Vec<String> {
    let columns = [
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
    ];

    let rows = entries
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .map(|entry| {
                    vec![
                        entry
                            .get("category")
                            .and_then(Value::as_str)
                            .unwrap_or("")
                            .to_string(),
                        format::format_amount(
                            entry.get("amount").and_then(Value::as_f64).unwrap_or(0.0),
                        ),
                    ]
                })
                .collect::<Vec<Vec<String>>>()
        })
        .unwrap_or_default();

    format::render_table(&columns, &rows)
}

fn render_pivot(pivot: Option<&Value>) -> io::Result<Vec<String>> {
    let Some(pivot) = pivot else {
        return Ok(Vec::new());
    };
    let categories = pivot
        .get("categories")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("pivot output requires categories"))?;
    if categories.is_empty() {
        return Ok(Vec::new());
    }

    let mut columns = vec![Column {
        name: "Month",
        align: Align::Left,
    }];
    let names = categories
        .iter()
        .map(|value| value.as_str().unwrap_or("").to_string())
        .collect::<Vec<String>>();
    columns.extend(names.iter().map(|name| Column {
        name: name.as_str(),
        align: Align::Right,
    }));

    let rows = pivot
        .get("rows")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .map(|row| {
                    let mut cells = vec![
                        row.get("month").and_then(Value::as_str).unwrap_or("").to_string(),
                    ];
                    if let Some(amounts) = row.get("amounts").and_then(Value::as_array) {
                        cells.extend(
                            amounts
                                .iter()
                                .map(|amount| {
                                    format::format_amount(amount.as_f64().unwrap_or(0.0))
                                }),
                        );
                    }
                    cells
                })
                .collect::<Vec<Vec<String>>>()
        })
        .unwrap_or_default();

    Ok(format::render_table(&columns, &rows))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_report;

    #[test]
    fn renders_all_report_sections() {
        let data = json!({
            "source_kind": "file",
            "source_ref": "ledger.csv",
            "encoding": "euc-kr",
            "columns": { "date": "날짜", "amount": "금액", "description": "내용" },
            "summary": { "rows_read": 3, "rows_valid": 3, "rows_dropped": 0 },
            "report": {
                "total_amount": 180.0,
                "average_monthly": 90.0,
                "top_category": { "category": "A", "amount": 130.0 },
                "monthly_totals": [
                    { "month": "2024-01", "amount": 150.0 },
                    { "month": "2024-02", "amount": 30.0 }
                ],
                "category_totals": [
                    { "category": "A", "amount": 130.0 },
                    { "category": "B", "amount": 50.0 }
                ],
                "pivot": {
                    "categories": ["A", "B"],
                    "rows": [
                        { "month": "2024-01", "amounts": [100.0, 50.0] },
                        { "month": "2024-02", "amounts": [30.0, 0.0] }
                    ]
                }
            }
        });

        let rendered = render_report(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Spending report for ledger.csv (euc-kr)"));
            assert!(text.contains("Date:         날짜"));
            assert!(text.contains("Total spent:      180"));
            assert!(text.contains("Average monthly:  90"));
            assert!(text.contains("Top category:     A (130)"));
            assert!(text.contains("Monthly totals:"));
            assert!(text.contains("2024-01"));
            assert!(text.contains("Monthly breakdown by category:"));
        }
    }

    #[test]
    fn missing_report_object_is_an_output_error() {
        let rendered = render_report(&json!({ "source_ref": "x.csv" }));
        assert!(rendered.is_err());
    }

    #[test]
    fn null_top_category_renders_a_placeholder() {
        let data = json!({
            "source_ref": "ledger.csv",
            "encoding": "utf-8",
            "columns": { "date": "date", "amount": "amount", "description": "desc" },
            "summary": { "rows_read": 0, "rows_valid": 0, "rows_dropped": 0 },
            "report": {
                "total_amount": 0.0,
                "average_monthly": 0.0,
                "top_category": null,
                "monthly_totals": [],
                "category_totals": [],
                "pivot": { "categories": [], "rows": [] }
            }
        });

        let rendered = render_report(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Top category:     -"));
            assert!(!text.contains("Monthly breakdown by category:"));
        }
    }
}
