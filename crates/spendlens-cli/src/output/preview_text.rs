use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_preview(data: &Value) -> io::Result<String> {
    let source_ref = data
        .get("source_ref")
        .and_then(Value::as_str)
        .unwrap_or("stdin");
    let encoding = data
        .get("encoding")
        .and_then(Value::as_str)
        .unwrap_or("unknown");

    let mut lines = Vec::new();
    lines.push(format!("Preview of {source_ref} ({encoding})"));
    lines.push(String::new());
    lines.extend(render_raw_section(data)?);
    lines.push(String::new());
    lines.extend(render_records_section(data)?);
    lines.push(String::new());
    lines.push("If columns or values look wrong, override with --date-col / --amount-col / --desc-col.".to_string());

    Ok(lines.join("\n"))
}

fn render_raw_section(data: &Value) -> io::Result<Vec<String>> {
    let raw = data
        .get("raw")
        .ok_or_else(|| io::Error::other("preview output requires raw"))?;
    let header = raw
        .get("columns")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("preview output requires raw columns"))?;
    let total = raw.get("total_rows").and_then(Value::as_i64).unwrap_or(0);

    let columns = header
        .iter()
        .map(|name| Column {
            name: name.as_str().unwrap_or(""),
            align: Align::Left,
        })
        .collect::<Vec<Column<'_>>>();

    let rows = raw
        .get("rows")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .map(|row| {
                    row.as_array()
                        .map(|cells| {
                            cells
                                .iter()
                                .map(|cell| cell.as_str().unwrap_or("").to_string())
                                .collect::<Vec<String>>()
                        })
                        .unwrap_or_default()
                })
                .collect::<Vec<Vec<String>>>()
        })
        .unwrap_or_default();

    let mut lines = vec![section_label("Raw rows", rows.len(), total)];
    lines.extend(format::render_table(&columns, &rows));
    Ok(lines)
}

fn render_records_section(data: &Value) -> io::Result<Vec<String>> {
    let records = data
        .get("records")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("preview output requires records"))?;
    let total = data
        .get("total_records")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    let columns = [
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Month",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
        Column {
            name: "Description",
            align: Align::Left,
        },
        Column {
            name: "Category",
            align: Align::Left,
        },
    ];

    let rows = records
        .iter()
        .map(|record| {
            let record_str = |key: &str| {
                record
                    .get(key)
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string()
            };
            vec![
                record_str("date"),
                record_str("month"),
                format::format_amount(record.get("amount").and_then(Value::as_f64).unwrap_or(0.0)),
                record_str("description"),
                record_str("category"),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![section_label("Transformed records", rows.len(), total)];
    lines.extend(format::render_table(&columns, &rows));
    Ok(lines)
}

fn section_label(name: &str, shown: usize, total: i64) -> String {
    if (shown as i64) < total {
        format!("{name} (showing {shown} of {total}):")
    } else {
        format!("{name} ({total}):")
    }
}
