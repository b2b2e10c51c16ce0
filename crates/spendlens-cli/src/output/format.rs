use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders a header row plus data rows, padding cells to the widest value
/// per column. Widths count chars so Korean cells stay aligned with the
/// same rules the formatter pads by.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let mut widths = columns
        .iter()
        .map(|column| column.name.chars().count())
        .collect::<Vec<usize>>();
    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.chars().count());
            }
        }
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();

    let mut output = Vec::with_capacity(rows.len() + 1);
    output.push(format_row(columns, &header, &widths));
    for row in rows {
        output.push(format_row(columns, row, &widths));
    }
    output
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let mut pieces = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        let width = *widths.get(index).unwrap_or(&0);
        let value = cells.get(index).cloned().unwrap_or_default();

        let piece = match column.align {
            Align::Left => format!("{value:<width$}"),
            Align::Right => format!("{value:>width$}"),
        };
        pieces.push(piece);
    }

    format!("{}{}", " ".repeat(INDENT), pieces.join("  "))
        .trim_end()
        .to_string()
}

/// Thousands-grouped amount, cents only when they are non-zero. Matches
/// how ledger totals read in bank statements: `1,234,500` or `12.50`.
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let mut body = group_thousands(whole);
    if fraction != 0 {
        body.push_str(&format!(".{fraction:02}"));
    }
    if negative {
        format!("-{body}")
    } else {
        body
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let length = digits.len();
    let mut grouped = String::with_capacity(length + length / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (length - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::{Align, Column, format_amount, key_value_rows, render_table};

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Rows read:", "100".to_string()),
                ("Rows dropped:", "2".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Rows read:     100");
        assert_eq!(rows[1], "  Rows dropped:  2");
    }

    #[test]
    fn table_pads_to_the_widest_cell_per_column() {
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
        let rows = vec![
            vec!["Subscriptions".to_string(), "15,900".to_string()],
            vec!["Cafe".to_string(), "4,500".to_string()],
        ];

        let rendered = render_table(&columns, &rows);
        assert_eq!(rendered[0], "  Category       Amount");
        assert_eq!(rendered[1], "  Subscriptions  15,900");
        assert_eq!(rendered[2], "  Cafe            4,500");
    }

    #[test]
    fn table_widths_count_chars_not_bytes() {
        let columns = [
            Column {
                name: "Keyword",
                align: Align::Left,
            },
            Column {
                name: "Category",
                align: Align::Left,
            },
        ];
        let rows = vec![vec!["스타벅스".to_string(), "Cafe".to_string()]];

        let rendered = render_table(&columns, &rows);
        // "스타벅스" is 4 chars; "Keyword" (7 chars) sets the column width.
        assert_eq!(rendered[1], "  스타벅스     Cafe");
    }

    #[test]
    fn amounts_group_thousands_and_keep_nonzero_cents() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(180.0), "180");
        assert_eq!(format_amount(4500.0), "4,500");
        assert_eq!(format_amount(1_234_500.0), "1,234,500");
        assert_eq!(format_amount(12.5), "12.50");
        assert_eq!(format_amount(-4500.0), "-4,500");
    }
}
