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

const INDENT: &str = "  ";
const COLUMN_GAP: &str = "  ";

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = column_widths(columns, rows);

    let mut output = Vec::with_capacity(rows.len() + 1);
    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    output.push(format_row(columns, &header, &widths));

    for row in rows {
        output.push(format_row(columns, row, &widths));
    }

    output
}

pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

pub fn format_signed_amount(value: f64) -> String {
    format!("{value:+.2}")
}

fn column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|column| column.name.len())
        .collect::<Vec<usize>>();

    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.chars().count());
            }
        }
    }

    widths
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let mut parts = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        let width = widths.get(index).copied().unwrap_or(0);
        let value = cells.get(index).map(String::as_str).unwrap_or("");
        let cell = match column.align {
            Align::Left => format!("{value:<width$}"),
            Align::Right => format!("{value:>width$}"),
        };
        parts.push(cell);
    }

    let mut line = String::from(INDENT);
    line.push_str(parts.join(COLUMN_GAP).trim_end());
    line
}

#[cfg(test)]
mod tests {
    use super::{Align, Column, format_amount, format_signed_amount, key_value_rows, render_table};

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Imported:", "2".to_string()),
                ("Total processed:", "2".to_string()),
            ],
            2,
        );
        assert_eq!(rows[0], "  Imported:         2");
        assert_eq!(rows[1], "  Total processed:  2");
    }

    #[test]
    fn tables_size_columns_to_the_widest_cell() {
        let columns = [
            Column {
                name: "Period",
                align: Align::Left,
            },
            Column {
                name: "Savings",
                align: Align::Right,
            },
        ];
        let rows = vec![vec!["2024-Q1".to_string(), "5000.00".to_string()]];

        let lines = render_table(&columns, &rows);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "  Period   Savings");
        assert_eq!(lines[1], "  2024-Q1  5000.00");
    }

    #[test]
    fn amounts_render_with_two_decimals() {
        assert_eq!(format_amount(1250.5), "1250.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_signed_amount(500.0), "+500.00");
        assert_eq!(format_signed_amount(-50.0), "-50.00");
    }
}
