use std::io;

use chrono::{Local, TimeZone};
use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_import_run(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("import output requires summary"))?;
    let dry_run = data
        .get("dry_run")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let mut lines = vec![
        data.get("message")
            .and_then(Value::as_str)
            .unwrap_or("Import finished.")
            .to_string(),
        String::new(),
        "Summary:".to_string(),
    ];

    let mut entries = Vec::new();
    if let Some(import_id) = data.get("import_id").and_then(Value::as_str) {
        entries.push(("Import ID:", import_id.to_string()));
    }
    entries.push(("Imported:", get_i64(summary, "imported").to_string()));
    entries.push(("Failed:", get_i64(summary, "failed").to_string()));
    entries.push((
        "Total processed:",
        get_i64(summary, "total_processed").to_string(),
    ));
    lines.extend(format::key_value_rows(&entries, 2));

    let row_errors = data
        .get("errors")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !row_errors.is_empty() {
        lines.push(String::new());
        lines.push("Row errors:".to_string());
        for row_error in &row_errors {
            let row_number = row_error.get("row").and_then(Value::as_i64).unwrap_or(0);
            lines.push(format!("  Row {row_number}:"));
            let messages = row_error
                .get("errors")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            for message in messages {
                lines.push(format!("    - {}", message.as_str().unwrap_or("unknown")));
            }
        }
    }

    lines.push(String::new());
    if dry_run {
        lines.push("No rows were written because this was a dry run.".to_string());
        lines.push(String::new());
        lines.push("Next: commit this import".to_string());
        lines.push("  copera import create <path>".to_string());
    } else {
        lines.push("Next: inspect the ledger".to_string());
        lines.push("  copera client list".to_string());
        lines.push("  copera compare <client-id> <baseline-period> <current-period>".to_string());
    }

    Ok(lines.join("\n"))
}

pub fn render_import_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("import list output requires rows"))?;

    if rows.is_empty() {
        return Ok([
            "No imports found yet.",
            "",
            "Run your first import:",
            "  1. copera import create --help",
            "  2. copera import create --dry-run <path>",
            "  3. copera import create <path>",
        ]
        .join("\n"));
    }

    let count_label = if rows.len() == 1 {
        "1 import found.".to_string()
    } else {
        format!("{} imports found.", rows.len())
    };

    let columns = [
        Column {
            name: "Import ID",
            align: Align::Left,
        },
        Column {
            name: "Created (local)",
            align: Align::Left,
        },
        Column {
            name: "Imported",
            align: Align::Right,
        },
        Column {
            name: "Failed",
            align: Align::Right,
        },
        Column {
            name: "Total",
            align: Align::Right,
        },
        Column {
            name: "Source",
            align: Align::Left,
        },
    ];

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                row.get("import_id")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                format_created_local(row),
                row.get("imported").and_then(Value::as_i64).unwrap_or(0).to_string(),
                row.get("failed").and_then(Value::as_i64).unwrap_or(0).to_string(),
                row.get("total_processed")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
                row.get("source_kind")
                    .and_then(Value::as_str)
                    .unwrap_or("-")
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![count_label, String::new(), "Imports:".to_string()];
    lines.extend(format::render_table(&columns, &table_rows));
    Ok(lines.join("\n"))
}

fn format_created_local(row: &Value) -> String {
    let raw = row
        .get("created_at")
        .and_then(Value::as_str)
        .unwrap_or("0");
    let seconds = raw.parse::<i64>().unwrap_or(0);
    match Local.timestamp_opt(seconds, 0) {
        chrono::LocalResult::Single(moment) => moment.format("%Y-%m-%d %H:%M").to_string(),
        _ => "unknown".to_string(),
    }
}

fn get_i64(object: &serde_json::Map<String, Value>, key: &str) -> i64 {
    object.get(key).and_then(Value::as_i64).unwrap_or(0)
}
