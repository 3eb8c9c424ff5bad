use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_client_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("client list output requires rows"))?;

    if rows.is_empty() {
        return Ok([
            "No clients found yet.",
            "",
            "Import a roster first:",
            "  copera import create <path>",
        ]
        .join("\n"));
    }

    let count_label = if rows.len() == 1 {
        "1 client found.".to_string()
    } else {
        format!("{} clients found.", rows.len())
    };

    let columns = [
        Column {
            name: "Client ID",
            align: Align::Right,
        },
        Column {
            name: "Name",
            align: Align::Left,
        },
        Column {
            name: "Snapshots",
            align: Align::Right,
        },
    ];

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                row.get("client_id")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
                row.get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                row.get("snapshot_count")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![count_label, String::new(), "Clients:".to_string()];
    lines.extend(format::render_table(&columns, &table_rows));
    Ok(lines.join("\n"))
}

pub fn render_client_snapshots(data: &Value) -> io::Result<String> {
    let client_id = data.get("client_id").and_then(Value::as_i64).unwrap_or(0);
    let name = data.get("name").and_then(Value::as_str).unwrap_or("unknown");
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("client snapshots output requires rows"))?;

    let mut lines = vec![format!("Client {client_id} — {name}")];

    if rows.is_empty() {
        lines.push(String::new());
        lines.push("No snapshots stored for this client yet.".to_string());
        return Ok(lines.join("\n"));
    }

    let columns = [
        Column {
            name: "Period",
            align: Align::Left,
        },
        Column {
            name: "Fixed Dep",
            align: Align::Right,
        },
        Column {
            name: "Savings",
            align: Align::Right,
        },
        Column {
            name: "Loan",
            align: Align::Right,
        },
        Column {
            name: "Arrears",
            align: Align::Right,
        },
        Column {
            name: "Fines",
            align: Align::Right,
        },
        Column {
            name: "Mortuary",
            align: Align::Right,
        },
        Column {
            name: "Uploaded",
            align: Align::Left,
        },
        Column {
            name: "Mediator",
            align: Align::Left,
        },
    ];

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                row.get("period")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                amount_cell(row, "fixed_deposit"),
                amount_cell(row, "savings"),
                amount_cell(row, "loan_balance"),
                amount_cell(row, "arrears"),
                amount_cell(row, "fines"),
                amount_cell(row, "mortuary"),
                row.get("uploaded_date")
                    .and_then(Value::as_str)
                    .unwrap_or("-")
                    .to_string(),
                row.get("assigned_mediator")
                    .and_then(Value::as_str)
                    .unwrap_or("-")
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    lines.push(String::new());
    lines.push("Snapshots:".to_string());
    lines.extend(format::render_table(&columns, &table_rows));
    Ok(lines.join("\n"))
}

fn amount_cell(row: &Value, key: &str) -> String {
    format::format_amount(row.get(key).and_then(Value::as_f64).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_client_list, render_client_snapshots};

    #[test]
    fn empty_client_list_points_at_import() {
        let rendered = render_client_list(&json!({"rows": []}));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("No clients found yet."));
            assert!(text.contains("copera import create <path>"));
        }
    }

    #[test]
    fn client_list_renders_counts_and_names() {
        let rendered = render_client_list(&json!({
            "rows": [
                {"client_id": 1001, "name": "Juan Dela Cruz", "snapshot_count": 2},
                {"client_id": 1002, "name": "Maria Clara", "snapshot_count": 1}
            ]
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("2 clients found."));
            assert!(text.contains("Juan Dela Cruz"));
            assert!(text.contains("1002"));
        }
    }

    #[test]
    fn snapshots_render_two_decimal_amounts() {
        let rendered = render_client_snapshots(&json!({
            "client_id": 1001,
            "name": "Juan Dela Cruz",
            "rows": [{
                "period": "2024-Q1",
                "fixed_deposit": 1000.0,
                "savings": 5000.5,
                "loan_balance": 250.0,
                "arrears": 0.0,
                "fines": 0.0,
                "mortuary": 50.0,
                "uploaded_date": "2024-03-31"
            }]
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Client 1001 — Juan Dela Cruz"));
            assert!(text.contains("5000.50"));
            assert!(text.contains("2024-03-31"));
        }
    }

    #[test]
    fn snapshotless_client_is_stated_plainly() {
        let rendered = render_client_snapshots(&json!({
            "client_id": 1001,
            "name": "Juan Dela Cruz",
            "rows": []
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("No snapshots stored for this client yet."));
        }
    }
}
