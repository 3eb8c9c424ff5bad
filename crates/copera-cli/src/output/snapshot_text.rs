use std::io;

use serde_json::Value;

use super::format;

pub fn render_snapshot_edit(data: &Value) -> io::Result<String> {
    let snapshot = data
        .get("snapshot")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("snapshot edit output requires a snapshot"))?;
    let client_id = data.get("client_id").and_then(Value::as_i64).unwrap_or(0);
    let period = data.get("period").and_then(Value::as_str).unwrap_or("unknown");

    let mut lines = vec![
        data.get("message")
            .and_then(Value::as_str)
            .unwrap_or("Snapshot updated.")
            .to_string(),
        String::new(),
        format!("Client {client_id}, period {period}:"),
    ];

    let mut entries = vec![
        ("Fixed deposit:", amount(snapshot, "fixed_deposit")),
        ("Savings:", amount(snapshot, "savings")),
        ("Loan balance:", amount(snapshot, "loan_balance")),
        ("Arrears:", amount(snapshot, "arrears")),
        ("Fines:", amount(snapshot, "fines")),
        ("Mortuary:", amount(snapshot, "mortuary")),
    ];
    if let Some(uploaded) = snapshot.get("uploaded_date").and_then(Value::as_str) {
        entries.push(("Uploaded date:", uploaded.to_string()));
    }
    if let Some(mediator) = snapshot.get("assigned_mediator").and_then(Value::as_str) {
        entries.push(("Mediator:", mediator.to_string()));
    }
    lines.extend(format::key_value_rows(&entries, 2));

    Ok(lines.join("\n"))
}

fn amount(snapshot: &serde_json::Map<String, Value>, key: &str) -> String {
    format::format_amount(snapshot.get(key).and_then(Value::as_f64).unwrap_or(0.0))
}
