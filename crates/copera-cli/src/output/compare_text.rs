use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

const FIELD_ROWS: [(&str, &str); 7] = [
    ("fixed_deposit", "Fixed deposit"),
    ("savings", "Savings"),
    ("loan_balance", "Loan balance"),
    ("arrears", "Arrears"),
    ("fines", "Fines"),
    ("mortuary", "Mortuary"),
    ("net_worth", "Net worth"),
];

pub fn render_compare(data: &Value) -> io::Result<String> {
    let fields = data
        .get("fields")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("compare output requires fields"))?;
    let client_id = data.get("client_id").and_then(Value::as_i64).unwrap_or(0);
    let name = data.get("name").and_then(Value::as_str).unwrap_or("unknown");
    let baseline = data
        .get("baseline_period")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let current = data
        .get("current_period")
        .and_then(Value::as_str)
        .unwrap_or("unknown");

    let columns = [
        Column {
            name: "Field",
            align: Align::Left,
        },
        Column {
            name: "Delta",
            align: Align::Right,
        },
        Column {
            name: "Change",
            align: Align::Right,
        },
    ];

    let mut sentinel_seen = false;
    let table_rows = FIELD_ROWS
        .iter()
        .map(|(key, label)| {
            let variance = fields.get(*key).cloned().unwrap_or(Value::Null);
            let delta = variance
                .get("delta")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            let change = render_change(variance.get("percent_change"));
            if change == "New" || change == "Closed" {
                sentinel_seen = true;
            }
            vec![
                (*label).to_string(),
                format::format_signed_amount(delta),
                change,
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![
        format!("Client {client_id} — {name}"),
        format!("{baseline} -> {current}"),
        String::new(),
    ];
    lines.extend(format::render_table(&columns, &table_rows));

    if sentinel_seen {
        lines.push(String::new());
        lines.push(
            "New = the value appeared from a zero baseline; Closed = it went to zero.".to_string(),
        );
    }

    Ok(lines.join("\n"))
}

fn render_change(percent_change: Option<&Value>) -> String {
    match percent_change {
        Some(Value::String(sentinel)) if sentinel == "new" => "New".to_string(),
        Some(Value::String(sentinel)) if sentinel == "closed" => "Closed".to_string(),
        Some(Value::Number(number)) => {
            let ratio = number.as_f64().unwrap_or(0.0);
            format!("{ratio:+.1}%")
        }
        _ => "-".to_string(),
    }
}
