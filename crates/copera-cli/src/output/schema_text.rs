use std::io;

use serde_json::Value;

use super::format;

pub fn render_schema_summary(data: &Value) -> io::Result<String> {
    let db_path = data
        .get("db_path")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("schema output requires db_path"))?;
    let schema_version = data
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let views = data
        .get("public_views")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut lines = vec!["Your ledger is a plain SQLite database.".to_string(), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Database:", db_path.to_string()),
            ("Schema version:", schema_version.to_string()),
        ],
        2,
    ));

    lines.push(String::new());
    lines.push("Public views (stable, query these):".to_string());
    for view in &views {
        let view_name = view.get("name").and_then(Value::as_str).unwrap_or("unknown");
        lines.push(format!("  {view_name}"));
        let columns = view
            .get("columns")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        for column in columns {
            let column_name = column.get("name").and_then(Value::as_str).unwrap_or("?");
            let column_type = column.get("type").and_then(Value::as_str).unwrap_or("?");
            let nullable = column
                .get("nullable")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let suffix = if nullable { "|null" } else { "" };
            lines.push(format!("    {column_name} ({column_type}{suffix})"));
        }
    }

    lines.push(String::new());
    lines.push("Example:".to_string());
    lines.push("  sqlite3 <db-path> \"SELECT * FROM v1_snapshots LIMIT 5;\"".to_string());

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_schema_summary;

    #[test]
    fn schema_summary_lists_views_and_columns() {
        let data = json!({
            "db_path": "/tmp/ledger-home/ledger.db",
            "schema_version": "v1",
            "public_views": [{
                "name": "v1_clients",
                "columns": [
                    {"name": "client_id", "type": "integer", "nullable": false},
                    {"name": "name", "type": "text", "nullable": false}
                ]
            }]
        });

        let rendered = render_schema_summary(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("/tmp/ledger-home/ledger.db"));
            assert!(text.contains("v1_clients"));
            assert!(text.contains("client_id (integer)"));
        }
    }

    #[test]
    fn nullable_columns_are_marked() {
        let data = json!({
            "db_path": "/tmp/ledger.db",
            "schema_version": "v1",
            "public_views": [{
                "name": "v1_snapshots",
                "columns": [
                    {"name": "uploaded_date", "type": "date", "nullable": true}
                ]
            }]
        });

        let rendered = render_schema_summary(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("uploaded_date (date|null)"));
        }
    }
}
