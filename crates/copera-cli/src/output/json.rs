use std::io;

use copera_client::{ClientError, SuccessEnvelope};
use serde::Serialize;
use serde_json::{Value, json};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let value = match success.command.as_str() {
        "import" | "snapshot edit" | "compare" | "client snapshots" | "db schema" => {
            render_envelope_json(&success.data)
        }
        "import list" | "client list" => render_rows_json(&success.data),
        _ => {
            return Err(io::Error::other(format!(
                "JSON output is not supported for command `{}`",
                success.command
            )));
        }
    };

    serialize_json_pretty(&value)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    let payload = json!({
        "error": {
            "code": error.code,
            "message": error.message,
            "recovery_steps": error.recovery_steps,
        }
    });
    serialize_json_pretty(&payload)
}

fn render_envelope_json(data: &Value) -> Value {
    json!({
        "ok": true,
        "version": JSON_VERSION,
        "data": data.clone()
    })
}

fn render_rows_json(data: &Value) -> Value {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    Value::Array(rows)
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use copera_client::SuccessEnvelope;
    use serde_json::{Value, json};

    use super::{render_error_json, render_success_json};

    fn success(command: &str, data: Value) -> SuccessEnvelope {
        SuccessEnvelope {
            ok: true,
            command: command.to_string(),
            version: "0.1.0".to_string(),
            data,
        }
    }

    #[test]
    fn list_commands_return_a_raw_row_array() {
        let payload = success(
            "client list",
            json!({
                "rows": [
                    {"client_id": 1001, "name": "Juan Dela Cruz", "snapshot_count": 2}
                ]
            }),
        );

        let rendered = render_success_json(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert!(value.is_array());
                assert_eq!(value[0]["client_id"], Value::from(1001));
            }
        }
    }

    #[test]
    fn compare_returns_a_versioned_envelope() {
        let payload = success(
            "compare",
            json!({
                "client_id": 1001,
                "fields": {"savings": {"delta": 500.0, "percent_change": "new"}}
            }),
        );

        let rendered = render_success_json(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], Value::Bool(true));
                assert_eq!(value["version"], Value::String("v1".to_string()));
                assert_eq!(
                    value["data"]["fields"]["savings"]["percent_change"],
                    Value::String("new".to_string())
                );
            }
        }
    }

    #[test]
    fn errors_use_the_universal_error_shape() {
        let error = copera_client::ClientError::new(
            "snapshot_not_found",
            "missing",
            vec!["run copera client snapshots 1001".to_string()],
        );
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(
                    value["error"]["code"],
                    Value::String("snapshot_not_found".to_string())
                );
                assert!(value.get("ok").is_none());
            }
        }
    }
}
