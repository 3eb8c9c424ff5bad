use std::fs;
use std::path::{Path, PathBuf};

use copera_client::commands::import;
use copera_client::commands::import::{ImportListOptions, ImportRunOptions};
use copera_client::contracts::envelope::failure_from_error;
use rusqlite::Connection;
use serde_json::Value;
use tempfile::tempdir;

const ROSTER_JSON: &str = r#"[
  ["Client ID","Name","Fixed Deposit","Savings","Loan","Arrears","Fines","Mortuary","Uploaded","Period","Mediator"],
  [1001,"Juan Dela Cruz",1000,5000,250,0,0,50,"2024-03-31","2024-Q1","R. Santos"],
  [1002,"Maria Clara","$2,000.00",3000,0,120.5,25,50,45382,"2024-Q1",null]
]"#;

fn write_file(path: &Path, body: &str) {
    let result = fs::write(path, body);
    assert!(result.is_ok());
}

fn temp_home() -> std::io::Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempdir()?;
    let home = dir.path().join("ledger-home");
    Ok((dir, home))
}

fn run_import(
    home: &Path,
    path: Option<&Path>,
    dry_run: bool,
    stdin_override: Option<&str>,
) -> copera_client::ClientResult<copera_client::SuccessEnvelope> {
    import::run_with_options(ImportRunOptions {
        path: path.map(|value| value.display().to_string()),
        dry_run,
        home_override: Some(home),
        stdin_override: stdin_override.map(std::string::ToString::to_string),
    })
}

fn run_import_list(home: &Path) -> copera_client::ClientResult<copera_client::SuccessEnvelope> {
    import::list_with_options(ImportListOptions {
        home_override: Some(home),
    })
}

fn db_path(home: &Path) -> PathBuf {
    home.join("ledger.db")
}

fn query_count(db_path: &Path, sql: &str) -> i64 {
    let connection = Connection::open(db_path);
    assert!(connection.is_ok());
    if let Ok(conn) = connection {
        let value = conn.query_row(sql, [], |row| row.get::<_, i64>(0));
        assert!(value.is_ok());
        if let Ok(count) = value {
            return count;
        }
    }
    0
}

fn query_optional_string(db_path: &Path, sql: &str) -> Option<String> {
    let connection = Connection::open(db_path).ok()?;
    connection
        .query_row(sql, [], |row| row.get::<_, String>(0))
        .ok()
}

fn query_f64(db_path: &Path, sql: &str) -> f64 {
    let connection = Connection::open(db_path);
    assert!(connection.is_ok());
    if let Ok(conn) = connection {
        let value = conn.query_row(sql, [], |row| row.get::<_, f64>(0));
        assert!(value.is_ok());
        if let Ok(amount) = value {
            return amount;
        }
    }
    f64::NAN
}

fn payload(envelope: copera_client::SuccessEnvelope) -> Value {
    let value = serde_json::to_value(envelope);
    assert!(value.is_ok());
    value.unwrap_or(Value::Null)
}

fn assert_summary(payload: &Value, imported: i64, failed: i64) {
    assert_eq!(payload["data"]["summary"]["imported"], Value::from(imported));
    assert_eq!(payload["data"]["summary"]["failed"], Value::from(failed));
    assert_eq!(
        payload["data"]["summary"]["total_processed"],
        Value::from(imported + failed)
    );
}

#[test]
fn json_file_import_writes_clients_and_snapshots() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let create_home = fs::create_dir_all(&home);
        assert!(create_home.is_ok());
        let source_path = home.join("roster.json");
        write_file(&source_path, ROSTER_JSON);

        let result = run_import(&home, Some(&source_path), false, None);
        assert!(result.is_ok());
        if let Ok(success) = result {
            let value = payload(success);
            assert_eq!(value["ok"], Value::Bool(true));
            assert_eq!(value["command"], Value::String("import".to_string()));
            assert!(value["data"]["import_id"].is_string());
            assert_summary(&value, 2, 0);
            assert_eq!(value["data"]["errors"], Value::Array(Vec::new()));
            assert_eq!(value["data"]["source_used"], Value::String("file".to_string()));
        }

        let db = db_path(&home);
        assert_eq!(query_count(&db, "SELECT COUNT(*) FROM internal_clients"), 2);
        assert_eq!(
            query_count(&db, "SELECT COUNT(*) FROM internal_snapshots"),
            2
        );
        assert_eq!(
            query_optional_string(
                &db,
                "SELECT name FROM internal_clients WHERE client_id = 1001"
            ),
            Some("Juan Dela Cruz".to_string())
        );
        // "$2,000.00" must have been stripped to a plain amount.
        assert_eq!(
            query_f64(
                &db,
                "SELECT fixed_deposit FROM internal_snapshots WHERE client_id = 1002"
            ),
            2000.0
        );
        // 45382 is a spreadsheet serial for 2024-03-31.
        assert_eq!(
            query_optional_string(
                &db,
                "SELECT uploaded_date FROM internal_snapshots WHERE client_id = 1002"
            ),
            Some("2024-03-31".to_string())
        );
    }
}

#[test]
fn csv_stdin_import_parses_positionally() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let csv_body = "\
id,name,fixed_deposit,savings,loan,arrears,fines,mortuary,uploaded,period
1001,Juan Dela Cruz,1000,5000,250,0,0,50,2024-03-31,2024-Q1
";
        let result = run_import(&home, None, false, Some(csv_body));
        assert!(result.is_ok());
        if let Ok(success) = result {
            let value = payload(success);
            assert_summary(&value, 1, 0);
            assert_eq!(
                value["data"]["source_used"],
                Value::String("stdin".to_string())
            );
        }

        let db = db_path(&home);
        assert_eq!(
            query_f64(
                &db,
                "SELECT savings FROM internal_snapshots WHERE client_id = 1001 AND period = '2024-Q1'"
            ),
            5000.0
        );
    }
}

#[test]
fn header_only_file_produces_zero_counts_without_error() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let result = run_import(
            &home,
            None,
            false,
            Some(r#"[["Client ID","Name","FD","Sav","Loan","Arr","Fin","Mor","Up","Period"]]"#),
        );
        assert!(result.is_ok());
        if let Ok(success) = result {
            let value = payload(success);
            assert_summary(&value, 0, 0);
            assert_eq!(value["data"]["errors"], Value::Array(Vec::new()));
        }
    }
}

#[test]
fn blank_rows_never_change_the_counts() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let body = r#"[
  ["Client ID","Name","FD","Sav","Loan","Arr","Fin","Mor","Up","Period"],
  ["","",null,"",""],
  [1001,"Juan Dela Cruz",1000,5000,250,0,0,50,"2024-03-31","2024-Q1"],
  []
]"#;
        let result = run_import(&home, None, false, Some(body));
        assert!(result.is_ok());
        if let Ok(success) = result {
            let value = payload(success);
            assert_summary(&value, 1, 0);
            assert_eq!(value["data"]["errors"], Value::Array(Vec::new()));
        }
    }
}

#[test]
fn reimporting_the_same_file_is_idempotent() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let first = run_import(&home, None, false, Some(ROSTER_JSON));
        assert!(first.is_ok());
        let first_imported = first
            .map(payload)
            .map(|value| value["data"]["summary"]["imported"].as_i64().unwrap_or(-1))
            .unwrap_or(-1);

        let second = run_import(&home, None, false, Some(ROSTER_JSON));
        assert!(second.is_ok());
        if let Ok(success) = second {
            let value = payload(success);
            assert_eq!(
                value["data"]["summary"]["imported"],
                Value::from(first_imported)
            );
        }

        let db = db_path(&home);
        assert_eq!(
            query_count(&db, "SELECT COUNT(*) FROM internal_snapshots"),
            2
        );
        assert_eq!(
            query_count(
                &db,
                "SELECT COUNT(*) FROM internal_snapshots WHERE client_id = 1001 AND period = '2024-Q1'"
            ),
            1
        );
    }
}

#[test]
fn same_batch_correction_keeps_one_snapshot_with_the_last_value() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let body = r#"[
  ["Client ID","Name","FD","Sav","Loan","Arr","Fin","Mor","Up","Period"],
  [1001,"Juan Dela Cruz",1000,5000,250,0,0,50,"2024-03-31","2024-Q1"],
  [1001,"Juan Dela Cruz",1000,6000,250,0,0,50,"2024-03-31","2024-Q1"]
]"#;
        let result = run_import(&home, None, false, Some(body));
        assert!(result.is_ok());
        if let Ok(success) = result {
            let value = payload(success);
            assert_summary(&value, 2, 0);
        }

        let db = db_path(&home);
        assert_eq!(
            query_count(
                &db,
                "SELECT COUNT(*) FROM internal_snapshots WHERE client_id = 1001 AND period = '2024-Q1'"
            ),
            1
        );
        assert_eq!(
            query_f64(
                &db,
                "SELECT savings FROM internal_snapshots WHERE client_id = 1001 AND period = '2024-Q1'"
            ),
            6000.0
        );
    }
}

#[test]
fn invalid_rows_are_reported_and_the_batch_continues() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let body = r#"[
  ["Client ID","Name","FD","Sav","Loan","Arr","Fin","Mor","Up","Period"],
  ["ABC","",1000,5000,250,0,0,50,"2024-03-31","2024-Q1"],
  [1002,"Maria Clara",1000,3000,0,0,0,50,"2024-03-31",""],
  [1003,"Pedro Penduko",500,800,0,0,0,50,"2024-03-31","2024-Q1"]
]"#;
        let result = run_import(&home, None, false, Some(body));
        assert!(result.is_ok());
        if let Ok(success) = result {
            let value = payload(success);
            assert_summary(&value, 1, 2);

            let errors = value["data"]["errors"].as_array().cloned().unwrap_or_default();
            assert_eq!(errors.len(), 2);
            assert_eq!(errors[0]["row"], Value::from(2));
            let first_messages = errors[0]["errors"].as_array().cloned().unwrap_or_default();
            assert!(
                first_messages
                    .iter()
                    .any(|message| message.as_str().unwrap_or("").contains("client id"))
            );
            assert_eq!(errors[1]["row"], Value::from(3));
            assert_eq!(
                errors[1]["errors"][0],
                Value::String("period is required.".to_string())
            );
        }

        let db = db_path(&home);
        assert_eq!(query_count(&db, "SELECT COUNT(*) FROM internal_clients"), 1);
        assert_eq!(
            query_count(&db, "SELECT COUNT(*) FROM internal_snapshots"),
            1
        );
    }
}

#[test]
fn shifted_name_column_fails_identity_and_creates_no_client() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let body = r#"[
  ["Client ID","Name","FD","Sav","Loan","Arr","Fin","Mor","Up","Period"],
  ["Juan Dela Cruz","",1000,5000,250,0,0,50,"2024-03-31","2024-Q1"]
]"#;
        let result = run_import(&home, None, false, Some(body));
        assert!(result.is_ok());
        if let Ok(success) = result {
            let value = payload(success);
            assert_summary(&value, 0, 1);
            assert_eq!(
                value["data"]["errors"][0]["errors"][0],
                Value::String("client id is required and must be numeric.".to_string())
            );
        }

        let db = db_path(&home);
        assert_eq!(query_count(&db, "SELECT COUNT(*) FROM internal_clients"), 0);
    }
}

#[test]
fn dry_run_reports_but_writes_nothing() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let result = run_import(&home, None, true, Some(ROSTER_JSON));
        assert!(result.is_ok());
        if let Ok(success) = result {
            let value = payload(success);
            assert_eq!(value["data"]["dry_run"], Value::Bool(true));
            assert!(value["data"].get("import_id").is_none());
            assert_summary(&value, 2, 0);
        }

        let db = db_path(&home);
        assert_eq!(query_count(&db, "SELECT COUNT(*) FROM internal_clients"), 0);
        assert_eq!(
            query_count(&db, "SELECT COUNT(*) FROM internal_snapshots"),
            0
        );
        assert_eq!(
            query_count(&db, "SELECT COUNT(*) FROM internal_import_runs"),
            0
        );
    }
}

#[test]
fn committed_imports_are_recorded_and_listed() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let first = run_import(&home, None, false, Some(ROSTER_JSON));
        assert!(first.is_ok());
        let second = run_import(&home, None, false, Some(ROSTER_JSON));
        assert!(second.is_ok());

        let db = db_path(&home);
        assert_eq!(
            query_count(&db, "SELECT COUNT(*) FROM internal_import_runs"),
            2
        );

        let listed = run_import_list(&home);
        assert!(listed.is_ok());
        if let Ok(success) = listed {
            let value = payload(success);
            assert_eq!(value["command"], Value::String("import list".to_string()));
            let rows = value["data"]["rows"].as_array().cloned().unwrap_or_default();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0]["imported"], Value::from(2));
            assert_eq!(rows[0]["total_processed"], Value::from(2));
            assert_eq!(rows[0]["source_kind"], Value::String("stdin".to_string()));
        }
    }
}

#[test]
fn later_imports_overwrite_the_client_name() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let first = run_import(&home, None, false, Some(ROSTER_JSON));
        assert!(first.is_ok());

        let renamed = r#"[
  ["Client ID","Name","FD","Sav","Loan","Arr","Fin","Mor","Up","Period"],
  [1001,"Juan D. Cruz",1000,5000,250,0,0,50,"2024-06-30","2024-Q2"]
]"#;
        let second = run_import(&home, None, false, Some(renamed));
        assert!(second.is_ok());

        let db = db_path(&home);
        assert_eq!(
            query_optional_string(
                &db,
                "SELECT name FROM internal_clients WHERE client_id = 1001"
            ),
            Some("Juan D. Cruz".to_string())
        );
        assert_eq!(
            query_count(
                &db,
                "SELECT COUNT(*) FROM internal_snapshots WHERE client_id = 1001"
            ),
            2
        );
    }
}

#[test]
fn missing_source_is_a_call_level_failure() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let result = run_import(&home, None, false, Some(""));
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");

            let envelope = failure_from_error(&error);
            assert!(!envelope.ok);
            assert_eq!(envelope.error.code, "invalid_argument");
            assert!(!envelope.error.recovery_steps.is_empty());
        }
    }
}

#[test]
fn unreadable_path_is_a_call_level_failure() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let missing = home.join("missing.json");
        let result = run_import(&home, Some(&missing), false, None);
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("Could not read import file"));
        }
    }
}
