use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};

use crate::commands::clients::client_name;
use crate::commands::common::load_setup;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{SnapshotData, SnapshotEditData};
use crate::import::SnapshotFields;
use crate::import::store::{SnapshotStore, SqliteStore};
use crate::import::validate::validate_financials;
use crate::state::{map_sqlite_error, open_connection};
use crate::{ClientError, ClientResult};

/// Per-field overrides for the explicit record-edit operation. Fields
/// left `None` keep their stored values; the snapshot is re-validated
/// and rewritten in full.
#[derive(Debug, Default)]
pub struct SnapshotEditOptions<'a> {
    pub fixed_deposit: Option<f64>,
    pub savings: Option<f64>,
    pub loan_balance: Option<f64>,
    pub arrears: Option<f64>,
    pub fines: Option<f64>,
    pub mortuary: Option<f64>,
    pub uploaded_date: Option<String>,
    pub assigned_mediator: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn edit(
    client_id: i64,
    period: &str,
    options: SnapshotEditOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;

    if client_name(&connection, &db_path, client_id)?.is_none() {
        return Err(ClientError::client_not_found(client_id));
    }

    let mut fields = load_snapshot_fields(&connection, &db_path, client_id, period)?
        .ok_or_else(|| ClientError::snapshot_not_found(client_id, period))?;

    apply_overrides(&mut fields, &options)?;

    let violations = validate_financials(period, &fields);
    if !violations.is_empty() {
        return Err(ClientError::invalid_argument_with_recovery(
            &violations.join(" "),
            vec!["Correct the listed fields and rerun `copera snapshot edit`.".to_string()],
        ));
    }

    let mut store = SqliteStore::new(&connection, &db_path);
    store.upsert_snapshot(client_id, period, &fields)?;

    let snapshot = SnapshotData {
        client_id,
        period: period.to_string(),
        fixed_deposit: fields.fixed_deposit,
        savings: fields.savings,
        loan_balance: fields.loan_balance,
        arrears: fields.arrears,
        fines: fields.fines,
        mortuary: fields.mortuary,
        uploaded_date: fields
            .uploaded_date
            .map(|date| date.format("%Y-%m-%d").to_string()),
        assigned_mediator: fields.assigned_mediator.clone(),
    };

    success(
        "snapshot edit",
        SnapshotEditData {
            client_id,
            period: period.to_string(),
            message: "Snapshot updated.".to_string(),
            snapshot,
        },
    )
}

fn apply_overrides(
    fields: &mut SnapshotFields,
    options: &SnapshotEditOptions<'_>,
) -> ClientResult<()> {
    if let Some(value) = options.fixed_deposit {
        fields.fixed_deposit = value;
    }
    if let Some(value) = options.savings {
        fields.savings = value;
    }
    if let Some(value) = options.loan_balance {
        fields.loan_balance = value;
    }
    if let Some(value) = options.arrears {
        fields.arrears = value;
    }
    if let Some(value) = options.fines {
        fields.fines = value;
    }
    if let Some(value) = options.mortuary {
        fields.mortuary = value;
    }

    if let Some(raw_date) = &options.uploaded_date {
        let parsed = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| {
            ClientError::invalid_argument_for_command(
                "uploaded date must use YYYY-MM-DD format with a real calendar date.",
                Some("snapshot edit"),
            )
        })?;
        fields.uploaded_date = Some(parsed);
    }

    if let Some(raw_mediator) = &options.assigned_mediator {
        let trimmed = raw_mediator.trim();
        fields.assigned_mediator = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    Ok(())
}

fn load_snapshot_fields(
    connection: &Connection,
    db_path: &Path,
    client_id: i64,
    period: &str,
) -> ClientResult<Option<SnapshotFields>> {
    connection
        .query_row(
            "SELECT
                fixed_deposit,
                savings,
                loan_balance,
                arrears,
                fines,
                mortuary,
                uploaded_date,
                assigned_mediator
             FROM internal_snapshots
             WHERE client_id = ?1 AND period = ?2
             LIMIT 1",
            params![client_id, period],
            |row| {
                let uploaded_date = row
                    .get::<_, Option<String>>(6)?
                    .and_then(|value| NaiveDate::parse_from_str(&value, "%Y-%m-%d").ok());
                Ok(SnapshotFields {
                    fixed_deposit: row.get(0)?,
                    savings: row.get(1)?,
                    loan_balance: row.get(2)?,
                    arrears: row.get(3)?,
                    fines: row.get(4)?,
                    mortuary: row.get(5)?,
                    uploaded_date,
                    assigned_mediator: row.get::<_, Option<String>>(7)?,
                })
            },
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))
}
