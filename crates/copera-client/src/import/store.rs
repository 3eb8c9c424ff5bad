use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, params};
use ulid::Ulid;

use crate::ClientResult;
use crate::import::SnapshotFields;
use crate::state::map_sqlite_error;

/// The keyed store the import engine writes through. Both operations are
/// idempotent keyed puts: re-running them with the same key overwrites
/// the prior record in full, which is what makes re-imports safe.
pub trait SnapshotStore {
    fn upsert_client(&mut self, client_id: i64, name: &str) -> ClientResult<()>;

    fn upsert_snapshot(
        &mut self,
        client_id: i64,
        period: &str,
        fields: &SnapshotFields,
    ) -> ClientResult<()>;
}

pub struct SqliteStore<'a> {
    connection: &'a Connection,
    db_path: &'a Path,
    timestamp: String,
}

impl<'a> SqliteStore<'a> {
    pub fn new(connection: &'a Connection, db_path: &'a Path) -> Self {
        Self {
            connection,
            db_path,
            timestamp: now_timestamp(),
        }
    }
}

impl SnapshotStore for SqliteStore<'_> {
    fn upsert_client(&mut self, client_id: i64, name: &str) -> ClientResult<()> {
        self.connection
            .execute(
                "INSERT INTO internal_clients (client_id, name, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?3)
                 ON CONFLICT (client_id) DO UPDATE SET
                     name = excluded.name,
                     updated_at = excluded.updated_at",
                params![client_id, name, &self.timestamp],
            )
            .map_err(|error| map_sqlite_error(self.db_path, &error))?;
        Ok(())
    }

    fn upsert_snapshot(
        &mut self,
        client_id: i64,
        period: &str,
        fields: &SnapshotFields,
    ) -> ClientResult<()> {
        let snapshot_id = format!("snap_{}", Ulid::new());
        let uploaded_date = fields
            .uploaded_date
            .map(|date| date.format("%Y-%m-%d").to_string());
        self.connection
            .execute(
                "INSERT INTO internal_snapshots (
                    snapshot_id,
                    client_id,
                    period,
                    fixed_deposit,
                    savings,
                    loan_balance,
                    arrears,
                    fines,
                    mortuary,
                    uploaded_date,
                    assigned_mediator,
                    created_at,
                    updated_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)
                 ON CONFLICT (client_id, period) DO UPDATE SET
                     fixed_deposit = excluded.fixed_deposit,
                     savings = excluded.savings,
                     loan_balance = excluded.loan_balance,
                     arrears = excluded.arrears,
                     fines = excluded.fines,
                     mortuary = excluded.mortuary,
                     uploaded_date = excluded.uploaded_date,
                     assigned_mediator = excluded.assigned_mediator,
                     updated_at = excluded.updated_at",
                params![
                    &snapshot_id,
                    client_id,
                    period,
                    fields.fixed_deposit,
                    fields.savings,
                    fields.loan_balance,
                    fields.arrears,
                    fields.fines,
                    fields.mortuary,
                    &uploaded_date,
                    &fields.assigned_mediator,
                    &self.timestamp
                ],
            )
            .map_err(|error| map_sqlite_error(self.db_path, &error))?;
        Ok(())
    }
}

pub(crate) fn now_timestamp() -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH);
    match now {
        Ok(duration) => format!("{}", duration.as_secs()),
        Err(_) => "0".to_string(),
    }
}
