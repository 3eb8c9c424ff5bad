use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};

use crate::commands::common::load_setup;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ClientListData, ClientListItem, ClientSnapshotsData, SnapshotData};
use crate::state::{map_sqlite_error, open_connection};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct ClientListOptions<'a> {
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct ClientSnapshotsOptions<'a> {
    pub home_override: Option<&'a Path>,
}

pub fn list() -> ClientResult<SuccessEnvelope> {
    list_with_options(ClientListOptions {
        home_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: ClientListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;

    let mut statement = connection
        .prepare(
            "SELECT
                c.client_id,
                c.name,
                COUNT(s.snapshot_id)
             FROM internal_clients c
             LEFT JOIN internal_snapshots s ON s.client_id = c.client_id
             GROUP BY c.client_id, c.name
             ORDER BY c.client_id ASC",
        )
        .map_err(|error| map_sqlite_error(&db_path, &error))?;
    let rows_iter = statement
        .query_map([], |row| {
            Ok(ClientListItem {
                client_id: row.get(0)?,
                name: row.get(1)?,
                snapshot_count: row.get(2)?,
            })
        })
        .map_err(|error| map_sqlite_error(&db_path, &error))?;

    let mut rows = Vec::new();
    for row in rows_iter {
        let item = row.map_err(|error| map_sqlite_error(&db_path, &error))?;
        rows.push(item);
    }

    success("client list", ClientListData { rows })
}

pub fn snapshots(client_id: i64) -> ClientResult<SuccessEnvelope> {
    snapshots_with_options(
        client_id,
        ClientSnapshotsOptions {
            home_override: None,
        },
    )
}

#[doc(hidden)]
pub fn snapshots_with_options(
    client_id: i64,
    options: ClientSnapshotsOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;

    let name = client_name(&connection, &db_path, client_id)?
        .ok_or_else(|| ClientError::client_not_found(client_id))?;
    let rows = snapshot_rows(&connection, &db_path, client_id)?;

    success(
        "client snapshots",
        ClientSnapshotsData {
            client_id,
            name,
            rows,
        },
    )
}

pub(crate) fn client_name(
    connection: &Connection,
    db_path: &Path,
    client_id: i64,
) -> ClientResult<Option<String>> {
    connection
        .query_row(
            "SELECT name FROM internal_clients WHERE client_id = ?1 LIMIT 1",
            params![client_id],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))
}

fn snapshot_rows(
    connection: &Connection,
    db_path: &Path,
    client_id: i64,
) -> ClientResult<Vec<SnapshotData>> {
    let mut statement = connection
        .prepare(
            "SELECT
                client_id,
                period,
                fixed_deposit,
                savings,
                loan_balance,
                arrears,
                fines,
                mortuary,
                uploaded_date,
                assigned_mediator
             FROM internal_snapshots
             WHERE client_id = ?1
             ORDER BY period ASC",
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    let rows_iter = statement
        .query_map(params![client_id], |row| {
            Ok(SnapshotData {
                client_id: row.get(0)?,
                period: row.get(1)?,
                fixed_deposit: row.get(2)?,
                savings: row.get(3)?,
                loan_balance: row.get(4)?,
                arrears: row.get(5)?,
                fines: row.get(6)?,
                mortuary: row.get(7)?,
                uploaded_date: row.get::<_, Option<String>>(8)?,
                assigned_mediator: row.get::<_, Option<String>>(9)?,
            })
        })
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut rows = Vec::new();
    for row in rows_iter {
        let item = row.map_err(|error| map_sqlite_error(db_path, &error))?;
        rows.push(item);
    }

    Ok(rows)
}
