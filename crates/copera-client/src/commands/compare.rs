use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};

use crate::commands::clients::client_name;
use crate::commands::common::load_setup;
use crate::compare::{SnapshotFigures, compare};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ComparisonData;
use crate::state::{map_sqlite_error, open_connection};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct CompareOptions<'a> {
    pub home_override: Option<&'a Path>,
}

pub fn run(
    client_id: i64,
    baseline_period: &str,
    current_period: &str,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(
        client_id,
        baseline_period,
        current_period,
        CompareOptions {
            home_override: None,
        },
    )
}

#[doc(hidden)]
pub fn run_with_options(
    client_id: i64,
    baseline_period: &str,
    current_period: &str,
    options: CompareOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;

    let name = client_name(&connection, &db_path, client_id)?
        .ok_or_else(|| ClientError::client_not_found(client_id))?;

    let baseline = load_figures(&connection, &db_path, client_id, baseline_period)?
        .ok_or_else(|| ClientError::snapshot_not_found(client_id, baseline_period))?;
    let current = load_figures(&connection, &db_path, client_id, current_period)?
        .ok_or_else(|| ClientError::snapshot_not_found(client_id, current_period))?;

    let fields = compare(&current, &baseline);

    success(
        "compare",
        ComparisonData {
            client_id,
            name,
            baseline_period: baseline_period.to_string(),
            current_period: current_period.to_string(),
            fields,
        },
    )
}

fn load_figures(
    connection: &Connection,
    db_path: &Path,
    client_id: i64,
    period: &str,
) -> ClientResult<Option<SnapshotFigures>> {
    connection
        .query_row(
            "SELECT
                fixed_deposit,
                savings,
                loan_balance,
                arrears,
                fines,
                mortuary
             FROM internal_snapshots
             WHERE client_id = ?1 AND period = ?2
             LIMIT 1",
            params![client_id, period],
            |row| {
                Ok(SnapshotFigures {
                    fixed_deposit: row.get(0)?,
                    savings: row.get(1)?,
                    loan_balance: row.get(2)?,
                    arrears: row.get(3)?,
                    fines: row.get(4)?,
                    mortuary: row.get(5)?,
                })
            },
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))
}
