use std::path::Path;

use crate::ClientResult;
use crate::commands::common::load_setup;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    ImportData, ImportListData, ImportListItem, ImportRowError, ImportSummary,
};
use crate::import;
use crate::state::{map_sqlite_error, open_connection};

#[derive(Debug, Default)]
pub struct ImportRunOptions<'a> {
    pub path: Option<String>,
    pub dry_run: bool,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

#[derive(Debug, Default)]
pub struct ImportListOptions<'a> {
    pub home_override: Option<&'a Path>,
}

pub fn run(path: Option<String>, dry_run: bool) -> ClientResult<SuccessEnvelope> {
    run_with_options(ImportRunOptions {
        path,
        dry_run,
        home_override: None,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ImportRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let execution = import::execute(
        &setup,
        options.path.clone(),
        options.dry_run,
        options.stdin_override,
    )?;

    let errors = execution
        .report
        .failures
        .iter()
        .map(|failure| ImportRowError {
            row: failure.row,
            errors: failure.errors.clone(),
        })
        .collect::<Vec<ImportRowError>>();

    let data = ImportData {
        dry_run: execution.dry_run,
        path: options.path,
        import_id: execution.import_id,
        message: execution.message,
        summary: ImportSummary {
            imported: execution.report.imported,
            failed: execution.report.failed,
            total_processed: execution.report.total_processed(),
        },
        errors,
        source_used: execution.source_used,
    };

    success("import", data)
}

pub fn list() -> ClientResult<SuccessEnvelope> {
    list_with_options(ImportListOptions {
        home_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: ImportListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let db_path = std::path::PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;

    let mut statement = connection
        .prepare(
            "SELECT
                import_id,
                created_at,
                imported,
                failed,
                total_processed,
                source_kind,
                source_ref
             FROM internal_import_runs
             ORDER BY CAST(created_at AS INTEGER) DESC, import_id DESC",
        )
        .map_err(|error| map_sqlite_error(&db_path, &error))?;
    let rows_iter = statement
        .query_map([], |row| {
            Ok(ImportListItem {
                import_id: row.get(0)?,
                created_at: row.get(1)?,
                imported: row.get(2)?,
                failed: row.get(3)?,
                total_processed: row.get(4)?,
                source_kind: row.get::<_, Option<String>>(5)?,
                source_ref: row.get::<_, Option<String>>(6)?,
            })
        })
        .map_err(|error| map_sqlite_error(&db_path, &error))?;

    let mut rows = Vec::new();
    for row in rows_iter {
        let item = row.map_err(|error| map_sqlite_error(&db_path, &error))?;
        rows.push(item);
    }

    success("import list", ImportListData { rows })
}
