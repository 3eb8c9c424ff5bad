pub mod cell;
pub mod classify;
pub(crate) mod input;
pub mod layout;
pub(crate) mod parse;
pub mod store;
pub mod validate;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use rusqlite::{TransactionBehavior, params};
use ulid::Ulid;

use crate::import::cell::{CellValue, coerce_amount, coerce_date, coerce_text};
use crate::import::layout::ColumnLayout;
use crate::import::store::{SnapshotStore, SqliteStore, now_timestamp};
use crate::setup::SetupContext;
use crate::state::{map_sqlite_error, open_connection};
use crate::{ClientError, ClientResult};

/// The financial figures of one snapshot, post-coercion. Amounts default
/// to 0.0 for absent columns; the date and mediator stay absent when
/// their columns are empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotFields {
    pub fixed_deposit: f64,
    pub savings: f64,
    pub loan_balance: f64,
    pub arrears: f64,
    pub fines: f64,
    pub mortuary: f64,
    pub uploaded_date: Option<NaiveDate>,
    pub assigned_mediator: Option<String>,
}

impl SnapshotFields {
    pub fn amounts(&self) -> [(&'static str, f64); 6] {
        [
            ("fixed_deposit", self.fixed_deposit),
            ("savings", self.savings),
            ("loan_balance", self.loan_balance),
            ("arrears", self.arrears),
            ("fines", self.fines),
            ("mortuary", self.mortuary),
        ]
    }
}

/// One failed row: the 1-based source row number and every validation or
/// storage message collected for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    pub row: i64,
    pub errors: Vec<String>,
}

/// The per-call import report. Always returned, never thrown: in-batch
/// row problems are entries here, not call failures.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub imported: i64,
    pub failed: i64,
    pub failures: Vec<RowFailure>,
}

impl ImportReport {
    pub fn total_processed(&self) -> i64 {
        self.imported + self.failed
    }

    fn record_failure(&mut self, row: i64, errors: Vec<String>) {
        self.failed += 1;
        self.failures.push(RowFailure { row, errors });
    }
}

/// Runs the import loop over an already-decoded table of rows.
///
/// Rows are processed strictly in source order; row 0 is always the
/// header. Each valid row upserts its client and then its (client,
/// period) snapshot, so later rows in the same call observe earlier
/// rows' writes. Row failures, whether validation or storage, are
/// recorded and the batch continues.
pub fn execute_rows<S: SnapshotStore>(
    store: &mut S,
    rows: &[Vec<CellValue>],
    layout: &ColumnLayout,
    fallback_date: NaiveDate,
) -> ImportReport {
    let mut report = ImportReport::default();

    for (index, row) in rows.iter().enumerate() {
        if index == 0 {
            continue;
        }
        if row_is_blank(row) {
            continue;
        }

        let row_number = (index as i64) + 1;
        let heading = classify::classify_heading(row);

        let identity_errors = validate::validate_identity(&heading);
        if !identity_errors.is_empty() {
            report.record_failure(row_number, identity_errors);
            continue;
        }

        let period = coerce_text(cell_at(row, layout.period));
        let fields = coerce_fields(row, layout, fallback_date);

        let financial_errors = validate::validate_financials(&period, &fields);
        if !financial_errors.is_empty() {
            report.record_failure(row_number, financial_errors);
            continue;
        }

        let client_id = heading.identifier.unwrap_or_default();
        let outcome = store
            .upsert_client(client_id, &heading.name)
            .and_then(|()| store.upsert_snapshot(client_id, &period, &fields));
        match outcome {
            Ok(()) => report.imported += 1,
            Err(error) => report.record_failure(row_number, vec![error.message]),
        }
    }

    report
}

fn coerce_fields(
    row: &[CellValue],
    layout: &ColumnLayout,
    fallback_date: NaiveDate,
) -> SnapshotFields {
    let date_cell = cell_at(row, layout.uploaded_date);
    let uploaded_date = if coerce_text(date_cell).is_empty() {
        None
    } else {
        Some(coerce_date(date_cell, fallback_date))
    };

    let mediator = coerce_text(cell_at(row, layout.assigned_mediator));
    let assigned_mediator = if mediator.is_empty() {
        None
    } else {
        Some(mediator)
    };

    SnapshotFields {
        fixed_deposit: coerce_amount(cell_at(row, layout.fixed_deposit)),
        savings: coerce_amount(cell_at(row, layout.savings)),
        loan_balance: coerce_amount(cell_at(row, layout.loan_balance)),
        arrears: coerce_amount(cell_at(row, layout.arrears)),
        fines: coerce_amount(cell_at(row, layout.fines)),
        mortuary: coerce_amount(cell_at(row, layout.mortuary)),
        uploaded_date,
        assigned_mediator,
    }
}

const EMPTY_CELL: CellValue = CellValue::Empty;

fn cell_at(row: &[CellValue], index: usize) -> &CellValue {
    row.get(index).unwrap_or(&EMPTY_CELL)
}

fn row_is_blank(row: &[CellValue]) -> bool {
    row.iter().all(|value| coerce_text(value).is_empty())
}

#[derive(Debug, Clone)]
pub(crate) struct ImportExecutionResult {
    pub dry_run: bool,
    pub import_id: Option<String>,
    pub message: String,
    pub report: ImportReport,
    pub source_used: Option<String>,
}

pub(crate) fn execute(
    setup: &SetupContext,
    path: Option<String>,
    dry_run: bool,
    stdin_override: Option<String>,
) -> ClientResult<ImportExecutionResult> {
    let resolved_source = input::resolve_source(path, stdin_override)?;
    let rows = parse::parse_source(&resolved_source.content)?;

    let db_path = PathBuf::from(&setup.db_path);
    let mut connection = open_connection(&db_path)?;
    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(&db_path, &error))?;

    let fallback_date = Local::now().date_naive();
    let report = {
        let mut sqlite_store = SqliteStore::new(&transaction, &db_path);
        execute_rows(
            &mut sqlite_store,
            &rows,
            &ColumnLayout::default(),
            fallback_date,
        )
    };

    if dry_run {
        transaction
            .rollback()
            .map_err(|error| map_sqlite_error(&db_path, &error))?;
        return Ok(ImportExecutionResult {
            dry_run: true,
            import_id: None,
            message: "Validation finished. No rows were written.".to_string(),
            report,
            source_used: Some(resolved_source.source_kind.as_str().to_string()),
        });
    }

    let import_id = format!("imp_{}", Ulid::new());
    transaction
        .execute(
            "INSERT INTO internal_import_runs (
                import_id,
                created_at,
                imported,
                failed,
                total_processed,
                source_kind,
                source_ref
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &import_id,
                now_timestamp(),
                report.imported,
                report.failed,
                report.total_processed(),
                resolved_source.source_kind.as_str(),
                &resolved_source.source_ref
            ],
        )
        .map_err(|error| map_sqlite_error(&db_path, &error))?;
    transaction
        .commit()
        .map_err(|error| map_sqlite_error(&db_path, &error))?;

    let message = if report.failed == 0 {
        "Import completed successfully.".to_string()
    } else {
        format!(
            "Import completed: {} imported, {} failed.",
            report.imported, report.failed
        )
    };

    Ok(ImportExecutionResult {
        dry_run: false,
        import_id: Some(import_id),
        message,
        report,
        source_used: Some(resolved_source.source_kind.as_str().to_string()),
    })
}

pub(crate) fn invalid_input_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide a JSON array of row arrays or CSV input via path or stdin.".to_string(),
            "Run `copera import create --help` to review the expected column layout.".to_string(),
        ],
    )
}
