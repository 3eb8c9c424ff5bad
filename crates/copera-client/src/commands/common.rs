use std::path::Path;

use crate::ClientResult;
use crate::contracts::types::{PublicView, ViewColumn};
use crate::setup::{SetupContext, ensure_initialized, ensure_initialized_at};

pub fn public_view_contracts() -> Vec<PublicView> {
    vec![
        PublicView {
            name: "v1_clients".to_string(),
            columns: vec![
                view_column("client_id", "integer"),
                view_column("name", "text"),
                view_column("snapshot_count", "integer"),
            ],
        },
        PublicView {
            name: "v1_snapshots".to_string(),
            columns: vec![
                view_column("client_id", "integer"),
                view_column("name", "text"),
                view_column("period", "text"),
                view_column("fixed_deposit", "real"),
                view_column("savings", "real"),
                view_column("loan_balance", "real"),
                view_column("arrears", "real"),
                view_column("fines", "real"),
                view_column("mortuary", "real"),
                nullable_view_column("uploaded_date", "date"),
                nullable_view_column("assigned_mediator", "text"),
            ],
        },
        PublicView {
            name: "v1_imports".to_string(),
            columns: vec![
                view_column("import_id", "text"),
                view_column("created_at", "text"),
                view_column("imported", "integer"),
                view_column("failed", "integer"),
                view_column("total_processed", "integer"),
                nullable_view_column("source_kind", "text"),
                nullable_view_column("source_ref", "text"),
            ],
        },
    ]
}

pub(crate) fn load_setup(home_override: Option<&Path>) -> ClientResult<SetupContext> {
    if let Some(path) = home_override {
        return ensure_initialized_at(path);
    }
    ensure_initialized()
}

fn view_column(name: &str, column_type: &str) -> ViewColumn {
    ViewColumn {
        name: name.to_string(),
        column_type: column_type.to_string(),
        nullable: false,
    }
}

fn nullable_view_column(name: &str, column_type: &str) -> ViewColumn {
    ViewColumn {
        name: name.to_string(),
        column_type: column_type.to_string(),
        nullable: true,
    }
}
