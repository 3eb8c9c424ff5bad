use serde::Serialize;

use crate::compare::ComparisonFields;

#[derive(Debug, Clone, Serialize)]
pub struct ViewColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    pub nullable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicView {
    pub name: String,
    pub columns: Vec<ViewColumn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaSummaryData {
    pub db_path: String,
    pub schema_version: String,
    pub public_views: Vec<PublicView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub imported: i64,
    pub failed: i64,
    pub total_processed: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportRowError {
    pub row: i64,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportData {
    pub dry_run: bool,
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_id: Option<String>,
    pub message: String,
    pub summary: ImportSummary,
    pub errors: Vec<ImportRowError>,
    pub source_used: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportListItem {
    pub import_id: String,
    pub created_at: String,
    pub imported: i64,
    pub failed: i64,
    pub total_processed: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportListData {
    pub rows: Vec<ImportListItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientListItem {
    pub client_id: i64,
    pub name: String,
    pub snapshot_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientListData {
    pub rows: Vec<ClientListItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotData {
    pub client_id: i64,
    pub period: String,
    pub fixed_deposit: f64,
    pub savings: f64,
    pub loan_balance: f64,
    pub arrears: f64,
    pub fines: f64,
    pub mortuary: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_mediator: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientSnapshotsData {
    pub client_id: i64,
    pub name: String,
    pub rows: Vec<SnapshotData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotEditData {
    pub client_id: i64,
    pub period: String,
    pub message: String,
    pub snapshot: SnapshotData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonData {
    pub client_id: i64,
    pub name: String,
    pub baseline_period: String,
    pub current_period: String,
    pub fields: ComparisonFields,
}
