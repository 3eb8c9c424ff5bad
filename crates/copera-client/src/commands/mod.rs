pub mod clients;
pub mod common;
pub mod compare;
pub mod import;
pub mod schema;
pub mod snapshots;
