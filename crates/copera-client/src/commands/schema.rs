use std::path::Path;

use crate::ClientResult;
use crate::commands::common::load_setup;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::SchemaSummaryData;

#[derive(Debug, Default)]
pub struct SchemaOptions<'a> {
    pub home_override: Option<&'a Path>,
}

pub fn summary() -> ClientResult<SuccessEnvelope> {
    summary_with_options(SchemaOptions {
        home_override: None,
    })
}

#[doc(hidden)]
pub fn summary_with_options(options: SchemaOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;

    success(
        "db schema",
        SchemaSummaryData {
            db_path: setup.db_path,
            schema_version: setup.schema_version,
            public_views: setup.public_views,
        },
    )
}
