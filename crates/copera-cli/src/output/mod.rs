mod clients_text;
mod compare_text;
mod error_text;
mod format;
mod import_text;
mod json;
mod mode;
mod schema_text;
mod snapshot_text;

use std::io;

use copera_client::{ClientError, SuccessEnvelope};

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    println!("{body}");
    Ok(())
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    println!("{body}");
    Ok(())
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "import" => import_text::render_import_run(&success.data),
        "import list" => import_text::render_import_list(&success.data),
        "client list" => clients_text::render_client_list(&success.data),
        "client snapshots" => clients_text::render_client_snapshots(&success.data),
        "snapshot edit" => snapshot_text::render_snapshot_edit(&success.data),
        "compare" => compare_text::render_compare(&success.data),
        "db schema" => schema_text::render_schema_summary(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
