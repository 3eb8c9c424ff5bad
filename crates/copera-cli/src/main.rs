mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use copera_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "Copera - client ledger import and variance analysis

Usage:
  copera <command>

Start here:
  copera import create --help
  copera client list
  copera db schema
";

const TOP_LEVEL_HELP: &str = "Copera — client ledger import and variance analysis

USAGE: copera <command>

Import client rosters:
  1. copera import create --help                 Read the column layout and workflow
  2. copera import create --dry-run <path>       Validate a roster without writing
  3. copera import create <path>                 Import a roster (CSV or JSON rows)

Inspect the ledger:
  copera client list                             List clients and snapshot counts
  copera client snapshots <client-id>            Show every stored period for a client
  copera import list                             List past imports

Analyze period-to-period change:
  copera compare <client-id> <baseline> <current>

Maintain records:
  copera snapshot edit <client-id> <period> --savings 6000

Need raw SQL access? The ledger is plain SQLite:
  copera db schema                               Get the DB path and public view names

Having issues or errors?
  Run `copera import create --help` for import guidance,
  or `copera <command> --help` for command usage.
";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let body = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&body).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }

            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);

    let dispatched = dispatch::dispatch(&cli);
    match dispatched {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing boilerplate (Usage line, "For more information"
/// hint) so the recovery steps are the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// Builds the subcommand path from raw CLI args for use in help hints.
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let non_flags: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();
    if non_flags.is_empty() {
        return None;
    }

    let hint = match non_flags.as_slice() {
        ["import", "create", ..] => Some("import create"),
        ["import", "list", ..] => Some("import list"),
        ["import", ..] => Some("import"),
        ["client", "list", ..] => Some("client list"),
        ["client", "snapshots", ..] => Some("client snapshots"),
        ["client", ..] => Some("client"),
        ["snapshot", "edit", ..] => Some("snapshot edit"),
        ["snapshot", ..] => Some("snapshot"),
        ["compare", ..] => Some("compare"),
        ["db", "schema", ..] => Some("db schema"),
        ["db", ..] => Some("db"),
        _ => None,
    };
    hint.map(std::string::ToString::to_string)
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
        || matches!(
            error.code.as_str(),
            "ledger_init_permission_denied"
                | "ledger_locked"
                | "ledger_corrupt"
                | "migration_failed"
                | "ledger_init_failed"
        )
}
