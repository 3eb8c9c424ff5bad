use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

/// Extended help shown after `copera import create --help`.
/// Documents the positional column contract and the import workflow.
pub const IMPORT_CREATE_AFTER_HELP: &str = "\
How import works:
  Copera does not read .xlsx files directly. Export each roster sheet to
  CSV, or decode it to a JSON array of row arrays, then import it.

  Accepted formats:
    JSON — one top-level array of row arrays (numbers stay numeric)
    CSV  — positional rows, no header mapping

  <path> is a local file path. To read stdin explicitly, use `-` as the
  path. Example: cat roster.csv | copera import create --dry-run -

Row layout (positional, fixed):
  The first row of every file is treated as a header and skipped, even
  when it looks like data. Fully blank rows are ignored. Data rows use
  these columns:

    0  client id          numeric, stable, assigned by the source data
    1  client name
    2  fixed deposit      currency; symbols and separators are stripped
    3  savings
    4  loan balance
    5  arrears
    6  fines
    7  mortuary
    8  uploaded date      date cell, spreadsheet serial, or YYYY-MM-DD
    9  period             free-form label such as 2024-Q1 (required)
    10 assigned mediator  optional

  If column 0 is not numeric and column 1 is empty, column 0 is read as
  the name of a row whose id column was omitted; such rows fail
  validation and are reported with their row number.

What to do next:
  1. Run `copera import create --dry-run <path>` and fix reported rows.
  2. Run `copera import create <path>`. Re-importing a corrected file is
     safe: each (client, period) pair keeps exactly one snapshot.
  3. Run `copera compare <client-id> <baseline> <current>` for variance.
";

#[derive(Debug, Parser)]
#[command(
    name = "copera",
    version,
    about = "client ledger import and period variance analysis",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage roster imports
    #[command(arg_required_else_help = true)]
    Import {
        #[command(subcommand)]
        command: ImportCommand,
    },
    /// Inspect clients and their stored snapshots
    #[command(arg_required_else_help = true)]
    Client {
        #[command(subcommand)]
        command: ClientCommand,
    },
    /// Edit one stored financial snapshot
    #[command(arg_required_else_help = true)]
    Snapshot {
        #[command(subcommand)]
        command: SnapshotCommand,
    },
    /// Compare two reporting periods for one client
    Compare {
        /// Client identifier from the source data
        client_id: i64,
        /// Period label to compare against (e.g. 2024-Q1)
        baseline_period: String,
        /// Period label to compare (e.g. 2024-Q2)
        current_period: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Database discovery commands
    #[command(arg_required_else_help = true)]
    Db {
        #[command(subcommand)]
        command: DbCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ImportCommand {
    /// Import a roster file of client financial rows
    #[command(after_help = IMPORT_CREATE_AFTER_HELP)]
    Create {
        /// Validate and report without writing any rows
        #[arg(long)]
        dry_run: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
        /// Path to a JSON or CSV roster file, or `-` for stdin
        path: Option<String>,
    },
    /// List past imports
    List {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ClientCommand {
    /// List known clients with their snapshot counts
    List {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List every stored snapshot for one client
    Snapshots {
        /// Client identifier from the source data
        client_id: i64,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum SnapshotCommand {
    /// Overwrite fields of one (client, period) snapshot
    Edit {
        /// Client identifier from the source data
        client_id: i64,
        /// Period label of the snapshot to edit
        period: String,
        #[arg(long)]
        fixed_deposit: Option<f64>,
        #[arg(long)]
        savings: Option<f64>,
        #[arg(long)]
        loan_balance: Option<f64>,
        #[arg(long)]
        arrears: Option<f64>,
        #[arg(long)]
        fines: Option<f64>,
        #[arg(long)]
        mortuary: Option<f64>,
        /// Uploaded date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        uploaded_date: Option<IsoDate>,
        /// Assigned mediator; pass an empty string to clear
        #[arg(long)]
        mediator: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum DbCommand {
    /// Show the local database path and public view contracts
    Schema,
}

pub fn parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
