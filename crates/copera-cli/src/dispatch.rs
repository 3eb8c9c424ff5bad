use copera_client::commands;
use copera_client::commands::snapshots::SnapshotEditOptions;
use copera_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, ClientCommand, Commands, DbCommand, ImportCommand, SnapshotCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Import { command } => match command {
            ImportCommand::Create {
                dry_run,
                json: _,
                path,
            } => commands::import::run(path.clone(), *dry_run),
            ImportCommand::List { .. } => commands::import::list(),
        },
        Commands::Client { command } => match command {
            ClientCommand::List { .. } => commands::clients::list(),
            ClientCommand::Snapshots { client_id, .. } => commands::clients::snapshots(*client_id),
        },
        Commands::Snapshot { command } => match command {
            SnapshotCommand::Edit {
                client_id,
                period,
                fixed_deposit,
                savings,
                loan_balance,
                arrears,
                fines,
                mortuary,
                uploaded_date,
                mediator,
                json: _,
            } => commands::snapshots::edit(
                *client_id,
                period,
                SnapshotEditOptions {
                    fixed_deposit: *fixed_deposit,
                    savings: *savings,
                    loan_balance: *loan_balance,
                    arrears: *arrears,
                    fines: *fines,
                    mortuary: *mortuary,
                    uploaded_date: uploaded_date
                        .as_ref()
                        .map(|value| value.as_str().to_string()),
                    assigned_mediator: mediator.clone(),
                    home_override: None,
                },
            ),
        },
        Commands::Compare {
            client_id,
            baseline_period,
            current_period,
            json: _,
        } => commands::compare::run(*client_id, baseline_period, current_period),
        Commands::Db { command } => match command {
            DbCommand::Schema => commands::schema::summary(),
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::parse_from;

    #[test]
    fn import_list_parses_and_is_dispatchable() {
        let parsed = parse_from(["copera", "import", "list"]);
        assert!(parsed.is_ok());
    }

    #[test]
    fn client_snapshots_requires_a_client_id() {
        let parsed = parse_from(["copera", "client", "snapshots"]);
        assert!(parsed.is_err());

        let complete = parse_from(["copera", "client", "snapshots", "1001"]);
        assert!(complete.is_ok());
    }

    #[test]
    fn unknown_subcommands_are_rejected() {
        let parsed = parse_from(["copera", "guide"]);
        assert!(parsed.is_err());
    }
}
