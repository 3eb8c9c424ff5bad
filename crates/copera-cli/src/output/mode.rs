use crate::cli::{ClientCommand, Commands, ImportCommand, SnapshotCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json_requested = match command {
        Commands::Import { command } => match command {
            ImportCommand::Create { json, .. } | ImportCommand::List { json } => *json,
        },
        Commands::Client { command } => match command {
            ClientCommand::List { json } | ClientCommand::Snapshots { json, .. } => *json,
        },
        Commands::Snapshot { command } => match command {
            SnapshotCommand::Edit { json, .. } => *json,
        },
        Commands::Compare { json, .. } => *json,
        Commands::Db { .. } => false,
    };

    if json_requested {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}
