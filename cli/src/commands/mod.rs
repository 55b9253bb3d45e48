/// `list`.
pub mod list;
/// `approve`, `reject`, `delete`, `feature`.
pub mod moderate;
/// `show`.
pub mod show;

use anyhow::{bail, Result};
use drag_admin_shared::{rest::RestClient, ActionKind};

use crate::cli::{Cli, Commands, ConnectionArgs};

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let Cli {
        connection,
        command,
    } = cli;
    match command {
        Commands::List {
            resource,
            page,
            limit,
            tab,
            filter,
            format,
            utc_offset,
        } => {
            let options = list::ListOptions {
                page,
                limit,
                tab,
                filter,
                format,
                offset: utc_offset,
            };
            list::run(client(&connection)?, resource, options).await
        },
        Commands::Show {
            resource,
            id,
            format,
        } => show::run(&client(&connection)?, resource, &id, format).await,
        Commands::Approve {
            resource,
            ids,
        } => moderate::run(client(&connection)?, resource, ActionKind::Approve, &ids).await,
        Commands::Reject {
            resource,
            ids,
        } => moderate::run(client(&connection)?, resource, ActionKind::Reject, &ids).await,
        Commands::Delete {
            resource,
            ids,
            yes,
        } => {
            if !yes {
                bail!("refusing to delete {} record(s) without --yes", ids.len());
            }
            moderate::run(client(&connection)?, resource, ActionKind::Delete, &ids).await
        },
        Commands::Feature {
            resource,
            id,
            off,
        } => {
            let action = if off {
                ActionKind::Unfeature
            } else {
                ActionKind::Feature
            };
            moderate::run(client(&connection)?, resource, action, &[id]).await
        },
    }
}

fn client(connection: &ConnectionArgs) -> Result<RestClient> {
    let config = connection.client_config();
    if config.token.is_none() {
        tracing::warn!("no token configured; set DRAG_ADMIN_TOKEN or pass --token");
    }
    Ok(RestClient::new(config)?)
}
