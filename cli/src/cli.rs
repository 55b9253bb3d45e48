use std::time::Duration;

use chrono::FixedOffset;
use clap::{Args, Parser, Subcommand, ValueEnum};
use drag_admin_shared::{
    config::DEFAULT_API_BASE, datetime::parse_utc_offset, ClientConfig, ResourceKind, Tab,
};

/// How records are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One aligned row per record.
    Table,
    /// Every field of every record, one per line.
    Vertical,
    /// Raw JSON documents.
    Json,
}

/// Top-level arguments.
#[derive(Parser)]
#[command(name = "da-cli", version, about = "Drag admin moderation CLI")]
pub struct Cli {
    /// Where the admin API lives and how to authenticate.
    #[command(flatten)]
    pub connection: ConnectionArgs,
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings, also read from the environment.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Admin API base URL.
    #[arg(long, env = "DRAG_ADMIN_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: String,
    /// Bearer token sent with every request.
    #[arg(long, env = "DRAG_ADMIN_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long, env = "DRAG_ADMIN_TIMEOUT_SECS", default_value_t = 20, global = true)]
    pub timeout_secs: u64,
}

impl ConnectionArgs {
    /// Client settings for these arguments.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_base.as_str())
            .with_token(self.token.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// List one page of a resource.
    List {
        /// performer, venue, event, review or media.
        resource: ResourceKind,
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Rows per page (defaults to the dashboard's page size).
        #[arg(long)]
        limit: Option<u32>,
        /// Status tab: all, pending, approved or rejected.
        #[arg(long, default_value = "all")]
        tab: Tab,
        /// Filter: a location for performers, or the submitter type
        /// (performer, venue or admin) for events.
        #[arg(long)]
        filter: Option<String>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// UTC offset dates are shown in, e.g. `+05:30` or `UTC`.
        #[arg(long, default_value = "UTC", value_parser = parse_offset)]
        utc_offset: FixedOffset,
    },
    /// Print a single record.
    Show {
        /// Resource type: performer, venue or event.
        resource: ResourceKind,
        /// Record id.
        id: String,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Vertical)]
        format: OutputFormat,
    },
    /// Approve one or more records.
    Approve {
        /// Resource type.
        resource: ResourceKind,
        /// Record ids.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Reject one or more records.
    Reject {
        /// Resource type.
        resource: ResourceKind,
        /// Record ids.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Delete one or more records.
    Delete {
        /// Resource type.
        resource: ResourceKind,
        /// Record ids.
        #[arg(required = true)]
        ids: Vec<String>,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Feature a performer on the marketplace front page.
    Feature {
        /// Resource type (performer).
        resource: ResourceKind,
        /// Record id.
        id: String,
        /// Remove the flag instead of setting it.
        #[arg(long)]
        off: bool,
    },
}

fn parse_offset(raw: &str) -> Result<FixedOffset, String> {
    parse_utc_offset(raw).map_err(|err| format!("{err:#}"))
}
