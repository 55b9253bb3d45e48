use anyhow::{Context, Result};
use chrono::{FixedOffset, Offset, Utc};
use drag_admin_shared::{api::ResourceApi, rest::RestClient, ResourceKind};

use crate::{cli::OutputFormat, commands::list::print_records};

/// Fetch one record by id and print it.
pub async fn run(client: &RestClient, kind: ResourceKind, id: &str, format: OutputFormat) -> Result<()> {
    let record = client
        .fetch_one(kind, id)
        .await
        .with_context(|| format!("failed to load {kind} {id}"))?;
    let utc: FixedOffset = Utc.fix();
    print_records(kind, std::slice::from_ref(&record), format, utc)
}
