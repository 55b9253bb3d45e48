use anyhow::{anyhow, Result};
use chrono::FixedOffset;
use drag_admin_shared::{
    query::FILTER_ALL, rest::RestClient, session::ModerationSession, ResourceKind, ResourceRecord,
    Tab,
};

use crate::{
    cli::OutputFormat,
    utils::{page_summary, record_row, render_table, render_vertical},
};

/// Selection and presentation for `list`.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// 1-based page.
    pub page: u32,
    /// Rows per page; the resource default when absent.
    pub limit: Option<u32>,
    /// Status tab.
    pub tab: Tab,
    /// Location filter.
    pub filter: Option<String>,
    /// Output format.
    pub format: OutputFormat,
    /// Offset dates are rendered in.
    pub offset: FixedOffset,
}

/// Read one page and print it.
pub async fn run(client: RestClient, kind: ResourceKind, options: ListOptions) -> Result<()> {
    let timeout = client.config().timeout;
    let mut session = ModerationSession::new(client, kind).with_timeout(timeout);
    if let Some(limit) = options.limit {
        session = session.with_page_size(limit);
    }
    if let Some(filter) = options.filter.as_deref() {
        let choices = kind.filter_options();
        if kind.filter_field().is_none() {
            tracing::warn!(resource = %kind, "{} cannot be filtered; ignoring --filter", kind.label());
        } else if !choices.is_empty()
            && filter.trim() != FILTER_ALL
            && !choices.contains(&filter.trim())
        {
            tracing::warn!(
                resource = %kind,
                filter,
                "expected one of {}; sending it anyway",
                choices.join(", ")
            );
        }
    }
    if !kind.tabs().contains(&options.tab) {
        tracing::warn!(resource = %kind, tab = %options.tab, "tab is not offered on the dashboard");
    }
    session.update_selection(|controller| {
        controller.set_tab(options.tab);
        if let Some(filter) = options.filter.as_deref() {
            controller.set_filter(filter);
        }
        controller.set_page(options.page);
    });

    session.refresh().await;
    let snapshot = session.snapshot();
    if let Some(err) = snapshot.error {
        return Err(anyhow!(err).context(format!("failed to list {}", kind.label().to_ascii_lowercase())));
    }
    let page = snapshot
        .page
        .ok_or_else(|| anyhow!("no page was loaded"))?;

    print_records(kind, &page.items, options.format, options.offset)?;
    tracing::info!("{} ({})", page_summary(&page), snapshot.params.to_query_string(kind));
    Ok(())
}

/// Print `records` in `format`.
pub fn print_records(
    kind: ResourceKind,
    records: &[ResourceRecord],
    format: OutputFormat,
    offset: FixedOffset,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<_> = records
                .iter()
                .map(|record| record_row(kind, record, offset))
                .collect();
            tracing::info!("\n{}", render_table(kind, &rows));
        },
        OutputFormat::Vertical => {
            tracing::info!("\n{}", render_vertical(records));
        },
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
        },
    }
    Ok(())
}
