use std::collections::BTreeSet;

use anyhow::{bail, Result};
use drag_admin_shared::{
    rest::RestClient,
    session::{ActionOutcome, ModerationSession},
    ActionKind, ResourceKind,
};
use futures::future::join_all;

/// Apply `action` to every id concurrently. Duplicate ids are sent once.
///
/// Fails when any id could not be moderated; the others still go through.
pub async fn run(client: RestClient, kind: ResourceKind, action: ActionKind, ids: &[String]) -> Result<()> {
    let timeout = client.config().timeout;
    let session = ModerationSession::new(client, kind).with_timeout(timeout);

    let unique: BTreeSet<&str> = ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .collect();
    if unique.is_empty() {
        bail!("no record ids given");
    }

    let outcomes = join_all(unique.iter().map(|id| session.perform(id, action))).await;

    let mut failed = 0usize;
    for (id, outcome) in unique.iter().zip(outcomes) {
        match outcome {
            ActionOutcome::Completed => tracing::info!("{kind} {id} {}", action.past_tense()),
            ActionOutcome::NotAllowed => tracing::info!("{kind} {id}: nothing to do"),
            ActionOutcome::AlreadyInFlight => tracing::warn!("{kind} {id}: already being moderated"),
            ActionOutcome::Failed(err) => {
                failed += 1;
                tracing::error!("failed to {action} {kind} {id}: {err}");
            },
        }
    }

    if failed > 0 {
        bail!("{failed} of {} {action} request(s) failed", unique.len());
    }
    Ok(())
}
