//! One resource list driven end to end: controller, reads, moderation
//! actions and notifications, over any [`ResourceApi`].

use std::{
    future::Future,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::time::timeout;

use crate::{
    api::ResourceApi,
    config::DEFAULT_TIMEOUT,
    controller::{ListController, Tab},
    error::ApiError,
    fetch::{Completion, FetchPhase, ListQuery},
    moderation::{action_allowed, action_supported, ActionKind, ActionTracker, Notification},
    pagination::{PageRequest, PaginationModel},
    query::{PageResult, QueryParams},
    resource::{ModerationStatus, ResourceKind},
};

/// Result of a moderation action request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The backend confirmed the change and the list was re-read.
    Completed,
    /// Another action for the same id is still running; nothing was sent.
    AlreadyInFlight,
    /// The loaded record's state makes the action pointless (approving an
    /// approved record); nothing was sent.
    NotAllowed,
    /// The request failed; the list was left as it was.
    Failed(ApiError),
}

/// Point-in-time copy of a session's state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Active tab.
    pub tab: Tab,
    /// Active filter value.
    pub filter: Option<String>,
    /// Parameters of the current selection.
    pub params: QueryParams,
    /// Read phase.
    pub phase: FetchPhase,
    /// Current page, when one is loaded.
    pub page: Option<PageResult>,
    /// Error of the latest read.
    pub error: Option<ApiError>,
    /// Ids with an action in flight.
    pub busy: Vec<(String, ActionKind)>,
}

#[derive(Debug)]
struct SessionState {
    controller: ListController,
    query: ListQuery,
    actions: ActionTracker,
    notifications: Vec<Notification>,
}

/// A list screen without the screen.
///
/// All methods take `&self`; concurrent calls interleave at network awaits.
/// The internal lock is never held across an `.await`.
#[derive(Debug)]
pub struct ModerationSession<A> {
    api: A,
    kind: ResourceKind,
    timeout: Duration,
    state: Mutex<SessionState>,
}

impl<A: ResourceApi> ModerationSession<A> {
    /// Session over `kind` with its default page size and timeout.
    pub fn new(api: A, kind: ResourceKind) -> Self {
        Self {
            api,
            kind,
            timeout: DEFAULT_TIMEOUT,
            state: Mutex::new(SessionState {
                controller: ListController::new(kind),
                query: ListQuery::new(),
                actions: ActionTracker::new(),
                notifications: Vec::new(),
            }),
        }
    }

    /// Replace the page size; resets the selection.
    pub fn with_page_size(self, page_size: u32) -> Self {
        self.lock().controller = ListController::with_page_size(self.kind, page_size);
        self
    }

    /// Replace the client-side deadline applied to every call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resource this session moderates.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Underlying transport.
    pub fn api(&self) -> &A {
        &self.api
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn with_deadline<T>(
        &self,
        call: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        match timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout(self.timeout)),
        }
    }

    /// Re-read the current selection. The response only lands if no newer
    /// read was started in the meantime.
    pub async fn refresh(&self) -> Completion {
        let ticket = {
            let mut state = self.lock();
            if state.query.is_closed() {
                return Completion::Stale;
            }
            let params = state.controller.params();
            state.query.begin(params)
        };
        let result = self
            .with_deadline(self.api.fetch_page(self.kind, ticket.params()))
            .await;

        let mut state = self.lock();
        let failure = result.as_ref().err().cloned();
        let completion = state.query.complete(&ticket, result);
        if completion == Completion::Applied {
            if let Some(err) = failure {
                tracing::warn!(resource = %self.kind, error = %err, "list read failed");
                state
                    .notifications
                    .push(Notification::fetch_failed(self.kind, &err));
            }
        }
        completion
    }

    /// Adjust tab, filter or page without reading; follow with
    /// [`Self::refresh`].
    pub fn update_selection(&self, update: impl FnOnce(&mut ListController)) {
        update(&mut self.lock().controller);
    }

    /// Go to `page` and read it.
    pub async fn set_page(&self, page: u32) -> Completion {
        self.lock().controller.set_page(page);
        self.refresh().await
    }

    /// Switch tab (page goes back to 1) and read.
    pub async fn set_tab(&self, tab: Tab) -> Completion {
        self.lock().controller.set_tab(tab);
        self.refresh().await
    }

    /// Set the filter (page goes back to 1) and read.
    pub async fn set_filter(&self, value: &str) -> Completion {
        self.lock().controller.set_filter(value);
        self.refresh().await
    }

    /// Drop the filter (page goes back to 1) and read.
    pub async fn clear_filter(&self) -> Completion {
        self.lock().controller.clear_filter();
        self.refresh().await
    }

    /// Apply a pagination click. `None` when the widget would ignore it.
    pub async fn navigate(&self, request: PageRequest) -> Option<Completion> {
        let target = self.pagination().request(request)?;
        Some(self.set_page(target).await)
    }

    /// Widget inputs for the current state.
    pub fn pagination(&self) -> PaginationModel {
        let state = self.lock();
        PaginationModel::new(
            state.controller.page(),
            state.query.total_pages(),
            state.query.item_count(),
            state.query.is_fetching(),
        )
    }

    /// Set status to approved.
    pub async fn approve(&self, id: &str) -> ActionOutcome {
        self.perform(id, ActionKind::Approve).await
    }

    /// Set status to rejected.
    pub async fn reject(&self, id: &str) -> ActionOutcome {
        self.perform(id, ActionKind::Reject).await
    }

    /// Delete the record.
    pub async fn delete(&self, id: &str) -> ActionOutcome {
        self.perform(id, ActionKind::Delete).await
    }

    /// Toggle the featured flag.
    pub async fn set_featured(&self, id: &str, featured: bool) -> ActionOutcome {
        let action = if featured {
            ActionKind::Feature
        } else {
            ActionKind::Unfeature
        };
        self.perform(id, action).await
    }

    /// Run `action` against `id`: at most one in flight per id, confirmed by
    /// the backend before the list is re-read. Nothing is rendered
    /// speculatively.
    pub async fn perform(&self, id: &str, action: ActionKind) -> ActionOutcome {
        let id = id.trim();
        if id.is_empty() {
            return ActionOutcome::Failed(ApiError::EmptyId);
        }
        if !action_supported(self.kind, action) {
            return ActionOutcome::Failed(ApiError::Unsupported {
                kind: self.kind,
                action,
            });
        }

        {
            let mut state = self.lock();
            let loaded = state.query.data().and_then(|page| page.find(id));
            if loaded.is_some_and(|record| !action_allowed(self.kind, record, action)) {
                return ActionOutcome::NotAllowed;
            }
            if !state.actions.begin(id, action) {
                tracing::debug!(id, %action, "action already in flight; ignoring");
                return ActionOutcome::AlreadyInFlight;
            }
        }

        let result = self.with_deadline(self.dispatch(id, action)).await;

        let outcome = {
            let mut state = self.lock();
            state.actions.finish(id);
            match result {
                Ok(()) => {
                    tracing::info!(resource = %self.kind, id, %action, "action confirmed");
                    state
                        .notifications
                        .push(Notification::action_succeeded(self.kind, action));
                    ActionOutcome::Completed
                },
                Err(err) => {
                    tracing::warn!(resource = %self.kind, id, %action, error = %err, "action failed");
                    state
                        .notifications
                        .push(Notification::action_failed(self.kind, action, id, &err));
                    ActionOutcome::Failed(err)
                },
            }
        };

        if outcome == ActionOutcome::Completed {
            self.refresh().await;
        }
        outcome
    }

    async fn dispatch(&self, id: &str, action: ActionKind) -> Result<(), ApiError> {
        match action {
            ActionKind::Approve => {
                self.api
                    .update_status(self.kind, id, ModerationStatus::Approved)
                    .await
            },
            ActionKind::Reject => {
                self.api
                    .update_status(self.kind, id, ModerationStatus::Rejected)
                    .await
            },
            ActionKind::Delete => self.api.delete(self.kind, id).await,
            ActionKind::Feature => self.api.set_featured(self.kind, id, true).await,
            ActionKind::Unfeature => self.api.set_featured(self.kind, id, false).await,
        }
    }

    /// Whether `id` has an action in flight.
    pub fn is_busy(&self, id: &str) -> bool {
        self.lock().actions.is_busy(id)
    }

    /// Drain pending notifications, oldest first.
    pub fn take_notifications(&self) -> Vec<Notification> {
        std::mem::take(&mut self.lock().notifications)
    }

    /// Ignore whatever read is outstanding, as when the view goes away.
    pub fn cancel(&self) {
        self.lock().query.cancel();
    }

    /// Tear the list down: outstanding reads are dropped and no further read
    /// is issued, including the refresh after an action still in flight.
    pub fn close(&self) {
        self.lock().query.close();
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        let mut busy: Vec<(String, ActionKind)> = state
            .actions
            .iter()
            .map(|(id, kind)| (id.to_string(), kind))
            .collect();
        busy.sort_by(|a, b| a.0.cmp(&b.0));
        SessionSnapshot {
            tab: state.controller.tab(),
            filter: state.controller.filter().map(str::to_string),
            params: state.controller.params(),
            phase: state.query.phase(),
            page: state.query.data().cloned(),
            error: state.query.error().cloned(),
            busy,
        }
    }
}
