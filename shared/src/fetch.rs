//! Request bookkeeping for a list read: phase, last good page, last error,
//! and the generation counter that keeps stale responses out.

use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    query::{PageResult, QueryParams},
};

/// Lifecycle of a list read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FetchPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// First read in flight, nothing to show.
    Loading,
    /// A page is loaded and current.
    Ready,
    /// A newer read is in flight; the loaded page stays on screen.
    Refetching,
    /// The latest read failed.
    Failed,
}

/// Handle for one issued read. Only the ticket from the most recent
/// [`ListQuery::begin`] can land its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    params: QueryParams,
}

impl RequestTicket {
    /// Parameters the read was issued with.
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Monotonic generation of this read.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`ListQuery::complete`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result became the current state.
    Applied,
    /// A newer read (or a cancel) superseded this one; the result was dropped.
    Stale,
}

/// What the list area should show right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListView<'a> {
    /// Nothing requested yet.
    Idle,
    /// Spinner, no data.
    Loading,
    /// Loaded, but the page has no records. Not an error.
    Empty,
    /// Records to render. `refreshing` is set while a newer read runs.
    Page {
        /// Current page.
        page: &'a PageResult,
        /// Whether a newer read is in flight.
        refreshing: bool,
    },
    /// The latest read failed.
    Failed(&'a ApiError),
}

/// State of the read side of a list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    generation: u64,
    phase: FetchPhase,
    data: Option<PageResult>,
    error: Option<ApiError>,
    closed: bool,
}

impl ListQuery {
    /// Fresh, idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a read for `params`, superseding any outstanding one.
    pub fn begin(&mut self, params: QueryParams) -> RequestTicket {
        self.generation += 1;
        self.phase = if self.data.is_some() {
            FetchPhase::Refetching
        } else {
            FetchPhase::Loading
        };
        tracing::debug!(generation = self.generation, page = params.page(), "list read started");
        RequestTicket {
            generation: self.generation,
            params,
        }
    }

    /// Land the result of a read if it is still the latest one.
    ///
    /// A failure clears the loaded page so an old page is never presented as
    /// the answer to the new parameters.
    pub fn complete(
        &mut self,
        ticket: &RequestTicket,
        result: Result<PageResult, ApiError>,
    ) -> Completion {
        if self.closed || ticket.generation != self.generation {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.generation,
                "dropping stale list response"
            );
            return Completion::Stale;
        }
        match result {
            Ok(page) => {
                self.data = Some(page);
                self.error = None;
                self.phase = FetchPhase::Ready;
            },
            Err(err) => {
                self.data = None;
                self.error = Some(err);
                self.phase = FetchPhase::Failed;
            },
        }
        Completion::Applied
    }

    /// Invalidate any outstanding read, e.g. when the view unmounts.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.phase = match self.phase {
            FetchPhase::Loading => FetchPhase::Idle,
            FetchPhase::Refetching => FetchPhase::Ready,
            other => other,
        };
    }

    /// Cancel for good: the view is gone and nothing may read for it again.
    pub fn close(&mut self) {
        self.cancel();
        self.closed = true;
    }

    /// Whether [`Self::close`] was called. Callers check this before issuing
    /// a read.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Current phase.
    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// First read in flight.
    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    /// Any read in flight.
    pub fn is_fetching(&self) -> bool {
        matches!(self.phase, FetchPhase::Loading | FetchPhase::Refetching)
    }

    /// Last applied page.
    pub fn data(&self) -> Option<&PageResult> {
        self.data.as_ref()
    }

    /// Error of the latest read, when it failed.
    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Total pages of the loaded page, 0 when nothing is loaded.
    pub fn total_pages(&self) -> u32 {
        self.data.as_ref().map_or(0, |page| page.total_pages)
    }

    /// Records on the loaded page, 0 when nothing is loaded.
    pub fn item_count(&self) -> usize {
        self.data.as_ref().map_or(0, |page| page.items.len())
    }

    /// Rendering decision for the list area.
    pub fn view(&self) -> ListView<'_> {
        match (self.phase, self.data.as_ref(), self.error.as_ref()) {
            (FetchPhase::Failed, _, Some(err)) => ListView::Failed(err),
            (FetchPhase::Idle, None, _) => ListView::Idle,
            (_, None, _) => ListView::Loading,
            (phase, Some(page), _) if page.is_empty() && phase != FetchPhase::Refetching => {
                ListView::Empty
            },
            (phase, Some(page), _) => ListView::Page {
                page,
                refreshing: phase == FetchPhase::Refetching,
            },
        }
    }
}
