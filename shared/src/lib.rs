//! Core of the drag admin moderation client.
//!
//! Everything here is target independent except the transport layer
//! (`api`, `rest`, `session`), which only builds for native targets. The
//! browser frontend drives [`controller`], [`fetch`], [`moderation`] and
//! [`pagination`] directly from its own hooks.

/// Transport seam implemented by HTTP clients and test fakes.
#[cfg(not(target_arch = "wasm32"))]
pub mod api;
/// Backend location, credentials and deadlines.
pub mod config;
/// Tab, filter and page selection for one list screen.
pub mod controller;
/// Record timestamps rendered in a chosen UTC offset.
pub mod datetime;
/// Error taxonomy.
pub mod error;
/// Request generations and list read state.
pub mod fetch;
/// Moderation actions, per-id in-flight tracking, notifications.
pub mod moderation;
/// Page widget model.
pub mod pagination;
/// Query parameters and page payload decoding.
pub mod query;
/// Resource kinds, statuses and records.
pub mod resource;
/// `reqwest` client for the admin REST API.
#[cfg(not(target_arch = "wasm32"))]
pub mod rest;
/// A list screen driven without a UI.
#[cfg(not(target_arch = "wasm32"))]
pub mod session;

pub use config::ClientConfig;
pub use controller::{ListController, Tab};
pub use error::ApiError;
pub use fetch::{Completion, FetchPhase, ListQuery, ListView, RequestTicket};
pub use moderation::{ActionKind, ActionTracker, Notification, NotificationLevel};
pub use pagination::{PageRequest, PageSlot, PaginationModel};
pub use query::{PageResult, QueryParams};
pub use resource::{ModerationStatus, ResourceKind, ResourceRecord};
