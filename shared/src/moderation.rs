//! Per-item moderation actions: which ones are allowed, which ones are in
//! flight, and the notifications they raise.

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::resource::{ModerationStatus, ResourceKind, ResourceRecord};

/// A mutating action staff can take on one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Set status to approved.
    Approve,
    /// Set status to rejected.
    Reject,
    /// Remove the record.
    Delete,
    /// Set `isFeatured` to true.
    Feature,
    /// Set `isFeatured` to false.
    Unfeature,
}

impl ActionKind {
    /// Status the action writes, for status transitions.
    pub fn target_status(self) -> Option<ModerationStatus> {
        match self {
            ActionKind::Approve => Some(ModerationStatus::Approved),
            ActionKind::Reject => Some(ModerationStatus::Rejected),
            _ => None,
        }
    }

    /// Imperative verb.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Approve => "approve",
            ActionKind::Reject => "reject",
            ActionKind::Delete => "delete",
            ActionKind::Feature => "feature",
            ActionKind::Unfeature => "unfeature",
        }
    }

    /// Past participle, for notifications.
    pub fn past_tense(self) -> &'static str {
        match self {
            ActionKind::Approve => "approved",
            ActionKind::Reject => "rejected",
            ActionKind::Delete => "deleted",
            ActionKind::Feature => "featured",
            ActionKind::Unfeature => "unfeatured",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `action` makes sense for `record` right now.
///
/// Approve is disabled on approved records and reject on rejected ones.
/// Rejection is not terminal: a rejected record can still be approved.
pub fn action_allowed(kind: ResourceKind, record: &ResourceRecord, action: ActionKind) -> bool {
    match action {
        ActionKind::Approve => record.status() != ModerationStatus::Approved,
        ActionKind::Reject => record.status() != ModerationStatus::Rejected,
        ActionKind::Delete => kind.delete_path("").is_some(),
        ActionKind::Feature => kind.supports_featuring() && !record.is_featured(),
        ActionKind::Unfeature => kind.supports_featuring() && record.is_featured(),
    }
}

/// Whether the backend has an endpoint for `action` on `kind` at all.
pub fn action_supported(kind: ResourceKind, action: ActionKind) -> bool {
    match action {
        ActionKind::Approve | ActionKind::Reject => true,
        ActionKind::Delete => kind.delete_path("").is_some(),
        ActionKind::Feature | ActionKind::Unfeature => kind.supports_featuring(),
    }
}

/// In-flight actions keyed by item id. At most one per id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTracker {
    in_flight: HashMap<String, ActionKind>,
}

impl ActionTracker {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `id` for `action`. Returns `false`, and records nothing, when the
    /// id is blank or already has an action in flight.
    pub fn begin(&mut self, id: &str, action: ActionKind) -> bool {
        if id.trim().is_empty() || self.in_flight.contains_key(id) {
            return false;
        }
        self.in_flight.insert(id.to_string(), action);
        true
    }

    /// Release `id`, returning the action that was in flight.
    pub fn finish(&mut self, id: &str) -> Option<ActionKind> {
        self.in_flight.remove(id)
    }

    /// Action in flight for `id`.
    pub fn busy_kind(&self, id: &str) -> Option<ActionKind> {
        self.in_flight.get(id).copied()
    }

    /// Whether `id` has any action in flight.
    pub fn is_busy(&self, id: &str) -> bool {
        self.in_flight.contains_key(id)
    }

    /// Whether `id` has exactly `action` in flight; drives per-button spinners.
    pub fn is_busy_with(&self, id: &str, action: ActionKind) -> bool {
        self.busy_kind(id) == Some(action)
    }

    /// Every in-flight `(id, action)` pair, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ActionKind)> + '_ {
        self.in_flight.iter().map(|(id, kind)| (id.as_str(), *kind))
    }

    /// Number of ids with an action in flight.
    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    /// True when nothing is in flight.
    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }
}

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    /// Action confirmed by the backend.
    Success,
    /// Fetch or action failed.
    Error,
}

/// Transient message raised by a fetch or an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Text shown to staff.
    pub message: String,
}

impl Notification {
    /// Confirmation of a completed action.
    pub fn action_succeeded(kind: ResourceKind, action: ActionKind) -> Self {
        let noun = kind.slug();
        let mut message = format!("{noun} {} successfully", action.past_tense());
        if let Some(first) = message.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        Self {
            level: NotificationLevel::Success,
            message,
        }
    }

    /// Report of a failed action.
    pub fn action_failed(
        kind: ResourceKind,
        action: ActionKind,
        id: &str,
        err: &impl fmt::Display,
    ) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: format!("Failed to {action} {} {id}: {err}", kind.slug()),
        }
    }

    /// Report of a failed list read.
    pub fn fetch_failed(kind: ResourceKind, err: &impl fmt::Display) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: format!("Failed to load {}: {err}", kind.label().to_ascii_lowercase()),
        }
    }

    /// Whether this reports a failure.
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn second_begin_for_same_id_is_refused() {
        let mut tracker = ActionTracker::new();
        assert!(tracker.begin("abc", ActionKind::Approve));
        assert!(!tracker.begin("abc", ActionKind::Approve));
        assert!(!tracker.begin("abc", ActionKind::Delete));
        assert!(tracker.is_busy_with("abc", ActionKind::Approve));
        assert!(!tracker.is_busy_with("abc", ActionKind::Delete));
        assert_eq!(tracker.finish("abc"), Some(ActionKind::Approve));
        assert!(tracker.begin("abc", ActionKind::Delete));
    }

    #[test]
    fn different_ids_do_not_contend() {
        let mut tracker = ActionTracker::new();
        assert!(tracker.begin("a", ActionKind::Approve));
        assert!(tracker.begin("b", ActionKind::Approve));
        assert_eq!(tracker.len(), 2);
        tracker.finish("a");
        assert!(!tracker.is_busy("a"));
        assert!(tracker.is_busy("b"));
    }

    #[test]
    fn blank_id_is_refused() {
        let mut tracker = ActionTracker::new();
        assert!(!tracker.begin("  ", ActionKind::Reject));
        assert!(tracker.is_empty());
    }

    #[test]
    fn allowed_actions_follow_status() {
        let approved = ResourceRecord::new(json!({"_id": "1", "status": "approved"}));
        let rejected = ResourceRecord::new(json!({"_id": "2", "status": "rejected"}));
        let pending = ResourceRecord::new(json!({"_id": "3"}));

        assert!(!action_allowed(ResourceKind::Venue, &approved, ActionKind::Approve));
        assert!(action_allowed(ResourceKind::Venue, &approved, ActionKind::Reject));
        assert!(action_allowed(ResourceKind::Venue, &rejected, ActionKind::Approve));
        assert!(!action_allowed(ResourceKind::Venue, &rejected, ActionKind::Reject));
        assert!(action_allowed(ResourceKind::Venue, &pending, ActionKind::Delete));
        assert!(!action_allowed(ResourceKind::Review, &pending, ActionKind::Delete));
    }

    #[test]
    fn featuring_is_performer_only() {
        let record = ResourceRecord::new(json!({"_id": "p", "isFeatured": false}));
        assert!(action_allowed(ResourceKind::Performer, &record, ActionKind::Feature));
        assert!(!action_allowed(ResourceKind::Performer, &record, ActionKind::Unfeature));
        assert!(!action_allowed(ResourceKind::Event, &record, ActionKind::Feature));
        assert!(!action_supported(ResourceKind::Media, ActionKind::Delete));
    }

    #[test]
    fn notification_text() {
        let ok = Notification::action_succeeded(ResourceKind::Event, ActionKind::Approve);
        assert_eq!(ok.message, "Event approved successfully");
        assert!(!ok.is_error());

        let failed = Notification::action_failed(
            ResourceKind::Venue,
            ActionKind::Delete,
            "xyz",
            &"network error: boom",
        );
        assert_eq!(failed.message, "Failed to delete venue xyz: network error: boom");
        assert!(failed.is_error());
    }
}
