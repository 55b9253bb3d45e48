//! Catalogue of moderatable resource types and the opaque records the
//! backend returns for them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{controller::Tab, error::ApiError};

/// Wire value of [`ModerationStatus::Pending`].
pub const STATUS_PENDING: &str = "pending";
/// Wire value of [`ModerationStatus::Approved`].
pub const STATUS_APPROVED: &str = "approved";
/// Wire value of [`ModerationStatus::Rejected`].
pub const STATUS_REJECTED: &str = "rejected";

/// One of the backend collections staff can moderate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Drag performers' profiles.
    Performer,
    /// Venues hosting shows.
    Venue,
    /// Events submitted by performers or venues.
    Event,
    /// Audience reviews.
    Review,
    /// Uploaded images.
    Media,
}

impl ResourceKind {
    /// Every kind, in side-navigation order.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Performer,
        ResourceKind::Venue,
        ResourceKind::Event,
        ResourceKind::Review,
        ResourceKind::Media,
    ];

    /// Singular, lowercase identifier used in URLs and on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            ResourceKind::Performer => "performer",
            ResourceKind::Venue => "venue",
            ResourceKind::Event => "event",
            ResourceKind::Review => "review",
            ResourceKind::Media => "media",
        }
    }

    /// Human readable plural label.
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Performer => "Performers",
            ResourceKind::Venue => "Venues",
            ResourceKind::Event => "Events",
            ResourceKind::Review => "Reviews",
            ResourceKind::Media => "Media",
        }
    }

    /// Collection endpoint, relative to the API base.
    pub fn list_path(self) -> &'static str {
        match self {
            ResourceKind::Performer => "/api/admin/performer/get-all-performers",
            ResourceKind::Venue => "/api/admin/venue/get-all-venues",
            ResourceKind::Event => "/api/admin/event/get-all-events",
            ResourceKind::Review => "/api/admin/review/get-all-reviews",
            ResourceKind::Media => "/api/admin/media/get-all-images",
        }
    }

    /// PATCH endpoint for status and feature updates.
    pub fn update_path(self, id: &str) -> String {
        let id = urlencoding::encode(id.trim());
        match self {
            ResourceKind::Performer => format!("/api/admin/performer/update-performer/{id}"),
            ResourceKind::Venue => format!("/api/admin/venue/update-venue/{id}"),
            ResourceKind::Event => format!("/api/admin/event/update-event/{id}"),
            ResourceKind::Review => format!("/api/admin/review/update-review/{id}"),
            ResourceKind::Media => format!("/api/admin/media/update-image/{id}"),
        }
    }

    /// DELETE endpoint, when the backend offers one.
    pub fn delete_path(self, id: &str) -> Option<String> {
        let id = urlencoding::encode(id.trim());
        match self {
            ResourceKind::Performer => Some(format!("/api/admin/performer/delete-performer/{id}")),
            ResourceKind::Venue => Some(format!("/api/admin/venue/delete-venue/{id}")),
            ResourceKind::Event => Some(format!("/api/admin/event/delete-event/{id}")),
            ResourceKind::Review | ResourceKind::Media => None,
        }
    }

    /// Single-record endpoint, when the backend offers one.
    pub fn detail_path(self, id: &str) -> Option<String> {
        let id = urlencoding::encode(id.trim());
        match self {
            ResourceKind::Performer => Some(format!("/api/admin/performer/get-single-performer/{id}")),
            ResourceKind::Venue => Some(format!("/api/admin/venue/get-single-venue/{id}")),
            ResourceKind::Event => Some(format!("/api/admin/event/get-single-event/{id}")),
            ResourceKind::Review | ResourceKind::Media => None,
        }
    }

    /// Whether records of this kind can be opened on their own.
    pub fn has_detail(self) -> bool {
        self.detail_path("_").is_some()
    }

    /// Fixed query parameters the collection endpoint always receives.
    pub fn fixed_list_params(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ResourceKind::Venue | ResourceKind::Media => &[("sort", "-1")],
            _ => &[],
        }
    }

    /// Filter field the collection endpoint understands.
    pub fn filter_field(self) -> Option<&'static str> {
        match self {
            ResourceKind::Performer => Some("address"),
            ResourceKind::Event => Some("userType"),
            _ => None,
        }
    }

    /// Accepted filter values when the filter is a fixed choice rather than
    /// free text. Empty for free-text filters.
    pub fn filter_options(self) -> &'static [&'static str] {
        match self {
            ResourceKind::Event => &["performer", "venue", "admin"],
            _ => &[],
        }
    }

    /// Rows per page used by the dashboard.
    pub fn default_page_size(self) -> u32 {
        match self {
            ResourceKind::Performer => 8,
            _ => 10,
        }
    }

    /// Tabs offered above the list.
    pub fn tabs(self) -> &'static [Tab] {
        match self {
            ResourceKind::Media => &[Tab::All],
            ResourceKind::Review => &[Tab::All, Tab::Pending, Tab::Approved, Tab::Rejected],
            _ => &[Tab::All, Tab::Pending, Tab::Rejected],
        }
    }

    /// Whether records carry an `isFeatured` flag staff can toggle.
    pub fn supports_featuring(self) -> bool {
        matches!(self, ResourceKind::Performer)
    }

    /// Record field holding the date shown in the list, if any.
    pub fn date_field(self) -> &'static str {
        match self {
            ResourceKind::Event => "date",
            _ => "createdAt",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let singular = normalized.strip_suffix('s').unwrap_or(&normalized);
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == singular || kind.slug() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown resource `{s}` (expected one of: {})",
                    ResourceKind::ALL.map(ResourceKind::slug).join(", ")
                )
            })
    }
}

/// Moderation state of a record. Absent or unrecognised values are pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Visible on the marketplace.
    Approved,
    /// Hidden by staff.
    Rejected,
}

impl ModerationStatus {
    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ModerationStatus::Pending => STATUS_PENDING,
            ModerationStatus::Approved => STATUS_APPROVED,
            ModerationStatus::Rejected => STATUS_REJECTED,
        }
    }

    /// Lenient parse used for backend documents.
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some(STATUS_APPROVED) => ModerationStatus::Approved,
            Some(STATUS_REJECTED) => ModerationStatus::Rejected,
            _ => ModerationStatus::Pending,
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend document, kept opaque apart from a few well-known fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRecord(Value);

const NAME_FIELDS: &[&str] = &["name", "firstName", "fullName", "title", "venueName", "eventName"];

impl ResourceRecord {
    /// Wrap a raw JSON document.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// `_id` (MongoDB style) or `id`.
    pub fn id(&self) -> Option<&str> {
        self.str_field("_id").or_else(|| self.str_field("id"))
    }

    /// Current moderation state.
    pub fn status(&self) -> ModerationStatus {
        ModerationStatus::from_wire(self.str_field("status"))
    }

    /// Whether the record is promoted on the marketplace front page.
    pub fn is_featured(&self) -> bool {
        self.0
            .get("isFeatured")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Best-effort label for list rows.
    pub fn display_name(&self) -> String {
        let first = NAME_FIELDS
            .iter()
            .find_map(|key| self.str_field(key).filter(|v| !v.trim().is_empty()));
        match (first, self.str_field("lastName")) {
            (Some(first), Some(last)) if self.str_field("firstName") == Some(first) => {
                format!("{} {}", first.trim(), last.trim()).trim().to_string()
            },
            (Some(first), _) => first.trim().to_string(),
            (None, _) => self.id().unwrap_or("(unnamed)").to_string(),
        }
    }

    /// String value of a top-level field.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Raw value of a top-level field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The underlying document.
    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

impl ResourceRecord {
    /// Pull the document out of a single-record response.
    ///
    /// Accepts the bare document or one wrapped under `data` or under the
    /// resource's own name (`{"success": true, "venue": {...}}`). An explicit
    /// `"success": false` is an error.
    pub fn from_detail_payload(kind: ResourceKind, payload: Value) -> Result<Self, ApiError> {
        ApiError::check_success_flag(&payload)?;
        let document = match payload {
            Value::Object(mut map) => {
                let wrapped = [kind.slug(), "data"]
                    .iter()
                    .find(|key| map.get(**key).is_some_and(Value::is_object))
                    .and_then(|key| map.remove(*key));
                wrapped.unwrap_or(Value::Object(map))
            },
            other => other,
        };
        if !document.is_object() {
            return Err(ApiError::Decode(format!("expected a {kind} document")));
        }
        Ok(Self(document))
    }
}

impl From<Value> for ResourceRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn kind_parses_singular_and_plural() {
        assert_eq!("performers".parse::<ResourceKind>(), Ok(ResourceKind::Performer));
        assert_eq!(" Venue ".parse::<ResourceKind>(), Ok(ResourceKind::Venue));
        assert_eq!("media".parse::<ResourceKind>(), Ok(ResourceKind::Media));
        assert!("banner".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn paths_encode_ids() {
        assert_eq!(
            ResourceKind::Venue.update_path("a b/c"),
            "/api/admin/venue/update-venue/a%20b%2Fc"
        );
        assert_eq!(ResourceKind::Review.delete_path("x"), None);
        assert_eq!(
            ResourceKind::Performer.detail_path("65f0").as_deref(),
            Some("/api/admin/performer/get-single-performer/65f0")
        );
        assert_eq!(
            ResourceKind::Event.delete_path(" Montréal 1 ").as_deref(),
            Some("/api/admin/event/delete-event/Montr%C3%A9al%201")
        );
    }

    #[test]
    fn venues_and_events_open_on_their_own() {
        assert_eq!(
            ResourceKind::Venue.detail_path("v1").as_deref(),
            Some("/api/admin/venue/get-single-venue/v1")
        );
        assert_eq!(
            ResourceKind::Event.detail_path("e1").as_deref(),
            Some("/api/admin/event/get-single-event/e1")
        );
        assert!(ResourceKind::Venue.has_detail());
        assert!(!ResourceKind::Review.has_detail());
        assert!(!ResourceKind::Media.has_detail());
    }

    #[test]
    fn events_filter_by_submitter() {
        assert_eq!(ResourceKind::Event.filter_field(), Some("userType"));
        assert_eq!(ResourceKind::Event.filter_options(), ["performer", "venue", "admin"]);
        assert!(ResourceKind::Performer.filter_options().is_empty());
        assert_eq!(ResourceKind::Venue.filter_field(), None);
    }

    #[test]
    fn detail_payload_is_unwrapped() {
        let venue = ResourceRecord::from_detail_payload(
            ResourceKind::Venue,
            json!({"success": true, "venue": {"_id": "v1", "name": "The Stonewall"}}),
        )
        .expect("venue");
        assert_eq!(venue.display_name(), "The Stonewall");

        let event = ResourceRecord::from_detail_payload(
            ResourceKind::Event,
            json!({"data": {"_id": "e1", "title": "Drag Brunch"}}),
        )
        .expect("event");
        assert_eq!(event.id(), Some("e1"));

        let bare = ResourceRecord::from_detail_payload(ResourceKind::Performer, json!({"_id": "p1"}))
            .expect("bare");
        assert_eq!(bare.id(), Some("p1"));

        let missing = ResourceRecord::from_detail_payload(
            ResourceKind::Venue,
            json!({"success": false, "message": "Venue not found"}),
        )
        .unwrap_err();
        assert_eq!(missing.to_string(), "server responded with HTTP 200: Venue not found");
        assert!(matches!(
            ResourceRecord::from_detail_payload(ResourceKind::Event, json!([1, 2])),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn status_defaults_to_pending() {
        assert_eq!(ModerationStatus::from_wire(None), ModerationStatus::Pending);
        assert_eq!(ModerationStatus::from_wire(Some("APPROVED")), ModerationStatus::Approved);
        assert_eq!(ModerationStatus::from_wire(Some("archived")), ModerationStatus::Pending);
    }

    #[test]
    fn record_accessors() {
        let record = ResourceRecord::new(json!({
            "_id": "abc",
            "firstName": "Bianca",
            "lastName": "Del Rio",
            "status": "rejected",
            "isFeatured": true,
        }));
        assert_eq!(record.id(), Some("abc"));
        assert_eq!(record.status(), ModerationStatus::Rejected);
        assert!(record.is_featured());
        assert_eq!(record.display_name(), "Bianca Del Rio");

        let anonymous = ResourceRecord::new(json!({ "id": "r1" }));
        assert_eq!(anonymous.display_name(), "r1");
        assert_eq!(anonymous.status(), ModerationStatus::Pending);
    }
}
