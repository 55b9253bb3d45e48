//! Page / tab / filter state for one resource list.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    query::QueryParams,
    resource::{ModerationStatus, ResourceKind},
};

/// Coarse status view selected above a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Every record regardless of status.
    #[default]
    All,
    /// Records awaiting review.
    Pending,
    /// Approved records.
    Approved,
    /// Rejected records.
    Rejected,
}

impl Tab {
    /// Status the backend is asked to filter by.
    pub fn status(self) -> Option<ModerationStatus> {
        match self {
            Tab::All => None,
            Tab::Pending => Some(ModerationStatus::Pending),
            Tab::Approved => Some(ModerationStatus::Approved),
            Tab::Rejected => Some(ModerationStatus::Rejected),
        }
    }

    /// Identifier used in URLs and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::Pending => "pending",
            Tab::Approved => "approved",
            Tab::Rejected => "rejected",
        }
    }

    /// Label shown on the tab button.
    pub fn label(self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Pending => "Pending",
            Tab::Approved => "Approved",
            Tab::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Tab::All),
            "pending" => Ok(Tab::Pending),
            "approved" => Ok(Tab::Approved),
            "rejected" => Ok(Tab::Rejected),
            other => Err(format!("unknown tab `{other}` (expected all, pending, approved or rejected)")),
        }
    }
}

/// Owns the user-visible list selection and derives [`QueryParams`] from it.
///
/// Every transition mutates all affected fields in one call, so a filter or
/// tab change is never observable together with the previous page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListController {
    kind: ResourceKind,
    tab: Tab,
    filter: Option<String>,
    page: u32,
    page_size: u32,
}

impl ListController {
    /// Defaults: tab "all", no filter, page 1, the resource's page size.
    pub fn new(kind: ResourceKind) -> Self {
        Self::with_page_size(kind, kind.default_page_size())
    }

    /// Same as [`ListController::new`] with an explicit page size.
    pub fn with_page_size(kind: ResourceKind, page_size: u32) -> Self {
        Self {
            kind,
            tab: Tab::All,
            filter: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Switch tab and go back to page 1.
    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.page = 1;
    }

    /// Set the free-form filter and go back to page 1. Blank clears it.
    pub fn set_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        self.filter = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.page = 1;
    }

    /// Remove the filter and go back to page 1.
    pub fn clear_filter(&mut self) {
        self.filter = None;
        self.page = 1;
    }

    /// Jump to `page` (floored at 1). Tab and filter are untouched.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Back to the defaults used on mount.
    pub fn reset(&mut self) {
        *self = Self::with_page_size(self.kind, self.page_size);
    }

    /// Resource this list shows.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Active tab.
    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Active filter value.
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Current 1-based page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Rows per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Parameters for the next read.
    ///
    /// Resources without a backend filter field send nothing for the filter.
    pub fn params(&self) -> QueryParams {
        let mut params =
            QueryParams::new(self.page, self.page_size).with_status(self.tab.status());
        if let (Some(field), Some(value)) = (self.kind.filter_field(), self.filter.as_deref()) {
            params = params.with_filter(field, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_resource() {
        let controller = ListController::new(ResourceKind::Performer);
        assert_eq!(controller.page(), 1);
        assert_eq!(controller.page_size(), 8);
        assert_eq!(controller.tab(), Tab::All);
        assert_eq!(controller.filter(), None);
    }

    #[test]
    fn tab_change_resets_page() {
        let mut controller = ListController::new(ResourceKind::Performer);
        controller.set_page(2);
        controller.set_tab(Tab::Rejected);
        assert_eq!(controller.page(), 1);
        assert_eq!(controller.tab(), Tab::Rejected);
        assert_eq!(controller.params().status(), Some(ModerationStatus::Rejected));
    }

    #[test]
    fn reselecting_the_same_tab_still_resets_page() {
        let mut controller = ListController::new(ResourceKind::Venue);
        controller.set_page(5);
        controller.set_tab(Tab::All);
        assert_eq!(controller.page(), 1);
    }

    #[test]
    fn filter_change_resets_page_and_trims() {
        let mut controller = ListController::new(ResourceKind::Performer);
        controller.set_page(3);
        controller.set_filter("  Austin ");
        assert_eq!(controller.page(), 1);
        assert_eq!(controller.filter(), Some("Austin"));
        assert_eq!(
            controller.params().filters().get("address").map(String::as_str),
            Some("Austin")
        );

        controller.set_page(2);
        controller.set_filter("   ");
        assert_eq!(controller.filter(), None);
        assert_eq!(controller.page(), 1);
    }

    #[test]
    fn page_change_keeps_selection() {
        let mut controller = ListController::new(ResourceKind::Performer);
        controller.set_tab(Tab::Pending);
        controller.set_filter("Austin");
        controller.set_page(0);
        assert_eq!(controller.page(), 1);
        controller.set_page(4);
        assert_eq!(controller.page(), 4);
        assert_eq!(controller.tab(), Tab::Pending);
        assert_eq!(controller.filter(), Some("Austin"));
    }

    #[test]
    fn filter_is_dropped_for_resources_without_a_filter_field() {
        let mut controller = ListController::new(ResourceKind::Review);
        controller.set_filter("anything");
        assert!(controller.params().filters().is_empty());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut controller = ListController::with_page_size(ResourceKind::Event, 25);
        controller.set_tab(Tab::Rejected);
        controller.set_filter("x");
        controller.set_page(7);
        controller.reset();
        assert_eq!(controller, ListController::with_page_size(ResourceKind::Event, 25));
    }

    #[test]
    fn tab_parses() {
        assert_eq!("Rejected".parse::<Tab>(), Ok(Tab::Rejected));
        assert!("archived".parse::<Tab>().is_err());
    }
}
