//! Query parameters sent to a collection endpoint and the normalised page
//! that comes back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::ApiError,
    resource::{ModerationStatus, ResourceKind, ResourceRecord},
};

/// Keys different backends use for the array of records.
const ITEM_KEYS: &[&str] = &["docs", "data", "items", "results"];

/// Filter value meaning "no narrowing"; never sent to the backend.
pub const FILTER_ALL: &str = "all";

/// Everything needed to issue one collection read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryParams {
    page: u32,
    page_size: u32,
    filters: BTreeMap<String, String>,
    status: Option<ModerationStatus>,
}

impl QueryParams {
    /// `page` and `page_size` are floored at 1.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            filters: BTreeMap::new(),
            status: None,
        }
    }

    /// Add a filter field. Blank values are ignored.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.filters.insert(field.into(), value);
        }
        self
    }

    /// Restrict to one moderation status.
    pub fn with_status(mut self, status: Option<ModerationStatus>) -> Self {
        self.status = status;
        self
    }

    /// 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Rows requested per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Free-form filters, by field name.
    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Status restriction, if a status tab is active.
    pub fn status(&self) -> Option<ModerationStatus> {
        self.status
    }

    /// Query-string pairs for `kind`'s collection endpoint, in the order the
    /// backend logs them: `limit`, `page`, fixed parameters, filters, status.
    pub fn to_query_pairs(&self, kind: ResourceKind) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("limit".to_string(), self.page_size.to_string()),
            ("page".to_string(), self.page.to_string()),
        ];
        pairs.extend(
            kind.fixed_list_params()
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string())),
        );
        for (field, value) in &self.filters {
            if value.trim().is_empty() || value == FILTER_ALL {
                continue;
            }
            pairs.push((field.clone(), value.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        pairs
    }

    /// `to_query_pairs` rendered as a percent-encoded query string.
    pub fn to_query_string(&self, kind: ResourceKind) -> String {
        self.to_query_pairs(kind)
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// One page of records as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// Records on this page, at most `page_size` of them.
    pub items: Vec<ResourceRecord>,
    /// Total pages for the current filter, as reported by the server.
    pub total_pages: u32,
    /// Page the server says it returned.
    pub current_page: u32,
}

impl PageResult {
    /// Normalise a collection payload.
    ///
    /// Accepts `{docs|data|items|results: [...]}`, the same wrapped once more
    /// in `data`, or a bare array. `totalPages`/`total_pages` default to 0
    /// and `page` defaults to `requested_page`.
    pub fn from_payload(
        payload: Value,
        requested_page: u32,
        page_size: u32,
    ) -> Result<Self, ApiError> {
        let (items, meta) = match payload {
            Value::Array(items) => (items, Value::Null),
            Value::Object(mut map) => {
                let nested = map
                    .get("data")
                    .filter(|value| value.is_object())
                    .cloned();
                if let Some(Value::Object(mut inner)) = nested {
                    let items = take_items(&mut inner).ok_or_else(|| {
                        ApiError::Decode("`data` object has no record array".to_string())
                    })?;
                    (items, Value::Object(inner))
                } else {
                    let items = take_items(&mut map).ok_or_else(|| {
                        ApiError::Decode(format!(
                            "expected one of {} in collection payload",
                            ITEM_KEYS.join("/")
                        ))
                    })?;
                    (items, Value::Object(map))
                }
            },
            other => {
                return Err(ApiError::Decode(format!(
                    "expected object or array, got {}",
                    json_kind(&other)
                )))
            },
        };

        let total_pages = read_u32(&meta, &["totalPages", "total_pages"]).unwrap_or(0);
        let current_page = read_u32(&meta, &["page", "currentPage"])
            .filter(|page| *page > 0)
            .unwrap_or(requested_page.max(1));

        let limit = page_size.max(1) as usize;
        let mut items: Vec<ResourceRecord> = items.into_iter().map(ResourceRecord::new).collect();
        if items.len() > limit {
            tracing::warn!(
                returned = items.len(),
                limit,
                "backend returned more records than requested; truncating"
            );
            items.truncate(limit);
        }

        Ok(Self {
            items,
            total_pages,
            current_page,
        })
    }

    /// True when the page holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Record with the given id, if it is on this page.
    pub fn find(&self, id: &str) -> Option<&ResourceRecord> {
        self.items.iter().find(|record| record.id() == Some(id))
    }
}

fn take_items(map: &mut serde_json::Map<String, Value>) -> Option<Vec<Value>> {
    ITEM_KEYS.iter().find_map(|key| match map.remove(*key) {
        Some(Value::Array(items)) => Some(items),
        Some(Value::Null) => Some(Vec::new()),
        Some(other) => {
            map.insert((*key).to_string(), other);
            None
        },
        None => None,
    })
}

fn read_u32(meta: &Value, keys: &[&str]) -> Option<u32> {
    keys.iter().find_map(|key| {
        let value = meta.get(*key)?;
        value
            .as_u64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
            .map(|n| n.min(u64::from(u32::MAX)) as u32)
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
