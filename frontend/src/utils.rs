use chrono::FixedOffset;
use drag_admin_shared::{datetime::offset_from_minutes_west, ModerationStatus};
use serde_json::Value;
use yew::prelude::*;

/// The browser's current UTC offset.
pub fn browser_offset() -> FixedOffset {
    let minutes_west = js_sys::Date::new_0().get_timezone_offset();
    offset_from_minutes_west(minutes_west.round() as i32)
}

pub fn status_badge_class(status: ModerationStatus) -> Classes {
    let base = classes!(
        "inline-flex",
        "items-center",
        "rounded-full",
        "px-2",
        "py-0.5",
        "text-xs",
        "font-semibold",
        "uppercase",
        "tracking-[0.06em]"
    );
    match status {
        ModerationStatus::Pending => {
            classes!(base, "bg-amber-500/15", "text-amber-700", "dark:text-amber-200")
        },
        ModerationStatus::Approved => {
            classes!(base, "bg-emerald-500/15", "text-emerald-700", "dark:text-emerald-200")
        },
        ModerationStatus::Rejected => {
            classes!(base, "bg-slate-500/15", "text-slate-700", "dark:text-slate-200")
        },
    }
}

/// Plain-text rendering of a document field. Lists of strings are joined,
/// nested documents are summarised.
pub fn field_text(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::String(text) if text.trim().is_empty() => "N/A".to_string(),
        Value::String(text) => text.clone(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Array(items) => format!("{} entries", items.len()),
        Value::Object(_) => "(details)".to_string(),
        Value::Number(number) => number.to_string(),
    }
}
