use chrono::FixedOffset;
use drag_admin_shared::{
    datetime::{format_date, format_date_time},
    PageResult, ResourceKind, ResourceRecord,
};
use serde_json::Value;

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Record id, or `-` when the document has none.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Moderation status.
    pub status: String,
    /// Submission date, or the event date for events.
    pub date: String,
    /// Featured flag, for resources that have one.
    pub featured: Option<bool>,
}

/// Format `record` the way the list screen shows it.
pub fn record_row(kind: ResourceKind, record: &ResourceRecord, offset: FixedOffset) -> Row {
    let when = record.str_field(kind.date_field()).unwrap_or_default();
    let date = if kind == ResourceKind::Event {
        format_date_time(when, offset)
    } else {
        format_date(when, offset)
    };
    Row {
        id: record.id().unwrap_or("-").to_string(),
        name: record.display_name(),
        status: record.status().as_str().to_string(),
        date,
        featured: kind.supports_featuring().then(|| record.is_featured()),
    }
}

/// Aligned plain-text table with a header line.
pub fn render_table(kind: ResourceKind, rows: &[Row]) -> String {
    let date_header = if kind == ResourceKind::Event { "DATE" } else { "SUBMITTED" };
    let mut headers = vec!["ID", "NAME", "STATUS", date_header];
    if kind.supports_featuring() {
        headers.push("FEATURED");
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut line = vec![row.id.clone(), row.name.clone(), row.status.clone(), row.date.clone()];
            if let Some(featured) = row.featured {
                line.push(if featured { "yes" } else { "no" }.to_string());
            }
            line
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_line(&mut output, headers.iter().copied(), &widths);
    for line in &cells {
        push_line(&mut output, line.iter().map(String::as_str), &widths);
    }
    if cells.is_empty() {
        output.push_str("(no rows)\n");
    }
    output
}

fn push_line<'a>(output: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}", width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    output.push_str(line.trim_end());
    output.push('\n');
}

/// Every top-level field of every record, mysql `\G` style.
pub fn render_vertical(records: &[ResourceRecord]) -> String {
    let mut output = String::new();
    for (index, record) in records.iter().enumerate() {
        output.push_str(&format!(
            "*************************** [{}] ***************************\n",
            index + 1
        ));
        match record.as_json() {
            Value::Object(map) => {
                for (key, value) in map {
                    output.push_str(&format!("{key}: {}\n", scalar(value)));
                }
            },
            other => output.push_str(&format!("{}\n", scalar(other))),
        }
        output.push('\n');
    }
    if output.is_empty() {
        output.push_str("(no rows)\n");
    }
    output
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "NULL".to_string(),
        other => other.to_string(),
    }
}

/// `page 2 of 3, 8 rows`.
pub fn page_summary(page: &PageResult) -> String {
    let rows = page.items.len();
    let noun = if rows == 1 { "row" } else { "rows" };
    format!(
        "page {} of {}, {rows} {noun}",
        page.current_page,
        page.total_pages.max(1)
    )
}
