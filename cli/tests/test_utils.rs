//! Tests for the CLI table and summary formatting helpers.

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;
    use da_cli::utils::{page_summary, record_row, render_table, render_vertical, Row};
    use drag_admin_shared::{PageResult, ResourceKind, ResourceRecord};
    use serde_json::json;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).expect("utc")
    }

    #[test]
    fn performer_row_includes_name_and_featured_flag() {
        let record = ResourceRecord::new(json!({
            "_id": "p1",
            "firstName": "Lady",
            "lastName": "Sparkle",
            "status": "approved",
            "isFeatured": true,
            "createdAt": "2025-03-08T21:30:00.000Z"
        }));

        let row = record_row(ResourceKind::Performer, &record, utc());

        assert_eq!(
            row,
            Row {
                id: "p1".to_string(),
                name: "Lady Sparkle".to_string(),
                status: "approved".to_string(),
                date: "Sat, Mar 8, 2025".to_string(),
                featured: Some(true),
            }
        );
    }

    #[test]
    fn event_row_shows_local_time() {
        let record = ResourceRecord::new(json!({
            "_id": "e1",
            "name": "Drag Brunch",
            "date": "2025-03-09T02:30:00.000Z"
        }));
        let pacific = FixedOffset::west_opt(8 * 3600).expect("offset");

        let row = record_row(ResourceKind::Event, &record, pacific);

        assert_eq!(row.date, "Sat, Mar 8, 2025 6:30 PM");
        assert_eq!(row.status, "pending");
        assert_eq!(row.featured, None);
    }

    #[test]
    fn missing_dates_render_placeholder() {
        let record = ResourceRecord::new(json!({"_id": "v1", "name": "The Stonewall"}));
        let row = record_row(ResourceKind::Venue, &record, utc());
        assert_eq!(row.date, "N/A");
    }

    #[test]
    fn table_columns_are_aligned() {
        let rows = vec![
            Row {
                id: "v1".to_string(),
                name: "Short".to_string(),
                status: "pending".to_string(),
                date: "N/A".to_string(),
                featured: None,
            },
            Row {
                id: "v22".to_string(),
                name: "A much longer venue".to_string(),
                status: "approved".to_string(),
                date: "Sat, Mar 8, 2025".to_string(),
                featured: None,
            },
        ];

        let table = render_table(ResourceKind::Venue, &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID   NAME"));
        assert!(lines[0].contains("SUBMITTED"));
        let status_column = lines[0].find("STATUS").expect("status header");
        assert_eq!(lines[1].find("pending"), Some(status_column));
        assert_eq!(lines[2].find("approved"), Some(status_column));
    }

    #[test]
    fn empty_table_says_so() {
        let table = render_table(ResourceKind::Performer, &[]);
        assert!(table.contains("FEATURED"));
        assert!(table.ends_with("(no rows)\n"));
    }

    #[test]
    fn vertical_lists_every_field() {
        let records = vec![ResourceRecord::new(json!({"_id": "r1", "rating": 4, "comment": null}))];
        let output = render_vertical(&records);
        assert!(output.contains("[1]"));
        assert!(output.contains("_id: r1\n"));
        assert!(output.contains("rating: 4\n"));
        assert!(output.contains("comment: NULL\n"));
    }

    #[test]
    fn summary_counts_rows() {
        let page = PageResult {
            items: vec![ResourceRecord::new(json!({"_id": "x"}))],
            total_pages: 3,
            current_page: 2,
        };
        assert_eq!(page_summary(&page), "page 2 of 3, 1 row");
    }
}
