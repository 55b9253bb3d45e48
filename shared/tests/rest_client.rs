//! Tests for the REST client against a mock backend.

use std::time::Duration;

use drag_admin_shared::{
    api::ResourceApi, rest::RestClient, ActionKind, ApiError, ClientConfig, ListController,
    ModerationStatus, QueryParams, ResourceKind,
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn client(server: &MockServer) -> RestClient {
    let config = ClientConfig::new(server.uri()).with_token(Some("secret-token".to_string()));
    RestClient::new(config).expect("client builds")
}

#[tokio::test]
async fn fetch_page_sends_paging_filter_and_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/performer/get-all-performers"))
        .and(query_param("limit", "8"))
        .and(query_param("page", "2"))
        .and(query_param("address", "Austin"))
        .and(query_param("status", "pending"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "docs": [
                    {"_id": "p9", "firstName": "Ada", "lastName": "Glitter", "status": "pending"}
                ],
                "totalPages": 3,
                "page": 2
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = QueryParams::new(2, 8)
        .with_filter("address", "Austin")
        .with_status(Some(ModerationStatus::Pending));
    let page = client(&server)
        .fetch_page(ResourceKind::Performer, &params)
        .await
        .expect("page");

    assert_eq!(page.total_pages, 3);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].display_name(), "Ada Glitter");
}

#[tokio::test]
async fn venue_listing_carries_fixed_sort() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/venue/get-all-venues"))
        .and(query_param("sort", "-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [],
            "totalPages": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .fetch_page(ResourceKind::Venue, &QueryParams::new(1, 10))
        .await
        .expect("page");

    assert!(page.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn status_update_patches_status_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/event/update-event/e42"))
        .and(body_json(json!({"status": "approved"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .update_status(ResourceKind::Event, "e42", ModerationStatus::Approved)
        .await
        .expect("approved");
}

#[tokio::test]
async fn feature_toggle_patches_flag() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/performer/update-performer/p1"))
        .and(body_json(json!({"isFeatured": true})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    api.set_featured(ResourceKind::Performer, "p1", true)
        .await
        .expect("featured");

    let err = api
        .set_featured(ResourceKind::Venue, "v1", true)
        .await
        .expect_err("venues cannot be featured");
    assert_eq!(
        err,
        ApiError::Unsupported {
            kind: ResourceKind::Venue,
            action: ActionKind::Feature,
        }
    );
}

#[tokio::test]
async fn delete_reports_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/venue/delete-venue/v1"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"success": false, "message": "Venue not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .delete(ResourceKind::Venue, "v1")
        .await
        .expect_err("missing venue");

    assert_eq!(
        err,
        ApiError::Status {
            status: 404,
            message: "Venue not found".to_string(),
        }
    );
}

#[tokio::test]
async fn success_false_with_ok_status_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/review/update-review/r1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Review locked"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .update_status(ResourceKind::Review, "r1", ModerationStatus::Rejected)
        .await
        .expect_err("flagged failure");

    assert_eq!(
        err,
        ApiError::Status {
            status: 200,
            message: "Review locked".to_string(),
        }
    );
}

#[tokio::test]
async fn undecodable_listing_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/review/get-all-reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_page(ResourceKind::Review, &QueryParams::new(1, 10))
        .await
        .expect_err("html is not a page");

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn performer_detail_unwraps_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/performer/get-single-performer/p7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"_id": "p7", "firstName": "Mona", "status": "approved"}
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let record = api
        .fetch_one(ResourceKind::Performer, "p7")
        .await
        .expect("detail");
    assert_eq!(record.id(), Some("p7"));
    assert_eq!(record.status(), ModerationStatus::Approved);

    let err = api
        .fetch_one(ResourceKind::Media, "m1")
        .await
        .expect_err("no detail endpoint");
    assert_eq!(err, ApiError::NoDetailEndpoint(ResourceKind::Media));
}

#[tokio::test]
async fn venue_detail_unwraps_named_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/venue/get-single-venue/v9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "venue": {"_id": "v9", "name": "Oasis", "status": "pending", "venueType": "bar"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/venue/get-single-venue/gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Venue not found"
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let venue = api.fetch_one(ResourceKind::Venue, "v9").await.expect("venue");
    assert_eq!(venue.display_name(), "Oasis");
    assert_eq!(venue.str_field("venueType"), Some("bar"));

    let err = api
        .fetch_one(ResourceKind::Venue, "gone")
        .await
        .expect_err("flagged failure");
    assert_eq!(
        err,
        ApiError::Status {
            status: 200,
            message: "Venue not found".to_string(),
        }
    );
}

#[tokio::test]
async fn event_list_filters_by_submitter_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/event/get-all-events"))
        .and(query_param("userType", "venue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [{"_id": "e1", "title": "Bingo Night", "userType": "venue"}],
            "totalPages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = ListController::new(ResourceKind::Event);
    controller.set_filter("venue");
    let page = client(&server)
        .fetch_page(ResourceKind::Event, &controller.params())
        .await
        .expect("events");

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].str_field("userType"), Some("venue"));
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/media/get-all-images"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"docs": []}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri()).with_timeout(Duration::from_millis(50));
    let err = RestClient::new(config)
        .expect("client builds")
        .fetch_page(ResourceKind::Media, &QueryParams::new(1, 10))
        .await
        .expect_err("deadline");

    assert_eq!(err, ApiError::Timeout(Duration::from_millis(50)));
}
