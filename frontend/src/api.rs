use std::future::Future;

use drag_admin_shared::{
    ActionKind, ApiError, ModerationStatus, PageResult, QueryParams, ResourceKind, ResourceRecord,
};
use futures::future::{select, Either};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde_json::{json, Value};

use crate::config::{client_config, REQUEST_TIMEOUT};

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match client_config().authorization() {
        Some(value) => builder.header("Authorization", &value),
        None => builder,
    }
}

/// Race `call` against the request deadline. gloo-net has no timeout of its
/// own, so the fetch is simply abandoned when the timer wins.
async fn with_deadline<T>(
    call: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    let millis = u32::try_from(REQUEST_TIMEOUT.as_millis()).unwrap_or(u32::MAX);
    match select(Box::pin(call), Box::pin(TimeoutFuture::new(millis))).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ApiError::Timeout(REQUEST_TIMEOUT)),
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status_body(status, &body))
}

async fn read_json(response: Response) -> Result<Value, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn fetch_resource_page(
    kind: ResourceKind,
    params: &QueryParams,
) -> Result<PageResult, ApiError> {
    let url = format!(
        "{}?{}",
        client_config().endpoint(kind.list_path()),
        params.to_query_string(kind)
    );
    with_deadline(async {
        let response = authorized(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let payload = read_json(check_status(response).await?).await?;
        PageResult::from_payload(payload, params.page(), params.page_size())
    })
    .await
}

/// Single record for the detail page.
pub async fn fetch_resource_detail(kind: ResourceKind, id: &str) -> Result<ResourceRecord, ApiError> {
    let path = kind.detail_path(id).ok_or(ApiError::NoDetailEndpoint(kind))?;
    let url = client_config().endpoint(&path);
    with_deadline(async {
        let response = authorized(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let payload = read_json(check_status(response).await?).await?;
        ResourceRecord::from_detail_payload(kind, payload)
    })
    .await
}

async fn patch_resource(kind: ResourceKind, id: &str, body: Value) -> Result<(), ApiError> {
    let url = client_config().endpoint(&kind.update_path(id));
    with_deadline(async {
        let response = authorized(Request::patch(&url))
            .json(&body)
            .map_err(|e| ApiError::Transport(format!("Serialize error: {e}")))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let payload = read_json(check_status(response).await?)
            .await
            .unwrap_or(Value::Null);
        ApiError::check_success_flag(&payload)
    })
    .await
}

pub async fn update_resource_status(
    kind: ResourceKind,
    id: &str,
    status: ModerationStatus,
) -> Result<(), ApiError> {
    patch_resource(kind, id, json!({ "status": status.as_str() })).await
}

pub async fn set_resource_featured(
    kind: ResourceKind,
    id: &str,
    featured: bool,
) -> Result<(), ApiError> {
    patch_resource(kind, id, json!({ "isFeatured": featured })).await
}

pub async fn delete_resource(kind: ResourceKind, id: &str) -> Result<(), ApiError> {
    let path = kind.delete_path(id).ok_or(ApiError::Unsupported {
        kind,
        action: ActionKind::Delete,
    })?;
    let url = client_config().endpoint(&path);
    with_deadline(async {
        let response = authorized(Request::delete(&url))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let payload = read_json(check_status(response).await?)
            .await
            .unwrap_or(Value::Null);
        ApiError::check_success_flag(&payload)
    })
    .await
}

/// Send the request behind one moderation button.
pub async fn run_action(kind: ResourceKind, id: &str, action: ActionKind) -> Result<(), ApiError> {
    match action {
        ActionKind::Approve => update_resource_status(kind, id, ModerationStatus::Approved).await,
        ActionKind::Reject => update_resource_status(kind, id, ModerationStatus::Rejected).await,
        ActionKind::Delete => delete_resource(kind, id).await,
        ActionKind::Feature => set_resource_featured(kind, id, true).await,
        ActionKind::Unfeature => set_resource_featured(kind, id, false).await,
    }
}
