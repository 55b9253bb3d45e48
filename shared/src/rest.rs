//! HTTP implementation of [`ResourceApi`].

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::{json, Value};

use crate::{
    api::ResourceApi,
    config::ClientConfig,
    error::ApiError,
    moderation::ActionKind,
    query::{PageResult, QueryParams},
    resource::{ModerationStatus, ResourceKind, ResourceRecord},
};

/// [`ResourceApi`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    config: ClientConfig,
}

impl RestClient {
    /// Build a client; the configured timeout applies to every request.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("drag-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            config,
        })
    }

    /// Settings this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        let builder = self.http.request(method, url);
        match self.config.token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| self.map_reqwest(e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "backend rejected request");
        Err(ApiError::from_status_body(status.as_u16(), &body))
    }

    async fn read_json(&self, response: Response) -> Result<Value, ApiError> {
        let bytes = response.bytes().await.map_err(|e| self.map_reqwest(e))?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn map_reqwest(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.config.timeout)
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }

    async fn patch(&self, kind: ResourceKind, id: &str, body: Value) -> Result<(), ApiError> {
        let path = kind.update_path(id);
        let response = self.send(self.request(Method::PATCH, &path).json(&body)).await?;
        let payload = self.read_json(response).await.unwrap_or(Value::Null);
        ApiError::check_success_flag(&payload)
    }
}

#[async_trait]
impl ResourceApi for RestClient {
    async fn fetch_page(
        &self,
        kind: ResourceKind,
        params: &QueryParams,
    ) -> Result<PageResult, ApiError> {
        let builder = self
            .request(Method::GET, kind.list_path())
            .query(&params.to_query_pairs(kind));
        let response = self.send(builder).await?;
        let payload = self.read_json(response).await?;
        let page = PageResult::from_payload(payload, params.page(), params.page_size())?;
        tracing::debug!(
            resource = %kind,
            page = page.current_page,
            total_pages = page.total_pages,
            items = page.items.len(),
            "fetched page"
        );
        Ok(page)
    }

    async fn fetch_one(&self, kind: ResourceKind, id: &str) -> Result<ResourceRecord, ApiError> {
        let path = kind.detail_path(id).ok_or(ApiError::NoDetailEndpoint(kind))?;
        let response = self.send(self.request(Method::GET, &path)).await?;
        let payload = self.read_json(response).await?;
        ResourceRecord::from_detail_payload(kind, payload)
    }

    async fn update_status(
        &self,
        kind: ResourceKind,
        id: &str,
        status: ModerationStatus,
    ) -> Result<(), ApiError> {
        self.patch(kind, id, json!({ "status": status.as_str() })).await
    }

    async fn set_featured(
        &self,
        kind: ResourceKind,
        id: &str,
        featured: bool,
    ) -> Result<(), ApiError> {
        if !kind.supports_featuring() {
            return Err(ApiError::Unsupported {
                kind,
                action: if featured {
                    ActionKind::Feature
                } else {
                    ActionKind::Unfeature
                },
            });
        }
        self.patch(kind, id, json!({ "isFeatured": featured })).await
    }

    async fn delete(&self, kind: ResourceKind, id: &str) -> Result<(), ApiError> {
        let path = kind.delete_path(id).ok_or(ApiError::Unsupported {
            kind,
            action: ActionKind::Delete,
        })?;
        let response = self.send(self.request(Method::DELETE, &path)).await?;
        // mutation bodies are informational; only an explicit failure flag counts
        let payload = self.read_json(response).await.unwrap_or(Value::Null);
        ApiError::check_success_flag(&payload)
    }
}
