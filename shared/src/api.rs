//! Transport seam between the moderation core and the backend.

use async_trait::async_trait;

use crate::{
    error::ApiError,
    query::{PageResult, QueryParams},
    resource::{ModerationStatus, ResourceKind, ResourceRecord},
};

/// The REST surface the admin client consumes.
///
/// [`crate::rest::RestClient`] talks HTTP; tests substitute in-memory fakes.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// Read one page of `kind`'s collection.
    async fn fetch_page(
        &self,
        kind: ResourceKind,
        params: &QueryParams,
    ) -> Result<PageResult, ApiError>;

    /// Read a single record.
    async fn fetch_one(&self, kind: ResourceKind, id: &str) -> Result<ResourceRecord, ApiError>;

    /// `PATCH {status}`.
    async fn update_status(
        &self,
        kind: ResourceKind,
        id: &str,
        status: ModerationStatus,
    ) -> Result<(), ApiError>;

    /// `PATCH {isFeatured}`.
    async fn set_featured(&self, kind: ResourceKind, id: &str, featured: bool)
        -> Result<(), ApiError>;

    /// `DELETE`.
    async fn delete(&self, kind: ResourceKind, id: &str) -> Result<(), ApiError>;
}
