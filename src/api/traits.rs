use crate::errors::ApiResult;
use crate::models::{Property, PropertyId, PropertySubmission};
use async_trait::async_trait;

/// CRUD contract of the remote property service.
///
/// Implementations do their own wire mapping; everything returned here is
/// already a core record.
#[async_trait]
pub trait PropertyApi: Send + Sync {
    /// Full collection, unfiltered and unsorted
    async fn list(&self) -> ApiResult<Vec<Property>>;

    /// Store a new listing; the service assigns its id
    async fn create(&self, submission: &PropertySubmission) -> ApiResult<Property>;

    /// Replace the listing stored under `id`
    async fn update(&self, id: &PropertyId, submission: &PropertySubmission) -> ApiResult<Property>;

    async fn delete(&self, id: &PropertyId) -> ApiResult<()>;

    /// Where this client talks to, for logs
    fn endpoint(&self) -> &str;
}
