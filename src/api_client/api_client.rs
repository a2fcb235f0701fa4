use async_trait::async_trait;
use serde_json::Value;

use crate::{api_client::api_client_error::ApiClientError, repository::resource::ResourceId};

/// The capability set the repository is written against: one call per
/// collection or item operation, each resolving to a JSON document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Fetches the collection at `url`, forwarding `cursor` untouched.
    async fn index(&self, url: String, cursor: Option<String>) -> Result<Value, ApiClientError>;

    /// Fetches a single item. Without an id, `url` already addresses it.
    async fn item(&self, url: String, id: Option<ResourceId>) -> Result<Value, ApiClientError>;

    async fn create(&self, url: String, fields: Value) -> Result<Value, ApiClientError>;

    async fn update(
        &self,
        url: String,
        id: ResourceId,
        fields: Value,
    ) -> Result<Value, ApiClientError>;

    async fn delete(&self, url: String, id: ResourceId) -> Result<Value, ApiClientError>;
}
