use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::{Map, Value};
use tracing::warn;

use crate::{
    api_client::{
        api_client::ApiClient, api_client_error::ApiClientError,
        rest_api_client_config::RestApiClientConfig,
    },
    http_client::{
        http_client::HttpClient,
        reqwest_http_client::ReqwestHttpClient,
        request::{ACCEPT, APPLICATION_JSON, Request, RequestMethod},
        response::Response,
    },
    repository::resource::ResourceId,
};

/// [`ApiClient`] speaking plain JSON over REST conventions: collections at
/// `url`, items at `url/id`.
#[derive(Clone)]
pub struct RestApiClient {
    http_client: Arc<dyn HttpClient>,
    config: RestApiClientConfig,
}

impl RestApiClient {
    pub fn new(http_client: Arc<dyn HttpClient>, config: RestApiClientConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Builds the client on top of a reqwest transport honouring the
    /// configured timeout.
    pub fn from_config(config: RestApiClientConfig) -> Result<Self, ApiClientError> {
        let http_client = ReqwestHttpClient::with_timeout(config.timeout)?;
        Ok(Self::new(Arc::new(http_client), config))
    }

    pub fn config(&self) -> &RestApiClientConfig {
        &self.config
    }

    fn resolve(&self, url: &str) -> Result<Url, ApiClientError> {
        let raw = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.config.base_url, url)
        } else {
            format!("{}/{}", self.config.base_url, url)
        };

        Url::parse(&raw).map_err(|e| ApiClientError::InvalidUrl(format!("{raw}: {e}")))
    }

    fn resolve_item(&self, url: &str, id: &ResourceId) -> Result<Url, ApiClientError> {
        let mut resolved = self.resolve(url)?;
        resolved
            .path_segments_mut()
            .map_err(|_| ApiClientError::InvalidUrl(format!("{url} cannot address an item")))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(resolved)
    }

    async fn send(&self, request: Request) -> Result<Value, ApiClientError> {
        let method = request.method.clone();
        let url = request.url.clone();

        let response = self
            .http_client
            .execute(request.with_header(ACCEPT, APPLICATION_JSON))
            .await?;

        if !response.is_success() {
            warn!("{} {} answered with status {}", method, url, response.status);
        }

        decode(response)
    }
}

fn encode(fields: &Value) -> Result<Vec<u8>, ApiClientError> {
    serde_json::to_vec(fields).map_err(|e| ApiClientError::Encode(e.to_string()))
}

fn decode(response: Response) -> Result<Value, ApiClientError> {
    if !response.is_success() {
        return Err(ApiClientError::Status {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        });
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(&response.body).map_err(|e| ApiClientError::Decode(e.to_string()))
}

#[async_trait]
impl ApiClient for RestApiClient {
    async fn index(&self, url: String, cursor: Option<String>) -> Result<Value, ApiClientError> {
        let mut resolved = self.resolve(&url)?;
        if let Some(cursor) = cursor {
            resolved
                .query_pairs_mut()
                .append_pair(&self.config.cursor_param, &cursor);
        }

        self.send(Request::new(RequestMethod::Get, resolved)).await
    }

    async fn item(&self, url: String, id: Option<ResourceId>) -> Result<Value, ApiClientError> {
        let resolved = match id {
            Some(id) => self.resolve_item(&url, &id)?,
            None => self.resolve(&url)?,
        };

        self.send(Request::new(RequestMethod::Get, resolved)).await
    }

    async fn create(&self, url: String, fields: Value) -> Result<Value, ApiClientError> {
        let resolved = self.resolve(&url)?;
        let body = encode(&fields)?;

        self.send(Request::new(RequestMethod::Post, resolved).with_json_body(body))
            .await
    }

    async fn update(
        &self,
        url: String,
        id: ResourceId,
        fields: Value,
    ) -> Result<Value, ApiClientError> {
        let resolved = self.resolve_item(&url, &id)?;
        let body = encode(&fields)?;

        self.send(Request::new(RequestMethod::Put, resolved).with_json_body(body))
            .await
    }

    async fn delete(&self, url: String, id: ResourceId) -> Result<Value, ApiClientError> {
        let resolved = self.resolve_item(&url, &id)?;

        self.send(Request::new(RequestMethod::Delete, resolved)).await
    }
}
