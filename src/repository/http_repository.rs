use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    api_client::{api_client::ApiClient, api_client_error::ApiClientError},
    repository::{
        envelope::Envelope,
        repository_error::RepositoryError,
        resource::{Empty, Payload, Query, ResourceRef, Write},
    },
};

const MISSING_ID: &str = "the payload does not carry an id";

/// Maps the four repository verbs onto an [`ApiClient`].
///
/// Every call resolves to an [`Envelope`]; client failures are folded into
/// its `Error` side and never returned as `Err` or panics. The repository
/// keeps no state between calls, so clones share the client and nothing else.
#[derive(Clone)]
pub struct HttpRepository {
    client: Arc<dyn ApiClient>,
}

impl HttpRepository {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches the collection at `query.url`, passing the cursor through.
    pub async fn query<T: DeserializeOwned>(&self, query: Query) -> Envelope<Vec<T>> {
        debug!(url = %query.url, cursor = ?query.cursor, "Querying collection");

        let result = self
            .client
            .index(query.url.clone(), query.cursor)
            .await
            .and_then(decode)
            .map_err(|e| RepositoryError::Query(e.to_string()));

        settle("query", &query.url, result)
    }

    pub async fn read_resource<T: DeserializeOwned>(&self, reference: ResourceRef) -> Envelope<T> {
        debug!(url = %reference.url, id = ?reference.id, "Reading resource");

        let result = self
            .client
            .item(reference.url.clone(), reference.id)
            .await
            .and_then(decode)
            .map_err(|e| RepositoryError::Read(e.to_string()));

        settle("read", &reference.url, result)
    }

    /// Creates or updates depending on whether `payload.data` carries an id.
    pub async fn write_resource<T, R>(&self, payload: Payload<T>) -> Envelope<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = payload.url.clone();

        match payload.classify() {
            Ok(write) => self.write(write).await,
            Err(e) => settle(
                "write",
                &url,
                Err(RepositoryError::Write(
                    ApiClientError::Encode(e.to_string()).to_string(),
                )),
            ),
        }
    }

    pub async fn write<T, R>(&self, write: Write<T>) -> Envelope<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = write.url().to_string();

        let result = match write {
            Write::Create { url, fields } => {
                debug!(url = %url, "Creating resource");
                match encode(&fields) {
                    Ok(fields) => self.client.create(url, fields).await,
                    Err(e) => Err(e),
                }
            }
            Write::Update { url, id, fields } => {
                debug!(url = %url, id = %id, "Updating resource");
                match encode(&fields) {
                    Ok(fields) => self.client.update(url, id, fields).await,
                    Err(e) => Err(e),
                }
            }
        }
        .and_then(decode)
        .map_err(|e| RepositoryError::Write(e.to_string()));

        settle("write", &url, result)
    }

    /// Deletes the resource identified by `payload.data`'s id.
    pub async fn destroy_resource<T: Serialize>(&self, payload: Payload<T>) -> Envelope<Empty> {
        let id = match payload.id() {
            Ok(Some(id)) => id,
            Ok(None) => {
                return settle(
                    "destroy",
                    &payload.url,
                    Err(RepositoryError::Destroy(MISSING_ID.to_string())),
                );
            }
            Err(e) => {
                return settle(
                    "destroy",
                    &payload.url,
                    Err(RepositoryError::Destroy(
                        ApiClientError::Encode(e.to_string()).to_string(),
                    )),
                );
            }
        };

        debug!(url = %payload.url, id = %id, "Destroying resource");

        let result = self
            .client
            .delete(payload.url.clone(), id)
            .await
            .map(|_| Empty {})
            .map_err(|e| RepositoryError::Destroy(e.to_string()));

        settle("destroy", &payload.url, result)
    }
}

fn encode<T: Serialize>(fields: &T) -> Result<Value, ApiClientError> {
    serde_json::to_value(fields).map_err(|e| ApiClientError::Encode(e.to_string()))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiClientError> {
    serde_json::from_value(value).map_err(|e| ApiClientError::Decode(e.to_string()))
}

fn settle<T>(verb: &str, url: &str, result: Result<T, RepositoryError>) -> Envelope<T> {
    if let Err(error) = &result {
        warn!(verb = verb, url = url, "{}", error);
    }
    Envelope::from(result)
}
