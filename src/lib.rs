//! Adapter that maps CRUD-style repository verbs onto an injected HTTP
//! client and reports every outcome as a `{data}` / `{error}` envelope.

pub mod api_client;
pub mod http_client;
pub mod repository;
pub mod request_id;

pub use repository::{
    envelope::Envelope,
    http_repository::HttpRepository,
    repository_error::RepositoryError,
    resource::{Empty, Payload, Query, ResourceId, ResourceRef, Write},
};
