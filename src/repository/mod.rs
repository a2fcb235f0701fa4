pub mod envelope;
pub mod http_repository;
pub mod repository_error;
pub mod resource;
