pub mod api_client;
pub mod api_client_error;
pub mod rest_api_client;
pub mod rest_api_client_config;
