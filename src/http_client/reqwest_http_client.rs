use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    http_client::{
        error::{Error, HttpClientErrorChecker},
        http_client::HttpClient,
        request::{Request, RequestHeaders},
        response::Response,
    },
    request_id::{X_REQUEST_ID, new_request_id},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::from)?;

        Ok(Self { client })
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to build reqwest client"),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, mut request: Request) -> Result<Response, Error> {
        if !request.headers.contains(X_REQUEST_ID.as_str()) {
            request
                .headers
                .insert(X_REQUEST_ID.to_string(), new_request_id());
        }

        debug!(
            method = %request.method,
            url = %request.url,
            request_id = ?request.headers.get(X_REQUEST_ID.as_str()),
            "Sending request"
        );

        let reqwest_response = self
            .client
            .request(request.method.into(), request.url)
            .headers(request.headers.into())
            .body(request.body)
            .send()
            .await
            .map_err(Error::from)?;

        let status = reqwest_response.status().as_u16();

        let headers: RequestHeaders = reqwest_response.headers().into();

        let body = reqwest_response
            .bytes()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        debug!("Received {} with {} bytes", status, body.len());

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

impl HttpClientErrorChecker for reqwest::Error {
    fn is_timeout(&self) -> bool {
        self.is_timeout()
    }

    fn is_connect(&self) -> bool {
        self.is_connect()
    }

    fn is_request(&self) -> bool {
        self.is_request()
    }

    fn error_string(&self) -> String {
        self.to_string()
    }
}

