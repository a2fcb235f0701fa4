use bytes::Bytes;

use crate::http_client::request::RequestHeaders;

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: RequestHeaders,
    pub body: Bytes,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
