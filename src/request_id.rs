use http::HeaderName;
use uuid::Uuid;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Fresh correlation id for an outgoing request.
pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}
