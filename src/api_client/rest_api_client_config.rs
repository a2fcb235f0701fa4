use std::time::Duration;

use crate::http_client::reqwest_http_client::DEFAULT_TIMEOUT;

pub const DEFAULT_CURSOR_PARAM: &str = "cursor";

#[derive(Debug, Clone, PartialEq)]
pub struct RestApiClientConfig {
    pub base_url: String,
    pub cursor_param: String,
    pub timeout: Duration,
}

impl RestApiClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_cursor_param(mut self, cursor_param: &str) -> Self {
        self.cursor_param = cursor_param.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for RestApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            cursor_param: DEFAULT_CURSOR_PARAM.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
