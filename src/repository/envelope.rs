use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Outcome of a repository call: `{"data": ...}` or `{"error": "..."}`,
/// never both and never neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope<T> {
    Data(T),
    Error(String),
}

impl<T> Envelope<T> {
    pub fn is_data(&self) -> bool {
        matches!(self, Envelope::Data(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Envelope::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Envelope::Data(data) => Some(data),
            Envelope::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Envelope::Data(_) => None,
            Envelope::Error(message) => Some(message),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            Envelope::Data(data) => Ok(data),
            Envelope::Error(message) => Err(message),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Envelope<U> {
        match self {
            Envelope::Data(data) => Envelope::Data(f(data)),
            Envelope::Error(message) => Envelope::Error(message),
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for Envelope<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Envelope::Data(data),
            Err(error) => Envelope::Error(error.to_string()),
        }
    }
}
