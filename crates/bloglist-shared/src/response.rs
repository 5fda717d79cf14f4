//! Error body returned by every failing endpoint that carries one.

use serde::{Deserialize, Serialize};

/// `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn unknown_endpoint() -> Self {
        Self::new("unknown endpoint")
    }

    pub fn malformatted_id() -> Self {
        Self::new("malformatted id")
    }

    pub fn internal_error() -> Self {
        Self::new("internal server error")
    }
}
