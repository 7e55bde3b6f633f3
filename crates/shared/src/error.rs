use serde::{Deserialize, Serialize};

/// Error body returned by the catalog service on non-success responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }

    pub fn message(&self) -> &str {
        self.detail.as_deref().unwrap_or("no detail provided")
    }
}
