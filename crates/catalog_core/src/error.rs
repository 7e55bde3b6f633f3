use thiserror::Error;

/// Failure of a single catalog request. Every variant is recoverable and
/// scoped to the source that issued the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(String),
    #[error("catalog returned HTTP {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("malformed catalog response: {0}")]
    Decode(String),
    #[error("invalid catalog url: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(value: url::ParseError) -> Self {
        Self::InvalidUrl(value.to_string())
    }
}
