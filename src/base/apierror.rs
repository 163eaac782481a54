use thiserror::Error;

/// Failures raised while decoding a platform response.
///
/// Every variant is surfaced synchronously to the caller except where an
/// accessor documents otherwise (`ApiResponse::error` swallows parse errors).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    // Classification errors
    #[error("Response is not text")]
    NotTextual,
    #[error("Response is not JSON")]
    NotJson,
    #[error("Response is not multipart")]
    NotMultipart,

    // Multipart errors
    #[error("No response body")]
    NoBody,
    #[error("Cannot find boundary")]
    MissingBoundary,
    #[error("No parts in body")]
    NoParts,
    #[error("Envelope has no status for part {index} ({available} status entries)")]
    EnvelopeStatusMismatch { index: usize, available: usize },
    #[error("Envelope status entry {index} is not a valid status code")]
    InvalidEnvelope { index: usize },

    // Body errors
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("Response body already consumed")]
    BodyAlreadyConsumed,
    #[error("Response body read failed: {0}")]
    BodyRead(String),
    #[error("Invalid UTF-8 in response body")]
    InvalidUtf8,
}

impl ApiError {
    /// Whether the error comes from the multipart split rather than from
    /// classification or body reading.
    pub fn is_multipart_error(&self) -> bool {
        matches!(
            self,
            ApiError::NoBody
                | ApiError::MissingBoundary
                | ApiError::NoParts
                | ApiError::EnvelopeStatusMismatch { .. }
                | ApiError::InvalidEnvelope { .. }
        )
    }

    /// Create a body read error from any transport error.
    pub fn body_read<E: std::fmt::Display>(err: E) -> Self {
        ApiError::BodyRead(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::JsonParse(err.to_string())
    }
}
