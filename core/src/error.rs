//! Error types for the accounts API client.
//!
//! # Design
//! `BadStatus` covers responses outside an operation's accepted set where
//! the body would otherwise have been decoded. `UnknownStatus` is the bucket
//! for the boolean operations (`exists`, `delete`) that map specific codes to
//! `true`/`false`. A 403 on delete gets its own `Unauthorized` variant.

/// Errors returned by `AccountClient`, `AccountService` and transports.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection-level failure: DNS, refused connection, TLS, timeout.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response status is outside the set accepted by the operation.
    #[error("bad status {status}: {body}")]
    BadStatus { status: u16, body: String },

    /// The response status has no defined meaning for the operation.
    #[error("unknown status {0}")]
    UnknownStatus(u16),

    /// The server refused the delete with 403.
    #[error("unauthorized")]
    Unauthorized,

    /// The response body could not be deserialized into the expected type.
    #[error("decoding response failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("encoding request failed: {0}")]
    Encode(String),

    /// The client configuration is unusable, e.g. an unreadable CA file.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An item operation was called with an empty account id.
    #[error("account id must not be empty")]
    EmptyId,
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadStatus { status, .. } => Some(*status),
            ApiError::UnknownStatus(status) => Some(*status),
            ApiError::Unauthorized => Some(403),
            _ => None,
        }
    }
}
