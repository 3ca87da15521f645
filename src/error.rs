//! Error taxonomy for client operations.
//!
//! Every collaborator failure is converted to one of these kinds at the
//! component boundary; nothing propagates past a controller as a panic.

use thiserror::Error;

/// Failure kinds surfaced by client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Bad credentials. User-correctable, shown inline.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Insufficient role. The coordinator redirects away from the
    /// capability instead of displaying partial data.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Malformed form input, rejected locally or by the server. The form
    /// stays open with its current values.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A catalog fetch failed. The previously displayed list is preserved.
    #[error("catalog request failed: {0}")]
    Catalog(String),

    /// Network failure or timeout.
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
