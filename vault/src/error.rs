//! Vault error types.

use thiserror::Error;

/// Vault-specific errors.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body could not be decoded or encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Login was rejected or returned no token
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Server answered 403
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Server answered 404
    #[error("Secret not found at path: {0}")]
    SecretNotFound(String),

    /// Any other status than 200
    #[error("Bad response code {status} from {path}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Request path relative to `/v1/`
        path: String,
        /// Response body, as text
        body: String,
    },

    /// Response decoded but lacks the expected fields
    #[error("Malformed response from {path}: {reason}")]
    MalformedResponse {
        /// Request path relative to `/v1/`
        path: String,
        /// What was missing or ill-typed
        reason: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for Vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

impl VaultError {
    /// Create an authentication failed error.
    #[must_use]
    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::AuthenticationFailed(msg.into())
    }

    /// Create a secret not found error.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::SecretNotFound(path.into())
    }

    /// Create a malformed response error.
    #[must_use]
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
