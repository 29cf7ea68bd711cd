//! Error types for webcache.
//!
//! Every layer propagates failures unchanged; nothing here is retried or
//! swallowed except the cache write path, which logs and carries on.

use std::string::FromUtf8Error;

use thiserror::Error;

/// Result type alias using `WebCacheError`.
pub type Result<T> = std::result::Result<T, WebCacheError>;

/// Main error type for all webcache operations.
#[derive(Debug, Error)]
pub enum WebCacheError {
    // ═══════════════════════════════════════════════════════════════════════════
    // STORE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The key-value store could not be reached.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store rejected or failed a command.
    #[error("Store error: {0}")]
    StoreError(String),

    /// An increment targeted a value that is not an integer.
    #[error("Value at '{key}' is not an integer")]
    NotAnInteger {
        /// Offending key
        key: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // FETCH ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP transport failure (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Non-success status, only raised when status checking is enabled.
    #[error("HTTP {status} for '{url}'")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// Response status code
        status: u16,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // DECODE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A cached value is not valid UTF-8.
    #[error("Cached value at '{key}' is not valid UTF-8: {source}")]
    Decode {
        /// Key the value was read from
        key: String,
        /// Underlying decode failure
        #[source]
        source: FromUtf8Error,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl WebCacheError {
    /// Returns true if this error came from the key-value store.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            WebCacheError::StoreUnavailable(_)
                | WebCacheError::StoreError(_)
                | WebCacheError::NotAnInteger { .. }
        )
    }

    /// Returns true if this error came from fetching a page.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            WebCacheError::InvalidUrl(_)
                | WebCacheError::HttpError(_)
                | WebCacheError::HttpStatus { .. }
        )
    }
}
