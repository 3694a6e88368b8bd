//! Affiliate feed error types.

use thiserror::Error;

/// Errors that can occur while fetching or reading the affiliate feed.
#[derive(Debug, Error)]
pub enum AffiliateError {
    /// HTTP transport error (connect failure, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed host returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the feed host.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Feed body could not be parsed as sheet JSON or CSV.
    #[error("parse error: {0}")]
    Parse(String),
}
