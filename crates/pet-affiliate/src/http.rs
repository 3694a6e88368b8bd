//! Shared HTTP response helpers for the feed client.

use crate::error::AffiliateError;

/// Return the response unchanged on success, or [`AffiliateError::Api`]
/// carrying the status code and body.
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, AffiliateError> {
    if !resp.status().is_success() {
        return Err(AffiliateError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
