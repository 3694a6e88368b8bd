//! Affiliate feed configuration.

use serde::{Deserialize, Serialize};

/// Placeholder published-sheet URL used until a real feed is configured.
pub const PLACEHOLDER_SHEET_URL: &str =
    "https://spreadsheets.google.com/feeds/list/YOUR_SHEET_ID/1/public/values?alt=json";

fn default_sheet_url() -> String {
    PLACEHOLDER_SHEET_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AffiliateConfig {
    /// Published spreadsheet feed (JSON or CSV export).
    #[serde(default = "default_sheet_url")]
    pub sheet_url: String,

    /// Timeout for the outbound feed request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long a fetched feed may be reused. `0` fetches on every request.
    #[serde(default)]
    pub cache_ttl_secs: u64,
}

impl Default for AffiliateConfig {
    fn default() -> Self {
        Self {
            sheet_url: default_sheet_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: 0,
        }
    }
}

impl AffiliateConfig {
    /// Whether a real feed URL has been configured.
    pub fn is_configured(&self) -> bool {
        !self.sheet_url.is_empty() && self.sheet_url != PLACEHOLDER_SHEET_URL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_not_configured() {
        let config = AffiliateConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.cache_ttl_secs, 0);
    }
}
