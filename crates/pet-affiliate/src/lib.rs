//! # pet-affiliate
//!
//! Client for the affiliate product feed.
//!
//! The feed is a published spreadsheet fetched over HTTP on demand (or from
//! a short-TTL cache when one is configured), parsed into
//! [`AffiliateProduct`] rows, and filtered by disease and pet type. Nothing
//! is persisted.

mod cache;
mod error;
pub mod feed;
pub mod filter;
mod http;

pub use error::AffiliateError;

use std::sync::Arc;
use std::time::Duration;

use pet_config::AffiliateConfig;
use pet_core::entities::AffiliateProduct;

use crate::cache::FeedCache;

/// HTTP client for the affiliate spreadsheet feed.
pub struct AffiliateClient {
    http: reqwest::Client,
    sheet_url: String,
    cache: FeedCache,
}

impl AffiliateClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AffiliateError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &AffiliateConfig) -> Result<Self, AffiliateError> {
        if !config.is_configured() {
            tracing::warn!("affiliate.sheet_url is the placeholder; product lookups will fail");
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("petfamily/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            sheet_url: config.sheet_url.clone(),
            cache: FeedCache::new(Duration::from_secs(config.cache_ttl_secs)),
        })
    }

    /// The feed URL this client reads.
    #[must_use]
    pub fn sheet_url(&self) -> &str {
        &self.sheet_url
    }

    /// Fetch and parse the whole feed, honouring the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AffiliateError`] if the request fails, the host answers
    /// with a non-success status, or the body cannot be parsed.
    pub async fn fetch_feed(&self) -> Result<Arc<Vec<AffiliateProduct>>, AffiliateError> {
        if let Some(products) = self.cache.get().await {
            tracing::debug!(rows = products.len(), "affiliate feed served from cache");
            return Ok(products);
        }

        let resp = self.http.get(&self.sheet_url).send().await?;
        let resp = http::check_response(resp).await?;
        let body = resp.text().await?;
        let products = Arc::new(feed::parse_feed(&body)?);
        tracing::debug!(rows = products.len(), "affiliate feed fetched");

        self.cache.put(Arc::clone(&products)).await;
        Ok(products)
    }

    /// Products recommended for a disease, optionally narrowed by pet type.
    ///
    /// See [`filter::filter_products`] for the matching rules.
    ///
    /// # Errors
    ///
    /// Returns [`AffiliateError`] if the feed cannot be fetched or parsed.
    pub async fn get_products(
        &self,
        disease_id: &str,
        pet_type: &str,
    ) -> Result<Vec<AffiliateProduct>, AffiliateError> {
        let feed = self.fetch_feed().await?;
        let products = filter::filter_products(&feed, disease_id, pet_type);
        tracing::info!(disease_id, pet_type, matched = products.len(), "affiliate products");
        Ok(products)
    }
}
