//! Short-lived in-process copy of the parsed feed.
//!
//! Disabled when the TTL is zero: every lookup misses and nothing is stored.

use std::sync::Arc;
use std::time::{Duration, Instant};

use pet_core::entities::AffiliateProduct;
use tokio::sync::RwLock;

pub struct FeedCache {
    ttl: Duration,
    slot: RwLock<Option<(Instant, Arc<Vec<AffiliateProduct>>)>>,
}

impl FeedCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// The cached feed, if one was stored less than one TTL ago.
    pub async fn get(&self) -> Option<Arc<Vec<AffiliateProduct>>> {
        if !self.is_enabled() {
            return None;
        }
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|(fetched_at, _)| fetched_at.elapsed() < self.ttl)
            .map(|(_, products)| Arc::clone(products))
    }

    pub async fn put(&self, products: Arc<Vec<AffiliateProduct>>) {
        if self.is_enabled() {
            *self.slot.write().await = Some((Instant::now(), products));
        }
    }
}
