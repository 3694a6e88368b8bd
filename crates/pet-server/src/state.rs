use std::sync::Arc;

use pet_affiliate::AffiliateClient;
use pet_db::service::PetService;

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PetService>,
    pub affiliate: Arc<AffiliateClient>,
}

impl AppState {
    #[must_use]
    pub fn new(service: PetService, affiliate: AffiliateClient) -> Self {
        Self {
            service: Arc::new(service),
            affiliate: Arc::new(affiliate),
        }
    }
}
