use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A product recommendation row from the affiliate feed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AffiliateProduct {
    pub disease_id: String,
    pub product_name: Option<String>,
    pub link_shopee: Option<String>,
    /// Traffic-light classification (`green` suits the condition, `red` does not).
    pub color: Option<String>,
    pub reason: Option<String>,
    /// Pet type the product applies to, or `all`.
    pub pet_type: Option<String>,
}
