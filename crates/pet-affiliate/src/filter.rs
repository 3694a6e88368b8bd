//! Product selection by disease and pet type.

use pet_core::entities::AffiliateProduct;

/// Row tag that matches every requested pet type.
pub const ALL_PET_TYPES: &str = "all";

/// Select rows for one disease.
///
/// `disease_id` must match exactly. An empty `pet_type` keeps every row for
/// the disease; otherwise a row is kept when its pet type equals the request
/// or is [`ALL_PET_TYPES`]. Feed order is preserved.
#[must_use]
pub fn filter_products(
    products: &[AffiliateProduct],
    disease_id: &str,
    pet_type: &str,
) -> Vec<AffiliateProduct> {
    products
        .iter()
        .filter(|p| p.disease_id == disease_id)
        .filter(|p| {
            pet_type.is_empty()
                || matches!(p.pet_type.as_deref(), Some(t) if t == pet_type || t == ALL_PET_TYPES)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn product(disease_id: &str, name: &str, pet_type: Option<&str>) -> AffiliateProduct {
        AffiliateProduct {
            disease_id: disease_id.into(),
            product_name: Some(name.into()),
            link_shopee: None,
            color: None,
            reason: None,
            pet_type: pet_type.map(Into::into),
        }
    }

    fn feed() -> Vec<AffiliateProduct> {
        vec![
            product("42", "dog paste", Some("dog")),
            product("42", "any paste", Some("all")),
            product("42", "cat paste", Some("cat")),
            product("42", "untagged", None),
            product("43", "other disease", Some("dog")),
        ]
    }

    fn names(products: &[AffiliateProduct]) -> Vec<&str> {
        products
            .iter()
            .filter_map(|p| p.product_name.as_deref())
            .collect()
    }

    #[test]
    fn pet_type_keeps_exact_and_all() {
        let feed = feed();
        assert_eq!(
            names(&filter_products(&feed, "42", "dog")),
            vec!["dog paste", "any paste"]
        );
    }

    #[test]
    fn empty_pet_type_keeps_whole_disease() {
        let feed = feed();
        assert_eq!(
            names(&filter_products(&feed, "42", "")),
            vec!["dog paste", "any paste", "cat paste", "untagged"]
        );
    }

    #[test]
    fn disease_id_is_exact() {
        let feed = feed();
        assert!(filter_products(&feed, "4", "").is_empty());
        assert!(filter_products(&feed, "042", "").is_empty());
        assert_eq!(names(&filter_products(&feed, "43", "dog")), vec!["other disease"]);
    }
}
