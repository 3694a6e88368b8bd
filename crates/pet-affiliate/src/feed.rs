//! Feed body parsing.
//!
//! Two layouts are accepted:
//! - the published-spreadsheet JSON feed, `feed.entry[].gsx$<column>.$t`
//! - a CSV export with a header row
//!
//! A leading UTF-8 byte order mark is dropped. The body is then read as
//! JSON when its first non-blank byte is `{`. Column
//! names are compared after lowercasing and dropping `_`, `-` and spaces, so
//! `disease_id`, `Disease ID` and `gsx$diseaseid` all address the same
//! column. Empty cells become `None`.

use pet_core::entities::AffiliateProduct;
use serde_json::Value;

use crate::error::AffiliateError;

/// Parse a feed body into product rows, in feed order.
///
/// # Errors
///
/// Returns [`AffiliateError::Parse`] if the body is neither a sheet JSON
/// feed nor readable CSV.
pub fn parse_feed(body: &str) -> Result<Vec<AffiliateProduct>, AffiliateError> {
    let body = body.strip_prefix('\u{feff}').unwrap_or(body);
    if body.trim_start().starts_with('{') {
        parse_sheet_json(body)
    } else {
        parse_csv(body)
    }
}

/// Lowercase a column name and strip separators.
fn normalize_column(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Default)]
struct RowBuilder {
    disease_id: Option<String>,
    product_name: Option<String>,
    link_shopee: Option<String>,
    color: Option<String>,
    reason: Option<String>,
    pet_type: Option<String>,
}

impl RowBuilder {
    fn set(&mut self, column: &str, value: &str) {
        let value = value.trim();
        let cell = (!value.is_empty()).then(|| value.to_string());
        match normalize_column(column).as_str() {
            "diseaseid" => self.disease_id = cell,
            "productname" => self.product_name = cell,
            "linkshopee" => self.link_shopee = cell,
            "color" => self.color = cell,
            "reason" => self.reason = cell,
            "pettype" => self.pet_type = cell,
            _ => {}
        }
    }

    fn build(self) -> AffiliateProduct {
        AffiliateProduct {
            disease_id: self.disease_id.unwrap_or_default(),
            product_name: self.product_name,
            link_shopee: self.link_shopee,
            color: self.color,
            reason: self.reason,
            pet_type: self.pet_type,
        }
    }
}

fn parse_sheet_json(body: &str) -> Result<Vec<AffiliateProduct>, AffiliateError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AffiliateError::Parse(format!("sheet JSON: {e}")))?;
    let feed = value
        .get("feed")
        .ok_or_else(|| AffiliateError::Parse("sheet JSON has no `feed` object".into()))?;
    let Some(entries) = feed.get("entry") else {
        return Ok(Vec::new());
    };
    let entries = entries
        .as_array()
        .ok_or_else(|| AffiliateError::Parse("`feed.entry` is not an array".into()))?;

    let mut products = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(cells) = entry.as_object() else {
            continue;
        };
        let mut row = RowBuilder::default();
        for (key, cell) in cells {
            let Some(column) = key.strip_prefix("gsx$") else {
                continue;
            };
            let text = match cell.get("$t") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => String::new(),
            };
            row.set(column, &text);
        }
        products.push(row.build());
    }
    Ok(products)
}

fn parse_csv(body: &str) -> Result<Vec<AffiliateProduct>, AffiliateError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| AffiliateError::Parse(format!("CSV header: {e}")))?
        .clone();

    let mut products = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AffiliateError::Parse(format!("CSV row: {e}")))?;
        let mut row = RowBuilder::default();
        for (column, value) in headers.iter().zip(record.iter()) {
            row.set(column, value);
        }
        products.push(row.build());
    }
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("disease_id", "diseaseid")]
    #[case("Disease ID", "diseaseid")]
    #[case("pet-type", "pettype")]
    #[case("LINK_SHOPEE", "linkshopee")]
    fn column_names_normalize(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_column(raw), expected);
    }

    #[test]
    fn sheet_json_layout() {
        let body = r#"{"feed": {"entry": [
            {"gsx$diseaseid": {"$t": "42"}, "gsx$productname": {"$t": "Probiotic paste"},
             "gsx$linkshopee": {"$t": ""}, "gsx$color": {"$t": "green"},
             "gsx$pettype": {"$t": "dog"}, "title": {"$t": "ignored"}},
            {"gsx$diseaseid": {"$t": 7}, "gsx$reason": {"$t": "too salty"}}
        ]}}"#;
        let products = parse_feed(body).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].disease_id, "42");
        assert_eq!(products[0].product_name.as_deref(), Some("Probiotic paste"));
        assert_eq!(products[0].link_shopee, None);
        assert_eq!(products[0].reason, None);
        assert_eq!(products[1].disease_id, "7");
        assert_eq!(products[1].reason.as_deref(), Some("too salty"));
        assert_eq!(products[1].pet_type, None);
    }

    #[test]
    fn feed_without_entries_is_empty() {
        assert!(parse_feed(r#"{"feed": {}}"#).unwrap().is_empty());
    }

    #[test]
    fn json_without_feed_is_parse_error() {
        assert!(matches!(
            parse_feed(r#"{"rows": []}"#),
            Err(AffiliateError::Parse(_))
        ));
        assert!(matches!(parse_feed("{not json"), Err(AffiliateError::Parse(_))));
    }

    #[test]
    fn csv_layout_with_loose_headers() {
        let body = "Disease ID,Product Name,link_shopee,Color,Reason,pet-type\n\
                    42,Probiotic paste,https://shopee.vn/p/1,green,,all\n\
                    43,Salmon treats,,red,High fat,cat\n";
        let products = parse_feed(body).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].disease_id, "42");
        assert_eq!(products[0].link_shopee.as_deref(), Some("https://shopee.vn/p/1"));
        assert_eq!(products[0].reason, None);
        assert_eq!(products[0].pet_type.as_deref(), Some("all"));
        assert_eq!(products[1].color.as_deref(), Some("red"));
        assert_eq!(products[1].link_shopee, None);
    }

    #[test]
    fn short_csv_rows_leave_missing_cells_null() {
        let body = "disease_id,product_name,pet_type\n42,Paste\n";
        let products = parse_feed(body).unwrap();
        assert_eq!(products[0].product_name.as_deref(), Some("Paste"));
        assert_eq!(products[0].pet_type, None);
    }

    #[test]
    fn byte_order_mark_does_not_hide_first_column() {
        let csv = "\u{feff}disease_id,product_name,pet_type\n42,Paste,dog\n";
        let products = parse_feed(csv).unwrap();
        assert_eq!(products[0].disease_id, "42");
        assert_eq!(products[0].pet_type.as_deref(), Some("dog"));

        let json = "\u{feff}{\"feed\": {\"entry\": [{\"gsx$diseaseid\": {\"$t\": \"42\"}}]}}";
        assert_eq!(parse_feed(json).unwrap()[0].disease_id, "42");
    }
}
