//! Normalisation of listings returned by web search into pool properties.
//!
//! Web results only reliably carry a title and a price. Everything else is
//! defaulted here so the scoring pipeline never sees a half-formed record.

use super::domain::{Property, Typology};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub const WEB_SOURCE: &str = "Web Search";
pub const UNKNOWN_LOCATION: &str = "Unknown";

const WRAPPER_KEYS: [&str; 4] = ["properties", "results", "listings", "items"];

/// Listing as extracted from a web search result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebListing {
    pub title: Option<String>,
    pub price: Option<Value>,
    pub location: Option<String>,
    pub typology: Option<String>,
    pub rooms: Option<u32>,
    pub size_sqm: Option<f64>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub agency: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ListingError {
    #[error("listing has no title")]
    MissingTitle,
    #[error("listing '{title}' has no price")]
    MissingPrice { title: String },
    #[error("listing '{title}' has a negative price")]
    NegativePrice { title: String },
    #[error("listing '{title}' has an unreadable price '{raw}'")]
    UnreadablePrice { title: String, raw: String },
    #[error("listing document must be an array or an object holding one: {0}")]
    Document(String),
}

impl WebListing {
    /// Converts the listing into a property with the `WEB-<index>` id.
    pub fn into_property(self, index: usize) -> Result<Property, ListingError> {
        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .ok_or(ListingError::MissingTitle)?
            .to_string();

        let price = match &self.price {
            None | Some(Value::Null) => {
                return Err(ListingError::MissingPrice { title });
            }
            Some(raw) => parse_price_value(raw, &title)?,
        };

        let location = self
            .location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .unwrap_or(UNKNOWN_LOCATION)
            .to_string();
        let city = location
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or(UNKNOWN_LOCATION)
            .to_string();

        let typology = self
            .typology
            .as_deref()
            .and_then(Typology::parse)
            .or_else(|| self.rooms.map(Typology::from_bedrooms));

        let url = match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() && url != "#" => url.to_string(),
            _ => fallback_search_url(&title, &location),
        };

        let source = self
            .source
            .filter(|source| !source.trim().is_empty())
            .unwrap_or_else(|| WEB_SOURCE.to_string());

        Ok(Property {
            id: format!("WEB-{index}"),
            location,
            city,
            property_type: None,
            typology,
            price,
            wcs: None,
            state: None,
            transport_distance: None,
            agency: self.agency.or_else(|| Some(source.clone())),
            url,
            source,
            features: Vec::new(),
            area_m2: self
                .size_sqm
                .filter(|size| size.is_finite() && *size > 0.0)
                .map(|size| size.round() as u32),
            year_built: None,
            energy_rating: None,
        })
    }
}

/// Normalises a batch, skipping listings that cannot be priced or named.
pub fn normalize_listings(listings: Vec<WebListing>) -> Vec<Property> {
    let received = listings.len();
    let properties: Vec<Property> = listings
        .into_iter()
        .enumerate()
        .filter_map(|(index, listing)| match listing.into_property(index + 1) {
            Ok(property) => Some(property),
            Err(err) => {
                warn!(error = %err, "skipping web listing");
                None
            }
        })
        .collect();

    debug!(received, kept = properties.len(), "normalized web listings");
    properties
}

/// Parses a listings document: either a JSON array or an object wrapping one.
pub fn parse_listing_document(raw: &str) -> Result<Vec<WebListing>, ListingError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| ListingError::Document(err.to_string()))?;

    let array = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => WRAPPER_KEYS
            .iter()
            .find_map(|key| match object.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| ListingError::Document("no listings array found".to_string()))?,
        other => {
            return Err(ListingError::Document(format!(
                "unexpected top-level {}",
                json_kind(&other)
            )))
        }
    };

    Ok(array
        .into_iter()
        .filter_map(|item| serde_json::from_value::<WebListing>(item).ok())
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_price_value(raw: &Value, title: &str) -> Result<u64, ListingError> {
    let unreadable = || ListingError::UnreadablePrice {
        title: title.to_string(),
        raw: raw.to_string(),
    };

    let amount = match raw {
        Value::Number(number) => number.as_f64().ok_or_else(unreadable)?,
        Value::String(text) => parse_price_text(text).ok_or_else(unreadable)?,
        _ => return Err(unreadable()),
    };

    if amount < 0.0 {
        return Err(ListingError::NegativePrice {
            title: title.to_string(),
        });
    }
    if !amount.is_finite() {
        return Err(unreadable());
    }
    Ok(amount.round() as u64)
}

/// Reads a price typed as text, e.g. `"€ 250,000"`, `"250.000 €"` or `"-1500"`.
///
/// A single separator followed by exactly three digits is read as a
/// thousands separator; otherwise the last separator is the decimal point.
pub fn parse_price_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let negative = trimmed.starts_with('-');
    let kept: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if !kept.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = match kept.rfind(['.', ',']) {
        None => kept,
        Some(position) => {
            let decimal = if kept[position..].starts_with('.') { '.' } else { ',' };
            let grouping = if decimal == '.' { ',' } else { '.' };
            let decimal_count = kept.matches(decimal).count();
            let is_decimal_point = if kept.contains(grouping) {
                decimal_count == 1
            } else {
                decimal_count == 1 && kept.len() - position - 1 != 3
            };

            if is_decimal_point {
                kept.replace(grouping, "").replace(decimal, ".")
            } else {
                kept.replace(['.', ','], "")
            }
        }
    };

    let amount: f64 = normalized.parse().ok()?;
    Some(if negative { -amount } else { amount })
}

fn fallback_search_url(title: &str, location: &str) -> String {
    format!(
        "https://www.google.com/search?q={}",
        urlencoding::encode(&format!("{title} {location}"))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing(value: Value) -> WebListing {
        serde_json::from_value(value).expect("listing deserializes")
    }

    #[test]
    fn minimal_listing_receives_defaults() {
        let property = listing(json!({ "title": "Bright flat", "price": 250000 }))
            .into_property(1)
            .expect("normalizes");

        assert_eq!(property.id, "WEB-1");
        assert_eq!(property.price, 250_000);
        assert_eq!(property.location, UNKNOWN_LOCATION);
        assert_eq!(property.source, WEB_SOURCE);
        assert_eq!(property.typology, None);
        assert_eq!(
            property.url,
            "https://www.google.com/search?q=Bright%20flat%20Unknown"
        );
    }

    #[test]
    fn placeholder_url_is_replaced() {
        let property = listing(json!({
            "title": "T2 Alfama",
            "price": 310000,
            "location": "Lisboa, Alfama",
            "url": "#"
        }))
        .into_property(2)
        .expect("normalizes");

        assert!(property.url.starts_with("https://www.google.com/search?q=T2%20Alfama"));
        assert_eq!(property.city, "Lisboa");
    }

    #[test]
    fn direct_url_and_typology_are_kept() {
        let property = listing(json!({
            "title": "Moradia",
            "price": "€ 420,000",
            "typology": "t3",
            "url": "https://www.idealista.pt/imovel/1",
            "source": "Idealista",
            "size_sqm": 140.4
        }))
        .into_property(3)
        .expect("normalizes");

        assert_eq!(property.price, 420_000);
        assert_eq!(property.typology, Some(Typology::T3));
        assert_eq!(property.url, "https://www.idealista.pt/imovel/1");
        assert_eq!(property.source, "Idealista");
        assert_eq!(property.area_m2, Some(140));
    }

    #[test]
    fn typology_falls_back_to_room_count() {
        let property = listing(json!({ "title": "House", "price": 1.0, "rooms": 6 }))
            .into_property(1)
            .expect("normalizes");
        assert_eq!(property.typology, Some(Typology::T4Plus));
    }

    #[test]
    fn listings_without_title_or_price_are_rejected() {
        assert_eq!(
            listing(json!({ "price": 100 })).into_property(1),
            Err(ListingError::MissingTitle)
        );
        assert!(matches!(
            listing(json!({ "title": "No price" })).into_property(1),
            Err(ListingError::MissingPrice { .. })
        ));
        assert!(matches!(
            listing(json!({ "title": "Odd", "price": -5 })).into_property(1),
            Err(ListingError::NegativePrice { .. })
        ));
        assert!(matches!(
            listing(json!({ "title": "Odd", "price": "on request" })).into_property(1),
            Err(ListingError::UnreadablePrice { .. })
        ));
    }

    #[test]
    fn normalize_skips_bad_listings_and_keeps_positions() {
        let properties = normalize_listings(vec![
            listing(json!({ "title": "First", "price": 100000 })),
            listing(json!({ "price": 5 })),
            listing(json!({ "title": "Third", "price": "95000" })),
        ]);

        let ids: Vec<_> = properties.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["WEB-1", "WEB-3"]);
    }

    #[test]
    fn price_text_handles_common_separators() {
        assert_eq!(parse_price_text("250000"), Some(250_000.0));
        assert_eq!(parse_price_text("€250,000"), Some(250_000.0));
        assert_eq!(parse_price_text("250.000 €"), Some(250_000.0));
        assert_eq!(parse_price_text("1.250.000"), Some(1_250_000.0));
        assert_eq!(parse_price_text("1,250,000.50"), Some(1_250_000.5));
        assert_eq!(parse_price_text("99.5"), Some(99.5));
        assert_eq!(parse_price_text("-1500"), Some(-1500.0));
        assert_eq!(parse_price_text("price on request"), None);
    }

    #[test]
    fn documents_may_wrap_the_array() {
        let wrapped = r#"{"results": [{"title": "A", "price": 1}, {"title": "B", "price": 2}]}"#;
        assert_eq!(parse_listing_document(wrapped).expect("parses").len(), 2);

        let bare = r#"[{"title": "A", "price": 1}]"#;
        assert_eq!(parse_listing_document(bare).expect("parses").len(), 1);

        assert!(matches!(
            parse_listing_document(r#"{"count": 3}"#),
            Err(ListingError::Document(_))
        ));
        assert!(parse_listing_document("not json").is_err());
    }
}
