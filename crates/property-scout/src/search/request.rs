use super::domain::{PropertyType, SearchRequirements, TransportLimit, Typology, UsageState};
use super::listings::WebListing;
use crate::config::SearchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Typology selection as posted by a form: a list, or one comma-separated string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypologySelection {
    Many(Vec<String>),
    One(String),
}

impl TypologySelection {
    fn labels(&self) -> Vec<&str> {
        let labels: Vec<&str> = match self {
            Self::Many(values) => values.iter().map(String::as_str).collect(),
            Self::One(value) => value.split(',').collect(),
        };
        labels
            .into_iter()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .collect()
    }
}

/// Numeric criteria that forms may send as numbers or as text such as `"any"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexibleValue {
    Number(u64),
    Text(String),
}

/// Boundary search request. Every key is optional and `null` is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typology: Option<TypologySelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wcs: Option<FlexibleValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_transport: Option<FlexibleValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_listings: Option<Vec<WebListing>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("price_min ({min}) must not exceed price_max ({max})")]
    InvertedPriceRange { min: u64, max: u64 },
    #[error("at least one typology must be selected")]
    EmptyTypology,
    #[error("unknown {field} value '{value}'")]
    UnknownLabel { field: &'static str, value: String },
    #[error("max_results must be at least 1")]
    ZeroMaxResults,
}

impl SearchRequest {
    /// Validates the request and fills defaults from `config`.
    pub fn to_requirements(
        &self,
        config: &SearchConfig,
    ) -> Result<SearchRequirements, RequestError> {
        let typology = self.typologies()?;

        if let (Some(min), Some(max)) = (self.price_min, self.price_max) {
            if min > max {
                return Err(RequestError::InvertedPriceRange { min, max });
            }
        }

        let max_results = match self.max_results {
            Some(0) => return Err(RequestError::ZeroMaxResults),
            Some(limit) => limit,
            None => config.max_results,
        };

        let property_type = constrained(self.property_type.as_deref())
            .map(|raw| PropertyType::parse(raw).ok_or_else(|| unknown("property_type", raw)))
            .transpose()?;

        let usage_state = constrained(self.usage_state.as_deref())
            .map(|raw| UsageState::parse(raw).ok_or_else(|| unknown("usage_state", raw)))
            .transpose()?;

        let wcs = match &self.wcs {
            None => None,
            Some(FlexibleValue::Number(count)) => Some(
                u8::try_from(*count).map_err(|_| unknown("wcs", &count.to_string()))?,
            ),
            Some(FlexibleValue::Text(text)) => constrained(Some(text.as_str()))
                .map(|raw| raw.parse::<u8>().map_err(|_| unknown("wcs", raw)))
                .transpose()?,
        };

        let public_transport = match &self.public_transport {
            None => None,
            Some(FlexibleValue::Number(minutes)) => Some(TransportLimit::Minutes(
                u32::try_from(*minutes).unwrap_or(u32::MAX),
            )),
            Some(FlexibleValue::Text(text)) => TransportLimit::parse(text),
        };

        Ok(SearchRequirements {
            country: non_blank(self.country.as_deref())
                .unwrap_or_else(|| config.default_country.clone()),
            location: non_blank(self.location.as_deref()),
            property_type,
            typology,
            price_min: self.price_min,
            price_max: self.price_max,
            wcs,
            usage_state,
            public_transport,
            max_results: Some(max_results),
            currency: non_blank(self.currency.as_deref()),
            currency_symbol: self
                .currency_symbol
                .clone()
                .filter(|symbol| !symbol.trim().is_empty()),
            distance: non_blank(self.distance.as_deref()),
            other_requirements: non_blank(self.other_requirements.as_deref()),
        })
    }

    fn typologies(&self) -> Result<Vec<Typology>, RequestError> {
        let labels = self
            .typology
            .as_ref()
            .map(TypologySelection::labels)
            .unwrap_or_default();
        if labels.is_empty() {
            return Err(RequestError::EmptyTypology);
        }

        let mut typologies = Vec::with_capacity(labels.len());
        for label in labels {
            let typology = Typology::parse(label).ok_or_else(|| unknown("typology", label))?;
            if !typologies.contains(&typology) {
                typologies.push(typology);
            }
        }
        Ok(typologies)
    }

    /// Overlays `refinements` on this request; keys present in the refinement win.
    pub fn merge(&self, refinements: &SearchRequest) -> SearchRequest {
        fn pick<T: Clone>(refined: &Option<T>, previous: &Option<T>) -> Option<T> {
            refined.clone().or_else(|| previous.clone())
        }

        SearchRequest {
            country: pick(&refinements.country, &self.country),
            location: pick(&refinements.location, &self.location),
            property_type: pick(&refinements.property_type, &self.property_type),
            typology: pick(&refinements.typology, &self.typology),
            currency: pick(&refinements.currency, &self.currency),
            currency_symbol: pick(&refinements.currency_symbol, &self.currency_symbol),
            max_results: pick(&refinements.max_results, &self.max_results),
            price_min: pick(&refinements.price_min, &self.price_min),
            price_max: pick(&refinements.price_max, &self.price_max),
            distance: pick(&refinements.distance, &self.distance),
            wcs: pick(&refinements.wcs, &self.wcs),
            usage_state: pick(&refinements.usage_state, &self.usage_state),
            public_transport: pick(&refinements.public_transport, &self.public_transport),
            other_requirements: pick(&refinements.other_requirements, &self.other_requirements),
            web_listings: pick(&refinements.web_listings, &self.web_listings),
        }
    }
}

fn unknown(field: &'static str, value: &str) -> RequestError {
    RequestError::UnknownLabel {
        field,
        value: value.to_string(),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Trims the value and maps blank input and `"any"` to `None`.
fn constrained(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case("any"))
}
