use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Flat,
    House,
}

impl PropertyType {
    pub const fn ordered() -> [Self; 2] {
        [Self::Flat, Self::House]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::House => "house",
        }
    }

    /// Parses a form value. `"any"` and blank input mean "unconstrained" and yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "flat" | "apartment" => Some(Self::Flat),
            "house" => Some(Self::House),
            _ => None,
        }
    }
}

/// Bedroom-count classification, T0 (studio) through T4+.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Typology {
    T0,
    T1,
    T2,
    T3,
    T4,
    #[serde(rename = "T4+")]
    T4Plus,
}

impl Typology {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::T0,
            Self::T1,
            Self::T2,
            Self::T3,
            Self::T4,
            Self::T4Plus,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::T0 => "T0",
            Self::T1 => "T1",
            Self::T2 => "T2",
            Self::T3 => "T3",
            Self::T4 => "T4",
            Self::T4Plus => "T4+",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_uppercase();
        Self::ordered()
            .into_iter()
            .find(|typology| typology.label() == normalized)
    }

    /// Maps a bedroom count onto its typology; five or more bedrooms is T4+.
    pub const fn from_bedrooms(bedrooms: u32) -> Self {
        match bedrooms {
            0 => Self::T0,
            1 => Self::T1,
            2 => Self::T2,
            3 => Self::T3,
            4 => Self::T4,
            _ => Self::T4Plus,
        }
    }
}

impl fmt::Display for Typology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsageState {
    #[serde(rename = "brand new")]
    BrandNew,
    #[serde(rename = "new")]
    New,
    #[serde(rename = "used")]
    Used,
    #[serde(rename = "recovery")]
    Recovery,
}

impl UsageState {
    pub const fn ordered() -> [Self; 4] {
        [Self::BrandNew, Self::New, Self::Used, Self::Recovery]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BrandNew => "brand new",
            Self::New => "new",
            Self::Used => "used",
            Self::Recovery => "recovery",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase().replace(['_', '-'], " ");
        Self::ordered()
            .into_iter()
            .find(|state| state.label() == normalized)
    }
}

/// A listing in the search pool.
///
/// Generated listings populate every field; listings that arrive from web
/// search may leave the optional attributes empty, and the scorer and report
/// treat those as unknown rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub location: String,
    pub city: String,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    pub typology: Option<Typology>,
    pub price: u64,
    pub wcs: Option<u8>,
    pub state: Option<UsageState>,
    pub transport_distance: Option<u32>,
    pub agency: Option<String>,
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub area_m2: Option<u32>,
    pub year_built: Option<i32>,
    pub energy_rating: Option<String>,
}

impl Property {
    /// Case-insensitive substring match against the location string or the city.
    pub fn matches_location(&self, needle: &str) -> bool {
        location_contains(&self.location, needle) || location_contains(&self.city, needle)
    }
}

pub(crate) fn location_contains(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    haystack.trim().to_lowercase().contains(&needle)
}

/// Walking-minutes limit to public transport as entered on the search form.
///
/// Values that do not read as a number are kept so the scorer can still award
/// partial credit for them; the catalog filter ignores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportLimit {
    Minutes(u32),
    Unparsed(String),
}

impl TransportLimit {
    /// `"any"` and blank input mean no limit.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("any") {
            return None;
        }

        match trimmed.parse::<u32>() {
            Ok(minutes) => Some(Self::Minutes(minutes)),
            Err(_) => Some(Self::Unparsed(trimmed.to_string())),
        }
    }

    pub fn minutes(&self) -> Option<u32> {
        match self {
            Self::Minutes(minutes) => Some(*minutes),
            Self::Unparsed(_) => None,
        }
    }
}

/// Criteria for a single search. Absent fields are unconstrained.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequirements {
    pub country: String,
    pub location: Option<String>,
    pub property_type: Option<PropertyType>,
    pub typology: Vec<Typology>,
    pub price_min: Option<u64>,
    pub price_max: Option<u64>,
    pub wcs: Option<u8>,
    pub usage_state: Option<UsageState>,
    pub public_transport: Option<TransportLimit>,
    pub max_results: Option<usize>,
    pub currency: Option<String>,
    pub currency_symbol: Option<String>,
    pub distance: Option<String>,
    pub other_requirements: Option<String>,
}

impl SearchRequirements {
    pub fn for_country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            location: None,
            property_type: None,
            typology: Vec::new(),
            price_min: None,
            price_max: None,
            wcs: None,
            usage_state: None,
            public_transport: None,
            max_results: None,
            currency: None,
            currency_symbol: None,
            distance: None,
            other_requirements: None,
        }
    }

    pub fn price_floor(&self) -> u64 {
        self.price_min.unwrap_or(0)
    }

    pub fn price_ceiling(&self) -> u64 {
        self.price_max.unwrap_or(u64::MAX)
    }

    pub fn price_in_range(&self, price: u64) -> bool {
        (self.price_floor()..=self.price_ceiling()).contains(&price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typology_labels_round_trip_through_parse() {
        for typology in Typology::ordered() {
            assert_eq!(Typology::parse(typology.label()), Some(typology));
        }
        assert_eq!(Typology::parse(" t4+ "), Some(Typology::T4Plus));
        assert_eq!(Typology::parse("Unknown"), None);
    }

    #[test]
    fn any_sentinels_parse_as_unconstrained() {
        assert_eq!(PropertyType::parse("any"), None);
        assert_eq!(UsageState::parse("any"), None);
        assert_eq!(TransportLimit::parse("any"), None);
        assert_eq!(TransportLimit::parse("  "), None);
    }

    #[test]
    fn usage_state_accepts_separators() {
        assert_eq!(UsageState::parse("Brand_New"), Some(UsageState::BrandNew));
        assert_eq!(UsageState::parse("brand-new"), Some(UsageState::BrandNew));
    }

    #[test]
    fn transport_limit_keeps_non_numeric_text() {
        assert_eq!(TransportLimit::parse("15"), Some(TransportLimit::Minutes(15)));
        assert_eq!(
            TransportLimit::parse("close"),
            Some(TransportLimit::Unparsed("close".to_string()))
        );
    }

    #[test]
    fn bedrooms_above_four_map_to_t4_plus() {
        assert_eq!(Typology::from_bedrooms(2), Typology::T2);
        assert_eq!(Typology::from_bedrooms(7), Typology::T4Plus);
    }

    #[test]
    fn unbounded_price_range_accepts_everything() {
        let requirements = SearchRequirements::for_country("Portugal");
        assert!(requirements.price_in_range(0));
        assert!(requirements.price_in_range(u64::MAX));
    }
}
