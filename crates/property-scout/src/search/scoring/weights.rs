use serde::{Deserialize, Serialize};

/// Category weights for the match score. The defaults sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub location: f64,
    pub property_type: f64,
    pub typology: f64,
    pub price: f64,
    pub wcs: f64,
    pub transport: f64,
    pub usage_state: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            location: 0.25,
            property_type: 0.15,
            typology: 0.20,
            price: 0.25,
            wcs: 0.05,
            transport: 0.05,
            usage_state: 0.05,
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.location
            + self.property_type
            + self.typology
            + self.price
            + self.wcs
            + self.transport
            + self.usage_state
    }
}

/// Share of the location weight kept when the location does not match.
pub const LOCATION_MISMATCH_CREDIT: f64 = 0.5;
/// Share of the price weight for listings cheaper than the requested minimum.
pub const BELOW_RANGE_CREDIT: f64 = 0.7;
/// Share of the price weight for listings above the requested maximum.
pub const ABOVE_RANGE_CREDIT: f64 = 0.3;
/// Share awarded for optional criteria the searcher left open.
pub const UNSPECIFIED_CREDIT: f64 = 0.5;
