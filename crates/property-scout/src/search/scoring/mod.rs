mod rules;
mod weights;

#[cfg(test)]
mod tests;

pub use weights::{
    ScoringWeights, ABOVE_RANGE_CREDIT, BELOW_RANGE_CREDIT, LOCATION_MISMATCH_CREDIT,
    UNSPECIFIED_CREDIT,
};

use super::domain::{Property, SearchRequirements};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scored criteria, in the order components are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Location,
    PropertyType,
    Typology,
    Price,
    Wcs,
    Transport,
    UsageState,
}

impl ScoreCategory {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Location,
            Self::PropertyType,
            Self::Typology,
            Self::Price,
            Self::Wcs,
            Self::Transport,
            Self::UsageState,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::PropertyType => "property_type",
            Self::Typology => "typology",
            Self::Price => "price",
            Self::Wcs => "wcs",
            Self::Transport => "transport",
            Self::UsageState => "usage_state",
        }
    }
}

/// Discrete contribution to a match score, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub category: ScoreCategory,
    pub weight: f64,
    pub awarded: f64,
    pub notes: String,
}

impl fmt::Display for ScoreComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.3}/{:.2}",
            self.category.label(),
            self.awarded,
            self.weight
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub score: f64,
    pub components: Vec<ScoreComponent>,
}

impl MatchScore {
    pub fn component(&self, category: ScoreCategory) -> Option<&ScoreComponent> {
        self.components
            .iter()
            .find(|component| component.category == category)
    }
}

/// Stateless weighted scorer for a property against a requirement set.
#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    weights: ScoringWeights,
}

impl MatchScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score(&self, property: &Property, requirements: &SearchRequirements) -> MatchScore {
        debug_assert!(
            requirements.price_floor() <= requirements.price_ceiling(),
            "price_min above price_max reached the scorer"
        );

        let components = rules::score_property(property, requirements, &self.weights);
        let raw: f64 = components.iter().map(|component| component.awarded).sum();

        MatchScore {
            score: round_score(raw.min(1.0)),
            components,
        }
    }
}

/// Rounds to two decimal places.
pub(crate) fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
