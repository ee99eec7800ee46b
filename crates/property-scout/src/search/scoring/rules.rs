use super::super::domain::{Property, SearchRequirements, TransportLimit};
use super::weights::{
    ScoringWeights, ABOVE_RANGE_CREDIT, BELOW_RANGE_CREDIT, LOCATION_MISMATCH_CREDIT,
    UNSPECIFIED_CREDIT,
};
use super::{ScoreCategory, ScoreComponent};

pub(crate) fn score_property(
    property: &Property,
    requirements: &SearchRequirements,
    weights: &ScoringWeights,
) -> Vec<ScoreComponent> {
    ScoreCategory::ordered()
        .into_iter()
        .map(|category| match category {
            ScoreCategory::Location => location(property, requirements, weights.location),
            ScoreCategory::PropertyType => {
                property_type(property, requirements, weights.property_type)
            }
            ScoreCategory::Typology => typology(property, requirements, weights.typology),
            ScoreCategory::Price => price(property, requirements, weights.price),
            ScoreCategory::Wcs => wcs(property, requirements, weights.wcs),
            ScoreCategory::Transport => transport(property, requirements, weights.transport),
            ScoreCategory::UsageState => usage_state(property, requirements, weights.usage_state),
        })
        .collect()
}

fn component(
    category: ScoreCategory,
    weight: f64,
    share: f64,
    notes: impl Into<String>,
) -> ScoreComponent {
    ScoreComponent {
        category,
        weight,
        awarded: weight * share,
        notes: notes.into(),
    }
}

// A missing location requirement contributes nothing; a stated one never drops below half.
fn location(property: &Property, requirements: &SearchRequirements, weight: f64) -> ScoreComponent {
    match requirements.location.as_deref() {
        Some(needle) if property.matches_location(needle) => component(
            ScoreCategory::Location,
            weight,
            1.0,
            format!("'{}' matches '{needle}'", property.location),
        ),
        Some(needle) => component(
            ScoreCategory::Location,
            weight,
            LOCATION_MISMATCH_CREDIT,
            format!("'{}' does not contain '{needle}'", property.location),
        ),
        None => component(ScoreCategory::Location, weight, 0.0, "no location requested"),
    }
}

fn property_type(
    property: &Property,
    requirements: &SearchRequirements,
    weight: f64,
) -> ScoreComponent {
    match (requirements.property_type, property.property_type) {
        (Some(wanted), Some(actual)) if wanted == actual => component(
            ScoreCategory::PropertyType,
            weight,
            1.0,
            format!("type {} matches", actual.label()),
        ),
        (Some(wanted), _) => component(
            ScoreCategory::PropertyType,
            weight,
            0.0,
            format!("type is not {}", wanted.label()),
        ),
        (None, _) => component(ScoreCategory::PropertyType, weight, 0.0, "any type"),
    }
}

fn typology(property: &Property, requirements: &SearchRequirements, weight: f64) -> ScoreComponent {
    match property.typology {
        Some(actual) if requirements.typology.contains(&actual) => component(
            ScoreCategory::Typology,
            weight,
            1.0,
            format!("{actual} requested"),
        ),
        Some(actual) => component(
            ScoreCategory::Typology,
            weight,
            0.0,
            format!("{actual} not requested"),
        ),
        None => component(ScoreCategory::Typology, weight, 0.0, "typology unknown"),
    }
}

fn price(property: &Property, requirements: &SearchRequirements, weight: f64) -> ScoreComponent {
    let floor = requirements.price_floor();
    let ceiling = requirements.price_ceiling();

    if property.price < floor {
        component(
            ScoreCategory::Price,
            weight,
            BELOW_RANGE_CREDIT,
            format!("{} below minimum {floor}", property.price),
        )
    } else if property.price > ceiling {
        component(
            ScoreCategory::Price,
            weight,
            ABOVE_RANGE_CREDIT,
            format!("{} above maximum {ceiling}", property.price),
        )
    } else {
        component(ScoreCategory::Price, weight, 1.0, "price within range")
    }
}

fn wcs(property: &Property, requirements: &SearchRequirements, weight: f64) -> ScoreComponent {
    match requirements.wcs {
        None => component(
            ScoreCategory::Wcs,
            weight,
            UNSPECIFIED_CREDIT,
            "wc count not specified",
        ),
        Some(wanted) if property.wcs == Some(wanted) => component(
            ScoreCategory::Wcs,
            weight,
            1.0,
            format!("{wanted} wc(s) as requested"),
        ),
        Some(wanted) => component(
            ScoreCategory::Wcs,
            weight,
            0.0,
            format!("wanted {wanted} wc(s)"),
        ),
    }
}

fn transport(property: &Property, requirements: &SearchRequirements, weight: f64) -> ScoreComponent {
    match &requirements.public_transport {
        None => component(
            ScoreCategory::Transport,
            weight,
            UNSPECIFIED_CREDIT,
            "transport not specified",
        ),
        Some(TransportLimit::Unparsed(raw)) => component(
            ScoreCategory::Transport,
            weight,
            UNSPECIFIED_CREDIT,
            format!("unreadable transport limit '{raw}'"),
        ),
        Some(TransportLimit::Minutes(limit)) => match property.transport_distance {
            Some(distance) if distance <= *limit => component(
                ScoreCategory::Transport,
                weight,
                1.0,
                format!("{distance} min within {limit} min"),
            ),
            Some(distance) => component(
                ScoreCategory::Transport,
                weight,
                0.0,
                format!("{distance} min exceeds {limit} min"),
            ),
            None => component(
                ScoreCategory::Transport,
                weight,
                0.0,
                "transport distance unknown",
            ),
        },
    }
}

fn usage_state(
    property: &Property,
    requirements: &SearchRequirements,
    weight: f64,
) -> ScoreComponent {
    match requirements.usage_state {
        None => component(
            ScoreCategory::UsageState,
            weight,
            UNSPECIFIED_CREDIT,
            "state not specified",
        ),
        Some(wanted) if property.state == Some(wanted) => component(
            ScoreCategory::UsageState,
            weight,
            1.0,
            format!("state {} as requested", wanted.label()),
        ),
        Some(wanted) => component(
            ScoreCategory::UsageState,
            weight,
            0.0,
            format!("state is not {}", wanted.label()),
        ),
    }
}
