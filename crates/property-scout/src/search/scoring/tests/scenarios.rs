use super::common::*;
use crate::search::domain::{PropertyType, TransportLimit, Typology, UsageState};
use crate::search::scoring::{
    ScoreCategory, ScoringWeights, BELOW_RANGE_CREDIT, UNSPECIFIED_CREDIT,
};

#[test]
fn exact_match_scores_core_weights_plus_open_criteria_credit() {
    let outcome = scorer().score(&lisboa_flat(), &lisboa_requirements());

    assert!(outcome.score >= 0.85, "score {}", outcome.score);
    assert!(outcome.score >= 0.5);
    assert_eq!(outcome.components.len(), 7);

    for category in [ScoreCategory::Wcs, ScoreCategory::Transport, ScoreCategory::UsageState] {
        let component = outcome.component(category).expect("component present");
        assert!(approx_eq(component.awarded, component.weight * UNSPECIFIED_CREDIT));
    }
}

#[test]
fn fully_satisfied_requirements_cap_at_one() {
    let outcome = scorer().score(&lisboa_flat(), &fully_specified_requirements());
    assert_eq!(outcome.score, 1.0);
}

#[test]
fn price_below_range_earns_bargain_credit() {
    let mut property = lisboa_flat();
    property.price = 80_000;

    let outcome = scorer().score(&property, &lisboa_requirements());
    let price = outcome.component(ScoreCategory::Price).expect("price");

    assert!(approx_eq(price.awarded, 0.175));
    assert!(approx_eq(price.awarded, 0.25 * BELOW_RANGE_CREDIT));
}

#[test]
fn price_above_range_earns_less_than_below_range() {
    let mut cheap = lisboa_flat();
    cheap.price = 80_000;
    let mut expensive = lisboa_flat();
    expensive.price = 250_000;

    let requirements = lisboa_requirements();
    let cheap_price = scorer().score(&cheap, &requirements);
    let expensive_price = scorer().score(&expensive, &requirements);

    let above = expensive_price
        .component(ScoreCategory::Price)
        .expect("price")
        .awarded;
    assert!(approx_eq(above, 0.075));
    assert!(cheap_price.score > expensive_price.score);
}

#[test]
fn location_substring_matches_case_insensitively() {
    let mut property = lisboa_flat();
    property.location = "Lisboa, Setúbal".to_string();
    property.city = "Almada".to_string();

    let mut requirements = lisboa_requirements();
    requirements.location = Some("lisboa".to_string());

    let outcome = scorer().score(&property, &requirements);
    let location = outcome.component(ScoreCategory::Location).expect("location");
    assert!(approx_eq(location.awarded, 0.25));
}

#[test]
fn location_mismatch_keeps_half_credit() {
    let mut property = lisboa_flat();
    property.location = "Porto, Porto District".to_string();
    property.city = "Porto".to_string();

    let outcome = scorer().score(&property, &lisboa_requirements());
    let location = outcome.component(ScoreCategory::Location).expect("location");
    assert!(approx_eq(location.awarded, 0.125));
}

#[test]
fn location_matches_on_city_when_location_text_differs() {
    let mut property = lisboa_flat();
    property.location = "Centro Histórico".to_string();

    let outcome = scorer().score(&property, &lisboa_requirements());
    let location = outcome.component(ScoreCategory::Location).expect("location");
    assert!(approx_eq(location.awarded, location.weight));
}

#[test]
fn type_and_typology_have_no_partial_credit() {
    let mut property = lisboa_flat();
    property.property_type = Some(PropertyType::House);
    property.typology = Some(Typology::T4Plus);

    let outcome = scorer().score(&property, &lisboa_requirements());
    assert_eq!(
        outcome
            .component(ScoreCategory::PropertyType)
            .expect("type")
            .awarded,
        0.0
    );
    assert_eq!(
        outcome
            .component(ScoreCategory::Typology)
            .expect("typology")
            .awarded,
        0.0
    );
}

#[test]
fn specified_optional_criteria_score_all_or_nothing() {
    let mut property = lisboa_flat();
    property.wcs = Some(2);
    property.state = Some(UsageState::Recovery);
    property.transport_distance = Some(30);

    let outcome = scorer().score(&property, &fully_specified_requirements());
    for category in [ScoreCategory::Wcs, ScoreCategory::Transport, ScoreCategory::UsageState] {
        assert_eq!(outcome.component(category).expect("component").awarded, 0.0);
    }
}

#[test]
fn transport_limit_is_inclusive() {
    let mut property = lisboa_flat();
    property.transport_distance = Some(15);

    let outcome = scorer().score(&property, &fully_specified_requirements());
    let transport = outcome.component(ScoreCategory::Transport).expect("transport");
    assert!(approx_eq(transport.awarded, transport.weight));
}

#[test]
fn unreadable_transport_limit_earns_half_credit() {
    let mut requirements = lisboa_requirements();
    requirements.public_transport = Some(TransportLimit::Unparsed("close by".to_string()));

    let outcome = scorer().score(&lisboa_flat(), &requirements);
    let transport = outcome.component(ScoreCategory::Transport).expect("transport");
    assert!(approx_eq(transport.awarded, 0.025));
}

#[test]
fn sparse_listing_scores_without_panicking() {
    let outcome = scorer().score(&sparse_listing(), &fully_specified_requirements());

    // location half credit plus the below-range price credit
    assert!(approx_eq(outcome.score, 0.3));
    assert!(outcome.score < 0.5);
}

#[test]
fn custom_weights_flow_into_components() {
    let weights = ScoringWeights {
        location: 0.5,
        property_type: 0.5,
        typology: 0.0,
        price: 0.0,
        wcs: 0.0,
        transport: 0.0,
        usage_state: 0.0,
    };
    let scorer = crate::search::scoring::MatchScorer::new(weights);

    let outcome = scorer.score(&lisboa_flat(), &lisboa_requirements());
    assert_eq!(outcome.score, 1.0);
    assert_eq!(scorer.weights().location, 0.5);
}

#[test]
fn components_follow_category_order_and_labels() {
    let outcome = scorer().score(&lisboa_flat(), &lisboa_requirements());
    let categories: Vec<_> = outcome.components.iter().map(|c| c.category).collect();
    assert_eq!(categories, ScoreCategory::ordered());

    for category in ScoreCategory::ordered() {
        let serialized = serde_json::to_value(category).expect("serialize");
        assert_eq!(serialized, category.label());
    }

    let location = outcome.component(ScoreCategory::Location).expect("location");
    assert_eq!(location.to_string(), "location 0.250/0.25");
}
