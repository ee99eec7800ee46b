use crate::search::domain::{
    Property, PropertyType, SearchRequirements, TransportLimit, Typology, UsageState,
};
use crate::search::scoring::MatchScorer;

pub(super) fn scorer() -> MatchScorer {
    MatchScorer::default()
}

/// Lisboa T2 flat priced inside the reference range.
pub(super) fn lisboa_flat() -> Property {
    Property {
        id: "MOCK-10001".to_string(),
        location: "Lisboa".to_string(),
        city: "Lisboa".to_string(),
        property_type: Some(PropertyType::Flat),
        typology: Some(Typology::T2),
        price: 150_000,
        wcs: Some(1),
        state: Some(UsageState::Used),
        transport_distance: Some(10),
        agency: Some("Zome".to_string()),
        url: "https://www.zome.pt/property/123456".to_string(),
        source: "Mock Catalog".to_string(),
        features: vec!["elevator".to_string(), "balcony".to_string()],
        area_m2: Some(85),
        year_built: Some(1998),
        energy_rating: Some("B".to_string()),
    }
}

/// Web listing with only the fields a search result reliably carries.
pub(super) fn sparse_listing() -> Property {
    Property {
        id: "WEB-1".to_string(),
        location: "Unknown".to_string(),
        city: "Unknown".to_string(),
        property_type: None,
        typology: None,
        price: 0,
        wcs: None,
        state: None,
        transport_distance: None,
        agency: None,
        url: "#".to_string(),
        source: "Web Search".to_string(),
        features: Vec::new(),
        area_m2: None,
        year_built: None,
        energy_rating: None,
    }
}

pub(super) fn lisboa_requirements() -> SearchRequirements {
    SearchRequirements {
        location: Some("Lisboa".to_string()),
        property_type: Some(PropertyType::Flat),
        typology: vec![Typology::T2],
        price_min: Some(100_000),
        price_max: Some(200_000),
        ..SearchRequirements::for_country("Portugal")
    }
}

pub(super) fn fully_specified_requirements() -> SearchRequirements {
    SearchRequirements {
        wcs: Some(1),
        usage_state: Some(UsageState::Used),
        public_transport: Some(TransportLimit::Minutes(15)),
        ..lisboa_requirements()
    }
}

pub(super) fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}
