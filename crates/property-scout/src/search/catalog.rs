use super::domain::{Property, SearchRequirements};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// AND-combined attribute filter over a property pool.
///
/// Each criterion is skipped when its requirement is absent. Transport limits
/// that did not parse as minutes are ignored here; the scorer still weighs them.
#[derive(Debug, Clone, Copy)]
pub struct SearchFilter<'a> {
    requirements: &'a SearchRequirements,
}

impl<'a> SearchFilter<'a> {
    pub fn new(requirements: &'a SearchRequirements) -> Self {
        Self { requirements }
    }

    pub fn matches(&self, property: &Property) -> bool {
        self.location(property)
            && self.property_type(property)
            && self.typology(property)
            && self.price(property)
            && self.wcs(property)
            && self.usage_state(property)
            && self.transport(property)
    }

    /// Filters, shuffles and truncates `pool` to the requested result count.
    pub fn apply<R: Rng + ?Sized>(&self, pool: &[Property], rng: &mut R) -> Vec<Property> {
        let mut results: Vec<Property> = pool.to_vec();
        debug!(count = results.len(), "filtering property pool");

        let stages: [(&str, fn(&Self, &Property) -> bool); 7] = [
            ("location", Self::location),
            ("type", Self::property_type),
            ("typology", Self::typology),
            ("price", Self::price),
            ("wcs", Self::wcs),
            ("usage_state", Self::usage_state),
            ("transport", Self::transport),
        ];
        for (stage, keep) in stages {
            results.retain(|property| keep(self, property));
            debug!(stage, count = results.len(), "after filter");
        }

        results.shuffle(rng);
        if let Some(limit) = self.requirements.max_results {
            results.truncate(limit);
        }
        results
    }

    fn location(&self, property: &Property) -> bool {
        self.requirements
            .location
            .as_deref()
            .map_or(true, |needle| property.matches_location(needle))
    }

    fn property_type(&self, property: &Property) -> bool {
        self.requirements
            .property_type
            .map_or(true, |wanted| property.property_type == Some(wanted))
    }

    fn typology(&self, property: &Property) -> bool {
        if self.requirements.typology.is_empty() {
            return true;
        }
        property
            .typology
            .is_some_and(|typology| self.requirements.typology.contains(&typology))
    }

    fn price(&self, property: &Property) -> bool {
        self.requirements.price_in_range(property.price)
    }

    fn wcs(&self, property: &Property) -> bool {
        self.requirements
            .wcs
            .map_or(true, |wanted| property.wcs == Some(wanted))
    }

    fn usage_state(&self, property: &Property) -> bool {
        self.requirements
            .usage_state
            .map_or(true, |wanted| property.state == Some(wanted))
    }

    fn transport(&self, property: &Property) -> bool {
        match self
            .requirements
            .public_transport
            .as_ref()
            .and_then(|limit| limit.minutes())
        {
            Some(limit) => property
                .transport_distance
                .is_some_and(|distance| distance <= limit),
            None => true,
        }
    }
}

/// Looks up a property by id.
pub fn find_by_id<'p>(pool: &'p [Property], property_id: &str) -> Option<&'p Property> {
    pool.iter().find(|property| property.id == property_id)
}
