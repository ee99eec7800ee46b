use super::catalog::find_by_id;
use super::domain::{Property, PropertyType, Typology, UsageState};
use crate::config::reference::{
    cities_for, price_band, AGENCIES, AMENITIES, ENERGY_RATINGS, GREATER_LISBON,
    LISBON_DISTRICTS, TRANSPORT_MINUTES,
};
use chrono::{Datelike, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use tracing::debug;

const ID_FLOOR: usize = 10_000;
const ID_CEILING: usize = 99_999;

/// Builds a synthetic property pool for a country.
///
/// Each city receives `properties_per_city` listings split evenly between
/// flats and houses (houses take the remainder). Typologies are assigned
/// round-robin within each half so every typology is represented. Ids are
/// `MOCK-<5 digits>` counted up from a random base, so they never repeat
/// within a pool.
#[derive(Debug, Clone)]
pub struct PropertyGenerator {
    properties_per_city: usize,
    current_year: i32,
}

impl PropertyGenerator {
    pub fn new(properties_per_city: usize) -> Self {
        Self {
            properties_per_city,
            current_year: Local::now().year(),
        }
    }

    pub fn properties_per_city(&self) -> usize {
        self.properties_per_city
    }

    pub fn generate<R: Rng + ?Sized>(&self, country: &str, rng: &mut R) -> Vec<Property> {
        let cities = cities_for(country);
        let flats = self.properties_per_city / 2;
        let houses = self.properties_per_city - flats;
        let total = cities.len() * self.properties_per_city;
        let mut properties = Vec::with_capacity(total);
        let first_id = rng.gen_range(ID_FLOOR..=ID_CEILING.saturating_sub(total).max(ID_FLOOR));

        for city in &cities {
            for (property_type, count) in [(PropertyType::Flat, flats), (PropertyType::House, houses)]
            {
                for typology in Typology::ordered().into_iter().cycle().take(count) {
                    let mut property = self.generate_listing(city, property_type, typology, rng);
                    property.id = format!("MOCK-{:05}", first_id + properties.len());
                    properties.push(property);
                }
            }
        }

        debug!(
            country,
            cities = cities.len(),
            total = properties.len(),
            "generated mock property pool"
        );
        properties
    }

    /// Draws one listing. The id is random here; `generate` replaces it with
    /// the pool's running counter.
    pub fn generate_listing<R: Rng + ?Sized>(
        &self,
        city: &str,
        property_type: PropertyType,
        typology: Typology,
        rng: &mut R,
    ) -> Property {
        let band = price_band(typology);
        let price = rng.gen_range(band.min..=band.max);

        let wcs = match typology {
            Typology::T0 | Typology::T1 => 1,
            Typology::T2 => rng.gen_range(1..=2),
            Typology::T3 | Typology::T4 | Typology::T4Plus => rng.gen_range(2..=3),
        };

        let states = UsageState::ordered();
        let state = states[rng.gen_range(0..states.len())];
        let transport_distance = TRANSPORT_MINUTES[rng.gen_range(0..TRANSPORT_MINUTES.len())];

        let location = if GREATER_LISBON.contains(&city) {
            let district = LISBON_DISTRICTS[rng.gen_range(0..LISBON_DISTRICTS.len())];
            format!("{city}, {district}, Setúbal")
        } else {
            format!("{city}, {city} District")
        };

        let agency = AGENCIES[rng.gen_range(0..AGENCIES.len())];
        let url = format!(
            "https://www.{}.pt/property/{}",
            agency.to_lowercase().replace(' ', ""),
            rng.gen_range(100_000..=999_999)
        );

        let feature_count = rng.gen_range(2..=5);
        let features = AMENITIES
            .choose_multiple(rng, feature_count)
            .map(|feature| feature.to_string())
            .collect();

        let year_built = if state == UsageState::BrandNew {
            self.current_year
        } else {
            rng.gen_range(1960..=self.current_year)
        };

        Property {
            id: format!("MOCK-{}", rng.gen_range(10_000..=99_999)),
            location,
            city: city.to_string(),
            property_type: Some(property_type),
            typology: Some(typology),
            price,
            wcs: Some(wcs),
            state: Some(state),
            transport_distance: Some(transport_distance),
            agency: Some(agency.to_string()),
            url,
            source: "Mock Catalog".to_string(),
            features,
            area_m2: Some(rng.gen_range(40..=200)),
            year_built: Some(year_built),
            energy_rating: Some(ENERGY_RATINGS[rng.gen_range(0..ENERGY_RATINGS.len())].to_string()),
        }
    }
}

/// In-memory pool for the most recently searched country.
///
/// The pool is handed out as a shared immutable slice and replaced wholesale
/// when the country changes, so readers holding an older pool are unaffected.
#[derive(Debug)]
pub struct MockCatalog {
    generator: PropertyGenerator,
    country: String,
    properties: Arc<[Property]>,
}

impl MockCatalog {
    pub fn new(generator: PropertyGenerator, country: &str) -> Self {
        let properties = generator.generate(country, &mut rand::thread_rng()).into();
        Self {
            generator,
            country: country.to_string(),
            properties,
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn properties(&self) -> Arc<[Property]> {
        Arc::clone(&self.properties)
    }

    /// Rebuilds the pool for `country`, discarding the previous one.
    pub fn regenerate(&mut self, country: &str) -> Arc<[Property]> {
        self.regenerate_with(country, &mut rand::thread_rng())
    }

    pub fn regenerate_with<R: Rng + ?Sized>(
        &mut self,
        country: &str,
        rng: &mut R,
    ) -> Arc<[Property]> {
        debug!(
            from = %self.country,
            to = country,
            per_city = self.generator.properties_per_city(),
            "regenerating mock catalog"
        );
        self.properties = self.generator.generate(country, rng).into();
        self.country = country.to_string();
        self.properties()
    }

    /// Whether the cached pool was built for `country`, ignoring case and padding.
    pub fn is_for(&self, country: &str) -> bool {
        self.country.trim().eq_ignore_ascii_case(country.trim())
    }

    /// Returns the pool for `country`, regenerating only when it differs from the cached one.
    pub fn pool_for(&mut self, country: &str) -> Arc<[Property]> {
        if self.is_for(country) {
            self.properties()
        } else {
            self.regenerate(country)
        }
    }

    pub fn find(&self, property_id: &str) -> Option<&Property> {
        find_by_id(&self.properties, property_id)
    }
}
