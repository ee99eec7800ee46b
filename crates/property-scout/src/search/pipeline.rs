use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::catalog::SearchFilter;
use super::domain::{Property, SearchRequirements};
use super::generator::{MockCatalog, PropertyGenerator};
use super::listings::{normalize_listings, WebListing};
use super::ranking::{RankedProperty, RankingFilter};
use super::report::{rows_to_csv, PropertyRow, ReportBuilder, ReportSummary};
use super::request::{RequestError, SearchRequest};
use super::scoring::MatchScorer;
use crate::config::SearchConfig;

/// Where the candidates for a search came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    Web,
    Mock,
}

impl ResultSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mock => "mock",
        }
    }
}

/// Response payload for a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub table_data: Vec<PropertyRow>,
    pub summary: ReportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_csv: Option<String>,
    pub source: ResultSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub ranked: Vec<RankedProperty>,
}

/// Runs searches end to end: candidate selection, dedupe, ranking and reporting.
///
/// The mock pool is the only state shared between requests. It is cached for
/// the last searched country and swapped out whole when the country changes.
#[derive(Debug)]
pub struct SearchService {
    config: SearchConfig,
    catalog: Mutex<MockCatalog>,
    ranking: RankingFilter,
}

impl SearchService {
    pub fn new(config: SearchConfig) -> Self {
        let generator = PropertyGenerator::new(config.properties_per_city);
        let catalog = MockCatalog::new(generator, &config.default_country);
        let ranking = RankingFilter::new(MatchScorer::default(), config.min_match_score);

        Self {
            config,
            catalog: Mutex::new(catalog),
            ranking,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Validates a boundary request and runs it.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResults, RequestError> {
        let requirements = request.to_requirements(&self.config)?;
        Ok(self.run(&requirements, request.web_listings.clone()))
    }

    /// Re-runs `previous` with `refinements` layered on top.
    pub fn refine(
        &self,
        previous: &SearchRequest,
        refinements: &SearchRequest,
    ) -> Result<SearchResults, RequestError> {
        self.search(&previous.merge(refinements))
    }

    pub fn run(
        &self,
        requirements: &SearchRequirements,
        web_listings: Option<Vec<WebListing>>,
    ) -> SearchResults {
        let (source, candidates) = self.candidates(requirements, web_listings);
        let candidates = dedupe(candidates);
        let max_results = requirements
            .max_results
            .unwrap_or(self.config.max_results);

        let ranked = self.ranking.rank(candidates, requirements, max_results);
        info!(
            source = source.label(),
            country = %requirements.country,
            ranked = ranked.len(),
            "search ranked"
        );

        let report = ReportBuilder::new(requirements).build(&ranked);
        let (export_csv, error) = if report.is_empty() {
            (None, None)
        } else {
            match rows_to_csv(&report.table_data) {
                Ok(csv) => (Some(csv), None),
                Err(err) => {
                    warn!(error = %err, "csv export failed");
                    (None, Some(err.to_string()))
                }
            }
        };

        SearchResults {
            table_data: report.table_data,
            summary: report.summary,
            export_csv,
            source,
            error,
            ranked,
        }
    }

    /// Looks up a listing in the cached mock pool.
    ///
    /// Lookups never regenerate the pool. When `country` names a different
    /// country than the cached one, the listing cannot be in it and `None` is
    /// returned.
    pub fn find_property(&self, country: Option<&str>, property_id: &str) -> Option<Property> {
        let catalog = self.lock_catalog();
        let country = country
            .map(str::trim)
            .filter(|country| !country.is_empty());
        if let Some(country) = country {
            if !catalog.is_for(country) {
                debug!(country, cached = catalog.country(), "lookup country not cached");
                return None;
            }
        }
        catalog.find(property_id).cloned()
    }

    fn candidates(
        &self,
        requirements: &SearchRequirements,
        web_listings: Option<Vec<WebListing>>,
    ) -> (ResultSource, Vec<Property>) {
        if self.config.web_listings_enabled {
            if let Some(listings) = web_listings.filter(|listings| !listings.is_empty()) {
                let properties = normalize_listings(listings);
                if !properties.is_empty() {
                    info!(count = properties.len(), "using web listings");
                    return (ResultSource::Web, properties);
                }
                warn!("web listings normalized to nothing, falling back to mock catalog");
            }
        }

        let pool = self.lock_catalog().pool_for(&requirements.country);
        let criteria = hard_criteria(requirements);
        let candidates = SearchFilter::new(&criteria).apply(&pool, &mut rand::thread_rng());
        info!(
            pool = pool.len(),
            candidates = candidates.len(),
            "using mock catalog"
        );
        (ResultSource::Mock, candidates)
    }

    fn lock_catalog(&self) -> MutexGuard<'_, MockCatalog> {
        self.catalog
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Criteria the mock catalog filters on. Bathrooms, condition and transport
/// are left to the scorer so near misses can still rank.
fn hard_criteria(requirements: &SearchRequirements) -> SearchRequirements {
    SearchRequirements {
        wcs: None,
        usage_state: None,
        public_transport: None,
        ..requirements.clone()
    }
}

/// Keeps the first property for each (location, typology, price).
pub fn dedupe(properties: Vec<Property>) -> Vec<Property> {
    let mut seen = HashSet::new();
    properties
        .into_iter()
        .filter(|property| {
            seen.insert((
                property.location.trim().to_lowercase(),
                property.typology,
                property.price,
            ))
        })
        .collect()
}
