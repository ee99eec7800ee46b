//! The search pipeline: generate or receive candidates, filter, score, rank
//! and report.

pub mod catalog;
pub mod domain;
pub mod generator;
pub mod listings;
pub mod pipeline;
pub mod ranking;
pub mod report;
pub mod request;
pub mod router;
pub mod scoring;

pub use catalog::SearchFilter;
pub use domain::{
    Property, PropertyType, SearchRequirements, TransportLimit, Typology, UsageState,
};
pub use generator::{MockCatalog, PropertyGenerator};
pub use listings::{normalize_listings, parse_listing_document, ListingError, WebListing};
pub use pipeline::{ResultSource, SearchResults, SearchService};
pub use ranking::{RankedProperty, RankingFilter};
pub use report::{PropertyReport, ReportBuilder, ReportSummary};
pub use request::{RequestError, SearchRequest};
pub use router::search_router;
pub use scoring::{MatchScore, MatchScorer, ScoreCategory, ScoreComponent, ScoringWeights};
