//! Property search pipeline: mock catalog generation, filtering, match
//! scoring, ranking and report building, plus the HTTP surface over it.

pub mod config;
pub mod error;
pub mod search;
pub mod telemetry;
