use serde::Serialize;
use std::collections::BTreeMap;

pub const NOT_AVAILABLE: &str = "N/A";

/// One display row of the results table. Column names follow the table headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRow {
    #[serde(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Type")]
    pub property_type: String,
    #[serde(rename = "Typology")]
    pub typology: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "WCs")]
    pub wcs: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Transport (min)")]
    pub transport: String,
    #[serde(rename = "Agency")]
    pub agency: String,
    #[serde(rename = "Match Score")]
    pub match_score: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(skip)]
    pub price_amount: u64,
    #[serde(skip)]
    pub score_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRangeView {
    pub min: String,
    pub max: String,
    pub avg: String,
}

impl PriceRangeView {
    pub fn unavailable() -> Self {
        Self {
            min: NOT_AVAILABLE.to_string(),
            max: NOT_AVAILABLE.to_string(),
            avg: NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRangeView {
    pub avg: String,
    pub best: String,
}

impl ScoreRangeView {
    pub fn unavailable() -> Self {
        Self {
            avg: NOT_AVAILABLE.to_string(),
            best: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Aggregate statistics. An empty result set serializes as `{"total":0}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRangeView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<ScoreRangeView>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub typologies: BTreeMap<String, usize>,
}

impl ReportSummary {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PropertyReport {
    pub table_data: Vec<PropertyRow>,
    pub summary: ReportSummary,
}

impl PropertyReport {
    pub fn is_empty(&self) -> bool {
        self.table_data.is_empty()
    }
}
