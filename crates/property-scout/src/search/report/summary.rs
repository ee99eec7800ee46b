use super::super::domain::SearchRequirements;
use super::super::ranking::RankedProperty;
use super::views::{
    PriceRangeView, PropertyReport, PropertyRow, ReportSummary, ScoreRangeView, NOT_AVAILABLE,
};
use crate::config::reference::currency_for;
use std::collections::BTreeMap;
use tracing::{info, warn};

const UNKNOWN_TYPOLOGY: &str = "Unknown";

/// Turns ranked properties into display rows and summary statistics.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    currency_symbol: String,
    country: String,
    location: String,
    search_type: String,
}

impl ReportBuilder {
    pub fn new(requirements: &SearchRequirements) -> Self {
        let currency_symbol = requirements
            .currency_symbol
            .clone()
            .filter(|symbol| !symbol.trim().is_empty())
            .unwrap_or_else(|| currency_for(&requirements.country).symbol.to_string());

        Self {
            currency_symbol,
            country: requirements.country.clone(),
            location: requirements
                .location
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            search_type: requirements
                .property_type
                .map_or("any", |property_type| property_type.label())
                .to_string(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn build(&self, ranked: &[RankedProperty]) -> PropertyReport {
        if ranked.is_empty() {
            warn!("no properties to report");
            return PropertyReport::default();
        }

        let report = PropertyReport {
            table_data: self.rows(ranked),
            summary: self.summary(ranked),
        };
        info!(rows = report.table_data.len(), "report built");
        report
    }

    pub fn rows(&self, ranked: &[RankedProperty]) -> Vec<PropertyRow> {
        ranked
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let property = &entry.property;
                PropertyRow {
                    rank: index + 1,
                    location: non_blank_or_na(&property.location),
                    property_type: property
                        .property_type
                        .map_or(NOT_AVAILABLE, |property_type| property_type.label())
                        .to_string(),
                    typology: property
                        .typology
                        .map_or(NOT_AVAILABLE, |typology| typology.label())
                        .to_string(),
                    price: format_price(&self.currency_symbol, property.price),
                    wcs: display_or_na(property.wcs),
                    state: property
                        .state
                        .map_or(NOT_AVAILABLE, |state| state.label())
                        .to_string(),
                    transport: display_or_na(property.transport_distance),
                    agency: property
                        .agency
                        .as_deref()
                        .map_or_else(|| NOT_AVAILABLE.to_string(), non_blank_or_na),
                    match_score: format_percentage(entry.match_score),
                    link: non_blank_or_na(&property.url),
                    price_amount: property.price,
                    score_percent: percent(entry.match_score),
                }
            })
            .collect()
    }

    pub fn summary(&self, ranked: &[RankedProperty]) -> ReportSummary {
        if ranked.is_empty() {
            return ReportSummary::empty();
        }

        let prices: Vec<u64> = ranked
            .iter()
            .map(|entry| entry.property.price)
            .filter(|price| *price > 0)
            .collect();
        let scores: Vec<f64> = ranked
            .iter()
            .map(|entry| entry.match_score)
            .filter(|score| *score > 0.0)
            .collect();

        ReportSummary {
            total: ranked.len(),
            search_country: Some(self.country.clone()),
            search_location: Some(self.location.clone()),
            search_type: Some(self.search_type.clone()),
            price_range: Some(self.price_range(&prices)),
            match_score: Some(score_range(&scores)),
            typologies: count_typologies(ranked),
        }
    }

    fn price_range(&self, prices: &[u64]) -> PriceRangeView {
        let (Some(min), Some(max)) = (prices.iter().min(), prices.iter().max()) else {
            return PriceRangeView::unavailable();
        };
        let total: u128 = prices.iter().map(|price| u128::from(*price)).sum();
        let avg = u64::try_from(total / prices.len() as u128).unwrap_or(u64::MAX);

        PriceRangeView {
            min: format_price(&self.currency_symbol, *min),
            max: format_price(&self.currency_symbol, *max),
            avg: format_price(&self.currency_symbol, avg),
        }
    }
}

fn score_range(scores: &[f64]) -> ScoreRangeView {
    if scores.is_empty() {
        return ScoreRangeView::unavailable();
    }
    let avg = scores.iter().sum::<f64>() / scores.len() as f64;
    let best = scores.iter().copied().fold(f64::MIN, f64::max);

    ScoreRangeView {
        avg: format_percentage(avg),
        best: format_percentage(best),
    }
}

fn count_typologies(ranked: &[RankedProperty]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for entry in ranked {
        let key = entry
            .property
            .typology
            .map_or(UNKNOWN_TYPOLOGY, |typology| typology.label());
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Formats an amount with the currency symbol and comma thousands separators.
pub fn format_price(symbol: &str, amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{symbol}{grouped}")
}

/// Formats a score in [0, 1] as a whole percentage.
pub fn format_percentage(score: f64) -> String {
    format!("{}%", percent(score))
}

fn percent(score: f64) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}

fn display_or_na<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |value| value.to_string())
}

fn non_blank_or_na(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}
