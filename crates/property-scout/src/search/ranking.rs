use super::domain::{Property, SearchRequirements};
use super::scoring::{MatchScorer, ScoreComponent};
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_MIN_MATCH_SCORE: f64 = 0.5;
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// A property with its match score attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProperty {
    #[serde(flatten)]
    pub property: Property,
    pub match_score: f64,
    #[serde(skip)]
    pub components: Vec<ScoreComponent>,
}

/// Scores a batch, drops weak matches and keeps the best `max_results`.
#[derive(Debug, Clone)]
pub struct RankingFilter {
    scorer: MatchScorer,
    min_match_score: f64,
}

impl Default for RankingFilter {
    fn default() -> Self {
        Self::new(MatchScorer::default(), DEFAULT_MIN_MATCH_SCORE)
    }
}

impl RankingFilter {
    pub fn new(scorer: MatchScorer, min_match_score: f64) -> Self {
        Self {
            scorer,
            min_match_score,
        }
    }

    pub fn min_match_score(&self) -> f64 {
        self.min_match_score
    }

    pub fn rank(
        &self,
        properties: Vec<Property>,
        requirements: &SearchRequirements,
        max_results: usize,
    ) -> Vec<RankedProperty> {
        let candidates = properties.len();
        let mut ranked: Vec<RankedProperty> = properties
            .into_iter()
            .filter_map(|property| {
                let outcome = self.scorer.score(&property, requirements);
                (outcome.score >= self.min_match_score).then(|| RankedProperty {
                    property,
                    match_score: outcome.score,
                    components: outcome.components,
                })
            })
            .collect();

        // `sort_by` is stable, so ties keep their input order.
        ranked.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        ranked.truncate(max_results);

        debug!(
            candidates,
            kept = ranked.len(),
            threshold = self.min_match_score,
            "ranked properties"
        );
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::domain::{PropertyType, Typology};
    use crate::search::generator::PropertyGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn requirements() -> SearchRequirements {
        SearchRequirements {
            location: Some("Lisboa".to_string()),
            property_type: Some(PropertyType::Flat),
            typology: vec![Typology::T2, Typology::T3],
            price_min: Some(100_000),
            price_max: Some(300_000),
            ..SearchRequirements::for_country("Portugal")
        }
    }

    fn pool() -> Vec<Property> {
        let mut rng = StdRng::seed_from_u64(23);
        PropertyGenerator::new(30).generate("Portugal", &mut rng)
    }

    #[test]
    fn output_is_sorted_and_above_threshold() {
        let ranked = RankingFilter::default().rank(pool(), &requirements(), 300);

        assert!(!ranked.is_empty());
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].match_score >= pair[1].match_score));
        assert!(ranked
            .iter()
            .all(|entry| entry.match_score >= DEFAULT_MIN_MATCH_SCORE));
    }

    #[test]
    fn output_never_exceeds_max_results() {
        for limit in [0, 1, 5, DEFAULT_MAX_RESULTS] {
            let ranked = RankingFilter::default().rank(pool(), &requirements(), limit);
            assert!(ranked.len() <= limit);
        }
    }

    #[test]
    fn ties_keep_input_order() {
        let template = pool()
            .into_iter()
            .find(|property| property.city == "Lisboa" && property.typology == Some(Typology::T2))
            .expect("lisboa T2 listing");
        let mut batch = Vec::new();
        for index in 0..4 {
            let mut property = template.clone();
            property.id = format!("TIE-{index}");
            batch.push(property);
        }

        let ranked = RankingFilter::default().rank(batch, &requirements(), 10);
        let ids: Vec<_> = ranked.iter().map(|entry| entry.property.id.as_str()).collect();
        assert_eq!(ids, ["TIE-0", "TIE-1", "TIE-2", "TIE-3"]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(RankingFilter::default()
            .rank(Vec::new(), &requirements(), 20)
            .is_empty());
    }

    #[test]
    fn threshold_is_configurable() {
        let strict = RankingFilter::new(MatchScorer::default(), 0.95);
        let ranked = strict.rank(pool(), &requirements(), 300);
        assert!(ranked.iter().all(|entry| entry.match_score >= 0.95));
        assert_eq!(strict.min_match_score(), 0.95);
    }

    #[test]
    fn ranked_properties_carry_their_breakdown() {
        let ranked = RankingFilter::default().rank(pool(), &requirements(), 1);
        let best = ranked.first().expect("at least one match");
        assert_eq!(best.components.len(), 7);

        let json = serde_json::to_value(best).expect("serialize");
        assert!(json.get("components").is_none());
        assert_eq!(json["id"], best.property.id.as_str());
        assert!(json.get("match_score").is_some());
    }
}
