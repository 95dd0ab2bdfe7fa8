//! Culture fit — keyword density across six organizational value dimensions.

use serde::{Deserialize, Serialize};

use crate::screening::patterns::{
    distinct_hits, COLLABORATION_KEYWORDS, EXCELLENCE_KEYWORDS, GROWTH_KEYWORDS,
    INNOVATION_KEYWORDS, INTEGRITY_KEYWORDS, LEADERSHIP_KEYWORDS,
};

const POINTS_PER_HIT: f64 = 20.0;
const RECOMMENDATION_BELOW: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CultureDimension {
    Leadership,
    Collaboration,
    Innovation,
    Excellence,
    Integrity,
    Growth,
}

impl CultureDimension {
    pub const ALL: [CultureDimension; 6] = [
        CultureDimension::Leadership,
        CultureDimension::Collaboration,
        CultureDimension::Innovation,
        CultureDimension::Excellence,
        CultureDimension::Integrity,
        CultureDimension::Growth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CultureDimension::Leadership => "leadership",
            CultureDimension::Collaboration => "collaboration",
            CultureDimension::Innovation => "innovation",
            CultureDimension::Excellence => "excellence",
            CultureDimension::Integrity => "integrity",
            CultureDimension::Growth => "growth",
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            CultureDimension::Leadership => LEADERSHIP_KEYWORDS,
            CultureDimension::Collaboration => COLLABORATION_KEYWORDS,
            CultureDimension::Innovation => INNOVATION_KEYWORDS,
            CultureDimension::Excellence => EXCELLENCE_KEYWORDS,
            CultureDimension::Integrity => INTEGRITY_KEYWORDS,
            CultureDimension::Growth => GROWTH_KEYWORDS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CultureDimensionScores {
    pub leadership: f64,
    pub collaboration: f64,
    pub innovation: f64,
    pub excellence: f64,
    pub integrity: f64,
    pub growth: f64,
}

impl CultureDimensionScores {
    pub fn get(&self, dimension: CultureDimension) -> f64 {
        match dimension {
            CultureDimension::Leadership => self.leadership,
            CultureDimension::Collaboration => self.collaboration,
            CultureDimension::Innovation => self.innovation,
            CultureDimension::Excellence => self.excellence,
            CultureDimension::Integrity => self.integrity,
            CultureDimension::Growth => self.growth,
        }
    }

    fn set(&mut self, dimension: CultureDimension, score: f64) {
        let slot = match dimension {
            CultureDimension::Leadership => &mut self.leadership,
            CultureDimension::Collaboration => &mut self.collaboration,
            CultureDimension::Innovation => &mut self.innovation,
            CultureDimension::Excellence => &mut self.excellence,
            CultureDimension::Integrity => &mut self.integrity,
            CultureDimension::Growth => &mut self.growth,
        };
        *slot = score;
    }

    /// Scores in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (CultureDimension, f64)> + '_ {
        CultureDimension::ALL.into_iter().map(|d| (d, self.get(d)))
    }

    pub fn mean(&self) -> f64 {
        self.iter().map(|(_, score)| score).sum::<f64>() / CultureDimension::ALL.len() as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CultureFitResult {
    /// Mean of the six dimension scores. Company fit is not folded in.
    pub overall_score: f64,
    pub dimension_scores: CultureDimensionScores,
    /// Present only when a non-empty list of company values was supplied.
    pub company_fit_score: Option<f64>,
    pub total_indicators: usize,
    pub recommendations: Vec<String>,
}

pub fn analyze_culture_fit(text: &str, company_values: Option<&[String]>) -> CultureFitResult {
    let text_lower = text.to_lowercase();

    let mut dimension_scores = CultureDimensionScores::default();
    let mut total_indicators = 0;
    for dimension in CultureDimension::ALL {
        let hits = distinct_hits(&text_lower, dimension.keywords());
        dimension_scores.set(dimension, (hits as f64 * POINTS_PER_HIT).min(100.0));
        total_indicators += hits;
    }

    let company_fit_score = company_values
        .filter(|values| !values.is_empty())
        .map(|values| {
            let matched = values
                .iter()
                .filter(|value| text_lower.contains(&value.to_lowercase()))
                .count();
            matched as f64 / values.len() as f64 * 100.0
        });

    CultureFitResult {
        overall_score: dimension_scores.mean(),
        recommendations: culture_recommendations(&dimension_scores),
        dimension_scores,
        company_fit_score,
        total_indicators,
    }
}

fn culture_recommendations(scores: &CultureDimensionScores) -> Vec<String> {
    let recommendations: Vec<String> = scores
        .iter()
        .filter(|(_, score)| *score < RECOMMENDATION_BELOW)
        .map(|(dimension, _)| {
            format!(
                "Consider highlighting {} experiences in resume and interviews",
                dimension.as_str()
            )
        })
        .collect();

    if recommendations.is_empty() {
        vec!["Strong cultural alignment - maintain current positioning".to_string()]
    } else {
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaboration_only_text() {
        let result = analyze_culture_fit("team collaborate together", None);
        assert_eq!(result.dimension_scores.collaboration, 60.0);
        assert_eq!(result.dimension_scores.leadership, 0.0);
        assert!((result.overall_score - 10.0).abs() < 1e-9);
        assert_eq!(result.total_indicators, 3);
        assert!(result.company_fit_score.is_none());
    }

    #[test]
    fn test_dimension_score_caps_at_100() {
        let text = "lead manage direct supervise mentor guide influence";
        let result = analyze_culture_fit(text, None);
        assert_eq!(result.dimension_scores.leadership, 100.0);
    }

    #[test]
    fn test_company_fit_is_fraction_of_values_found() {
        let values = vec![
            "Customer Obsession".to_string(),
            "ownership".to_string(),
            "frugality".to_string(),
            "bias for action".to_string(),
        ];
        let text = "Known for customer obsession and ownership of outcomes.";
        let result = analyze_culture_fit(text, Some(values.as_slice()));
        assert_eq!(result.company_fit_score, Some(50.0));
    }

    #[test]
    fn test_empty_company_values_are_guarded() {
        let result = analyze_culture_fit("anything", Some(Vec::<String>::new().as_slice()));
        assert!(result.company_fit_score.is_none());
    }

    #[test]
    fn test_company_fit_does_not_change_overall() {
        let values = vec!["team".to_string()];
        let with = analyze_culture_fit("team player", Some(values.as_slice()));
        let without = analyze_culture_fit("team player", None);
        assert_eq!(with.overall_score, without.overall_score);
        assert_eq!(with.company_fit_score, Some(100.0));
    }

    #[test]
    fn test_recommendations_for_weak_dimensions() {
        let result = analyze_culture_fit("", None);
        assert_eq!(result.recommendations.len(), 6);
        assert_eq!(
            result.recommendations[0],
            "Consider highlighting leadership experiences in resume and interviews"
        );
    }

    #[test]
    fn test_strong_alignment_message() {
        let text = "lead manage direct team collaborate cooperate innovate creative innovative \
                    quality excellence best ethical honest transparent learn grow improve";
        let result = analyze_culture_fit(text, None);
        assert!(result.dimension_scores.iter().all(|(_, s)| s >= 50.0));
        assert_eq!(
            result.recommendations,
            vec!["Strong cultural alignment - maintain current positioning"]
        );
    }
}
