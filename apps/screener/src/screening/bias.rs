//! Bias analyzer — scores resume language against four stereotype-correlated
//! categories (gender, age, location, education).
//!
//! Each category score lives in `0.0..=50.0`. The overall score is the plain
//! mean of the four, and `bias_free_score` is its complement to 100.

use serde::{Deserialize, Serialize};

use crate::screening::patterns::{
    distinct_hits, match_count, occurrences, AGE_PATTERNS, AGE_TERMS, EDUCATION_TERMS,
    FEMALE_TERMS, LOCATION_PATTERNS, LOCATION_TERMS, MALE_TERMS, NEUTRAL_TERMS,
    PRESTIGE_PATTERNS,
};

pub const MAX_CATEGORY_SCORE: f64 = 50.0;

/// A category score above this attaches recommendations.
pub const RECOMMENDATION_THRESHOLD: f64 = 10.0;

pub const NO_BIAS_MESSAGE: &str =
    "No significant bias detected - good job maintaining fair language!";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBias {
    pub score: f64,
    pub indicator_count: usize,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderBias {
    pub score: f64,
    pub indicator_count: usize,
    pub male_terms: usize,
    pub female_terms: usize,
    /// Tracked for reporting only; never moves the score.
    pub neutral_terms: usize,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    pub gender_bias: GenderBias,
    pub age_bias: CategoryBias,
    pub location_bias: CategoryBias,
    pub education_bias: CategoryBias,
    pub overall_bias_score: f64,
    pub bias_free_score: f64,
    pub bias_recommendations: Vec<String>,
}

impl BiasReport {
    /// The four category scores in a fixed order: gender, age, location, education.
    pub fn category_scores(&self) -> [f64; 4] {
        [
            self.gender_bias.score,
            self.age_bias.score,
            self.location_bias.score,
            self.education_bias.score,
        ]
    }
}

/// Analyzes `text` for bias indicators. Total over any input, including "".
pub fn analyze_bias(text: &str) -> BiasReport {
    let text_lower = text.to_lowercase();

    let gender_bias = detect_gender_bias(&text_lower);
    let age_bias = detect_age_bias(&text_lower);
    let location_bias = detect_location_bias(&text_lower);
    let education_bias = detect_education_bias(&text_lower);

    let mut report = BiasReport {
        gender_bias,
        age_bias,
        location_bias,
        education_bias,
        overall_bias_score: 0.0,
        bias_free_score: 100.0,
        bias_recommendations: Vec::new(),
    };

    let scores = report.category_scores();
    report.overall_bias_score = scores.iter().sum::<f64>() / scores.len() as f64;
    report.bias_free_score = 100.0 - report.overall_bias_score;
    report.bias_recommendations = build_recommendations(&scores);
    report
}

fn clamp_score(raw: f64) -> f64 {
    raw.clamp(0.0, MAX_CATEGORY_SCORE)
}

fn recommendation_for(score: f64, text: &str) -> Option<String> {
    (score > RECOMMENDATION_THRESHOLD).then(|| text.to_string())
}

/// Gender counts are the number of distinct listed terms present as substrings,
/// so "he" also fires inside "the". The imbalance ratio drives the score.
fn detect_gender_bias(text: &str) -> GenderBias {
    let male_terms = distinct_hits(text, MALE_TERMS);
    let female_terms = distinct_hits(text, FEMALE_TERMS);
    let neutral_terms = distinct_hits(text, NEUTRAL_TERMS);

    let score = if male_terms + female_terms > 0 {
        let (high, low) = if male_terms > female_terms {
            (male_terms, female_terms)
        } else {
            (female_terms, male_terms)
        };
        let imbalance_ratio = high as f64 / (low as f64 + 1.0);
        clamp_score(imbalance_ratio * 10.0)
    } else {
        0.0
    };

    GenderBias {
        score,
        indicator_count: male_terms + female_terms,
        male_terms,
        female_terms,
        neutral_terms,
        recommendation: recommendation_for(score, "Use gender-neutral language"),
    }
}

fn detect_age_bias(text: &str) -> CategoryBias {
    let indicator_count = match_count(text, &AGE_PATTERNS)
        + AGE_TERMS
            .iter()
            .map(|term| occurrences(text, term))
            .sum::<usize>();
    let score = clamp_score(indicator_count as f64 * 5.0);

    CategoryBias {
        score,
        indicator_count,
        recommendation: recommendation_for(
            score,
            "Focus on skills and experience rather than age",
        ),
    }
}

fn detect_location_bias(text: &str) -> CategoryBias {
    let indicator_count = LOCATION_TERMS
        .iter()
        .map(|term| occurrences(text, term))
        .sum::<usize>()
        + match_count(text, &LOCATION_PATTERNS);
    let score = clamp_score(indicator_count as f64 * 3.0);

    CategoryBias {
        score,
        indicator_count,
        recommendation: recommendation_for(score, "Consider remote work capabilities"),
    }
}

fn detect_education_bias(text: &str) -> CategoryBias {
    let indicator_count = EDUCATION_TERMS
        .iter()
        .map(|term| occurrences(text, term))
        .sum::<usize>()
        + match_count(text, &PRESTIGE_PATTERNS);
    let score = clamp_score(indicator_count as f64 * 4.0);

    CategoryBias {
        score,
        indicator_count,
        recommendation: recommendation_for(score, "Value all educational backgrounds equally"),
    }
}

const CATEGORY_ADVICE: [[&str; 2]; 4] = [
    [
        "Use gender-neutral language in job descriptions",
        "Focus on skills and experience rather than gender-specific terms",
    ],
    [
        "Emphasize skills and competencies over years of experience",
        "Consider transferable skills from various career stages",
    ],
    [
        "Highlight remote work opportunities",
        "Focus on timezone compatibility rather than location",
    ],
    [
        "Value all educational institutions equally",
        "Consider practical experience alongside formal education",
    ],
];

fn build_recommendations(scores: &[f64; 4]) -> Vec<String> {
    let mut recommendations: Vec<String> = scores
        .iter()
        .zip(CATEGORY_ADVICE.iter())
        .filter(|(score, _)| **score > RECOMMENDATION_THRESHOLD)
        .flat_map(|(_, advice)| advice.iter().map(|s| s.to_string()))
        .collect();

    if recommendations.is_empty() {
        recommendations.push(NO_BIAS_MESSAGE.to_string());
    }
    recommendations
}
