//! Career trajectory — phrase patterns for growth velocity and leadership signal.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::screening::patterns::{
    patterns_hit, LEADERSHIP_POTENTIAL_PATTERNS, RAPID_GROWTH_PATTERNS,
    STEADY_PROGRESSION_PATTERNS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryComponent {
    RapidGrowth,
    SteadyProgression,
    LeadershipPotential,
}

impl TrajectoryComponent {
    pub const ALL: [TrajectoryComponent; 3] = [
        TrajectoryComponent::RapidGrowth,
        TrajectoryComponent::SteadyProgression,
        TrajectoryComponent::LeadershipPotential,
    ];

    /// Human-readable label, e.g. "rapid growth".
    pub fn label(self) -> &'static str {
        match self {
            TrajectoryComponent::RapidGrowth => "rapid growth",
            TrajectoryComponent::SteadyProgression => "steady progression",
            TrajectoryComponent::LeadershipPotential => "leadership potential",
        }
    }

    fn patterns(self) -> &'static [Regex] {
        match self {
            TrajectoryComponent::RapidGrowth => &RAPID_GROWTH_PATTERNS,
            TrajectoryComponent::SteadyProgression => &STEADY_PROGRESSION_PATTERNS,
            TrajectoryComponent::LeadershipPotential => &LEADERSHIP_POTENTIAL_PATTERNS,
        }
    }

    fn points_per_hit(self) -> f64 {
        match self {
            TrajectoryComponent::RapidGrowth => 25.0,
            TrajectoryComponent::SteadyProgression => 20.0,
            TrajectoryComponent::LeadershipPotential => 15.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryComponents {
    pub rapid_growth: f64,
    pub steady_progression: f64,
    pub leadership_potential: f64,
}

impl TrajectoryComponents {
    pub fn get(&self, component: TrajectoryComponent) -> f64 {
        match component {
            TrajectoryComponent::RapidGrowth => self.rapid_growth,
            TrajectoryComponent::SteadyProgression => self.steady_progression,
            TrajectoryComponent::LeadershipPotential => self.leadership_potential,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TrajectoryComponent, f64)> + '_ {
        TrajectoryComponent::ALL
            .into_iter()
            .map(|c| (c, self.get(c)))
    }

    pub fn mean(&self) -> f64 {
        (self.rapid_growth + self.steady_progression + self.leadership_potential) / 3.0
    }

    /// 0.4·rapid + 0.3·steady + 0.3·leadership
    pub fn weighted(&self) -> f64 {
        self.rapid_growth * 0.4 + self.steady_progression * 0.3 + self.leadership_potential * 0.3
    }
}

/// Four fixed growth bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthPrediction {
    #[serde(rename = "High potential for senior leadership roles")]
    SeniorLeadership,
    #[serde(rename = "Strong potential for mid-level advancement")]
    MidLevelAdvancement,
    #[serde(rename = "Moderate growth potential with development")]
    ModerateGrowth,
    #[serde(rename = "May benefit from additional experience and skill development")]
    NeedsExperience,
}

impl GrowthPrediction {
    pub fn classify(components: &TrajectoryComponents, years_experience: u32) -> Self {
        let avg = components.mean();
        if avg >= 70.0 && years_experience >= 5 {
            GrowthPrediction::SeniorLeadership
        } else if avg >= 50.0 && years_experience >= 3 {
            GrowthPrediction::MidLevelAdvancement
        } else if avg >= 30.0 {
            GrowthPrediction::ModerateGrowth
        } else {
            GrowthPrediction::NeedsExperience
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryResult {
    pub overall_trajectory_score: f64,
    pub trajectory_components: TrajectoryComponents,
    pub senior_role_potential: f64,
    pub growth_prediction: GrowthPrediction,
    pub recommendations: Vec<String>,
}

/// Each pattern contributes at most once, however often it matches.
pub fn predict_career_trajectory(text: &str, years_experience: u32) -> TrajectoryResult {
    let text_lower = text.to_lowercase();
    let score = |component: TrajectoryComponent| {
        let hits = patterns_hit(&text_lower, component.patterns());
        (hits as f64 * component.points_per_hit()).min(100.0)
    };

    let components = TrajectoryComponents {
        rapid_growth: score(TrajectoryComponent::RapidGrowth),
        steady_progression: score(TrajectoryComponent::SteadyProgression),
        leadership_potential: score(TrajectoryComponent::LeadershipPotential),
    };

    TrajectoryResult {
        overall_trajectory_score: components.weighted(),
        senior_role_potential: senior_role_potential(years_experience, &components),
        growth_prediction: GrowthPrediction::classify(&components, years_experience),
        recommendations: trajectory_recommendations(&components),
        trajectory_components: components,
    }
}

/// Mean of an experience factor (5 points per year, capped at 100) and a
/// leadership-weighted trajectory factor.
pub fn senior_role_potential(years_experience: u32, components: &TrajectoryComponents) -> f64 {
    let base = (years_experience as f64 * 5.0).min(100.0);
    let trajectory_factor = components.leadership_potential * 0.5
        + components.rapid_growth * 0.3
        + components.steady_progression * 0.2;
    (base + trajectory_factor) / 2.0
}

fn trajectory_recommendations(components: &TrajectoryComponents) -> Vec<String> {
    let mut recommendations = Vec::new();
    if components.leadership_potential < 50.0 {
        recommendations.push("Seek leadership opportunities and team management roles".to_string());
    }
    if components.rapid_growth < 50.0 {
        recommendations.push(
            "Consider roles with clear advancement paths and growth opportunities".to_string(),
        );
    }
    if recommendations.is_empty() {
        recommendations.push("Strong career progression - continue current trajectory".to_string());
    }
    recommendations
}
