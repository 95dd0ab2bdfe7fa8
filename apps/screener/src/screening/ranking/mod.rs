//! Advanced ranking — combines culture fit, career trajectory and skill gaps
//! into a single score, a tier, and human-readable strengths/development areas.

pub mod culture;
pub mod skills;
pub mod trajectory;

use serde::{Deserialize, Serialize};

pub use culture::{analyze_culture_fit, CultureFitResult};
pub use skills::{analyze_skill_gaps, extract_job_requirements, SkillGapResult};
pub use trajectory::{predict_career_trajectory, TrajectoryResult};

const STRENGTH_THRESHOLD: f64 = 60.0;
const DEVELOPMENT_THRESHOLD: f64 = 40.0;
const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RankingTier {
    #[serde(rename = "Needs Significant Development")]
    NeedsSignificantDevelopment,
    #[serde(rename = "Potential with Development")]
    PotentialWithDevelopment,
    #[serde(rename = "Qualified Candidate")]
    QualifiedCandidate,
    #[serde(rename = "Strong Candidate")]
    StrongCandidate,
    #[serde(rename = "High Potential")]
    HighPotential,
    #[serde(rename = "Elite Candidate")]
    EliteCandidate,
}

impl RankingTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            RankingTier::EliteCandidate
        } else if score >= 70.0 {
            RankingTier::HighPotential
        } else if score >= 60.0 {
            RankingTier::StrongCandidate
        } else if score >= 50.0 {
            RankingTier::QualifiedCandidate
        } else if score >= 40.0 {
            RankingTier::PotentialWithDevelopment
        } else {
            RankingTier::NeedsSignificantDevelopment
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RankingTier::NeedsSignificantDevelopment => "Needs Significant Development",
            RankingTier::PotentialWithDevelopment => "Potential with Development",
            RankingTier::QualifiedCandidate => "Qualified Candidate",
            RankingTier::StrongCandidate => "Strong Candidate",
            RankingTier::HighPotential => "High Potential",
            RankingTier::EliteCandidate => "Elite Candidate",
        }
    }
}

/// Optional context for a ranking run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingOptions<'a> {
    pub job_description: Option<&'a str>,
    pub company_values: Option<&'a [String]>,
    pub years_experience: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedRanking {
    /// 0.3·culture + 0.3·trajectory + 0.4·skills
    pub overall_advanced_score: f64,
    pub ranking_tier: RankingTier,
    pub culture_fit_analysis: CultureFitResult,
    pub career_trajectory_analysis: TrajectoryResult,
    pub skill_gap_analysis: SkillGapResult,
    pub key_strengths: Vec<String>,
    pub development_areas: Vec<String>,
    pub recommendations: Vec<String>,
}

pub fn analyze_advanced_ranking(text: &str, options: RankingOptions<'_>) -> AdvancedRanking {
    let job_requirements = options
        .job_description
        .map(extract_job_requirements)
        .unwrap_or_default();

    let culture = analyze_culture_fit(text, options.company_values);
    let trajectory = predict_career_trajectory(text, options.years_experience);
    let skills = analyze_skill_gaps(text, &job_requirements);

    let overall_advanced_score = culture.overall_score * 0.3
        + trajectory.overall_trajectory_score * 0.3
        + skills.overall_skill_coverage * 0.4;

    AdvancedRanking {
        overall_advanced_score,
        ranking_tier: RankingTier::from_score(overall_advanced_score),
        key_strengths: key_strengths(&culture, &trajectory, &skills),
        development_areas: development_areas(&culture, &trajectory, &skills),
        recommendations: combined_recommendations(&culture, &trajectory, &skills),
        culture_fit_analysis: culture,
        career_trajectory_analysis: trajectory,
        skill_gap_analysis: skills,
    }
}

/// First maximum in iteration order. `Iterator::max_by` keeps the last one.
fn first_max<K, I>(items: I) -> Option<(K, f64)>
where
    I: IntoIterator<Item = (K, f64)>,
{
    items.into_iter().fold(None, |best, (key, score)| match best {
        Some((_, top)) if score <= top => best,
        _ => Some((key, score)),
    })
}

fn key_strengths(
    culture: &CultureFitResult,
    trajectory: &TrajectoryResult,
    skills: &SkillGapResult,
) -> Vec<String> {
    let mut strengths = Vec::new();

    if let Some((dimension, score)) = first_max(culture.dimension_scores.iter()) {
        if score >= STRENGTH_THRESHOLD {
            strengths.push(format!("Strong {} orientation", dimension.as_str()));
        }
    }

    if let Some((component, score)) = first_max(trajectory.trajectory_components.iter()) {
        if score >= STRENGTH_THRESHOLD {
            strengths.push(format!("Excellent {} record", component.label()));
        }
    }

    strengths.extend(
        skills
            .strong_categories()
            .map(|category| format!("Strong {} skills coverage", category.as_str())),
    );

    strengths
}

fn development_areas(
    culture: &CultureFitResult,
    trajectory: &TrajectoryResult,
    skills: &SkillGapResult,
) -> Vec<String> {
    let mut areas: Vec<String> = culture
        .dimension_scores
        .iter()
        .filter(|(_, score)| *score < DEVELOPMENT_THRESHOLD)
        .map(|(dimension, _)| format!("Enhance {} orientation", dimension.as_str()))
        .collect();

    areas.extend(
        trajectory
            .trajectory_components
            .iter()
            .filter(|(_, score)| *score < DEVELOPMENT_THRESHOLD)
            .map(|(component, _)| format!("Develop {} skills", component.label())),
    );

    if !skills.job_specific_gaps.is_empty() {
        areas.push(format!(
            "Address {} job-specific skill gaps",
            skills.job_specific_gaps.len()
        ));
    }

    areas
}

fn combined_recommendations(
    culture: &CultureFitResult,
    trajectory: &TrajectoryResult,
    skills: &SkillGapResult,
) -> Vec<String> {
    let mut combined: Vec<String> = Vec::new();
    for recommendation in culture
        .recommendations
        .iter()
        .chain(&trajectory.recommendations)
        .chain(&skills.recommendations)
    {
        if !combined.contains(recommendation) {
            combined.push(recommendation.clone());
        }
        if combined.len() == MAX_RECOMMENDATIONS {
            break;
        }
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(RankingTier::from_score(80.0), RankingTier::EliteCandidate);
        assert_eq!(RankingTier::from_score(79.99), RankingTier::HighPotential);
        assert_eq!(RankingTier::from_score(70.0), RankingTier::HighPotential);
        assert_eq!(RankingTier::from_score(60.0), RankingTier::StrongCandidate);
        assert_eq!(RankingTier::from_score(50.0), RankingTier::QualifiedCandidate);
        assert_eq!(RankingTier::from_score(40.0), RankingTier::PotentialWithDevelopment);
        assert_eq!(RankingTier::from_score(39.9), RankingTier::NeedsSignificantDevelopment);
        assert_eq!(RankingTier::from_score(0.0), RankingTier::NeedsSignificantDevelopment);
    }

    #[test]
    fn test_tier_is_monotonic() {
        let mut previous = RankingTier::from_score(0.0);
        for step in 0..=1000 {
            let tier = RankingTier::from_score(step as f64 / 10.0);
            assert!(tier >= previous, "tier dropped at {}", step as f64 / 10.0);
            previous = tier;
        }
    }

    #[test]
    fn test_tier_serializes_as_label() {
        let json = serde_json::to_string(&RankingTier::EliteCandidate).unwrap();
        assert_eq!(json, "\"Elite Candidate\"");
    }

    #[test]
    fn test_overall_is_weighted_sum() {
        let text = "Led teams and mentored staff. Python, SQL, AWS. Team collaboration, \
                    innovative and creative. Promoted within 2 years.";
        let ranking = analyze_advanced_ranking(text, RankingOptions::default());
        let expected = ranking.culture_fit_analysis.overall_score * 0.3
            + ranking.career_trajectory_analysis.overall_trajectory_score * 0.3
            + ranking.skill_gap_analysis.overall_skill_coverage * 0.4;
        assert!((ranking.overall_advanced_score - expected).abs() < 1e-9);
        assert_eq!(
            ranking.ranking_tier,
            RankingTier::from_score(ranking.overall_advanced_score)
        );
    }

    #[test]
    fn test_empty_text_ranks_lowest() {
        let ranking = analyze_advanced_ranking("", RankingOptions::default());
        assert_eq!(ranking.overall_advanced_score, 0.0);
        assert_eq!(ranking.ranking_tier, RankingTier::NeedsSignificantDevelopment);
        assert!(ranking.key_strengths.is_empty());
        // 6 culture dimensions + 3 trajectory components
        assert_eq!(ranking.development_areas.len(), 9);
        assert_eq!(ranking.recommendations.len(), 5);
    }

    #[test]
    fn test_recommendations_are_deduped_and_capped() {
        let ranking = analyze_advanced_ranking("", RankingOptions::default());
        let distinct: std::collections::HashSet<&String> =
            ranking.recommendations.iter().collect();
        assert_eq!(distinct.len(), ranking.recommendations.len());
        assert_eq!(ranking.recommendations.len(), MAX_RECOMMENDATIONS);
        assert_eq!(
            ranking.recommendations[0],
            "Consider highlighting leadership experiences in resume and interviews"
        );
    }

    #[test]
    fn test_combined_recommendations_drop_repeats_across_sources() {
        let mut culture = analyze_culture_fit("", None);
        let mut trajectory = predict_career_trajectory("", 0);
        let mut skills = analyze_skill_gaps("", &[]);
        culture.recommendations = vec!["a".into(), "b".into()];
        trajectory.recommendations = vec!["b".into(), "a".into(), "c".into()];
        skills.recommendations = vec!["c".into(), "d".into()];

        assert_eq!(
            combined_recommendations(&culture, &trajectory, &skills),
            vec!["a", "b", "c", "d"]
        );

        skills.recommendations = vec!["d".into(), "e".into(), "f".into()];
        assert_eq!(
            combined_recommendations(&culture, &trajectory, &skills),
            vec!["a", "b", "c", "d", "e"]
        );
    }

    #[test]
    fn test_strength_tie_picks_first_dimension() {
        // leadership and collaboration both reach 60; leadership comes first.
        let text = "lead manage direct team collaborate together";
        let ranking = analyze_advanced_ranking(text, RankingOptions::default());
        assert_eq!(ranking.culture_fit_analysis.dimension_scores.leadership, 60.0);
        assert_eq!(ranking.culture_fit_analysis.dimension_scores.collaboration, 60.0);
        assert!(ranking
            .key_strengths
            .contains(&"Strong leadership orientation".to_string()));
        assert!(!ranking
            .key_strengths
            .contains(&"Strong collaboration orientation".to_string()));
    }

    #[test]
    fn test_trajectory_strength_uses_readable_label() {
        let text = "Promoted within 2 years. Advanced quickly on a fast track.";
        let ranking = analyze_advanced_ranking(text, RankingOptions::default());
        let rapid = ranking
            .career_trajectory_analysis
            .trajectory_components
            .rapid_growth;
        assert!(rapid >= 60.0, "rapid growth was {rapid}");
        assert!(ranking
            .key_strengths
            .contains(&"Excellent rapid growth record".to_string()));
        assert!(ranking
            .development_areas
            .contains(&"Develop leadership potential skills".to_string()));
    }

    #[test]
    fn test_job_description_drives_gaps() {
        let jd = "Requirements: Experience running Kafka clusters\n";
        let options = RankingOptions {
            job_description: Some(jd),
            ..Default::default()
        };
        let ranking = analyze_advanced_ranking("Python developer", options);
        assert_eq!(
            ranking.skill_gap_analysis.job_specific_gaps,
            vec!["Experience running Kafka clusters"]
        );
        assert!(ranking
            .development_areas
            .contains(&"Address 1 job-specific skill gaps".to_string()));
    }

    #[test]
    fn test_first_max_prefers_earliest() {
        let items = vec![("a", 1.0), ("b", 3.0), ("c", 3.0)];
        assert_eq!(first_max(items), Some(("b", 3.0)));
        assert_eq!(first_max(Vec::<(&str, f64)>::new()), None);
    }
}
