//! Screening pipeline — bias, redaction, routing, external analysis, ranking.
//!
//! Bias and redaction both read the original text. `choose_analysis_text`
//! decides which variant the external analyzer sees. Ranking and link
//! extraction always read the original text.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, Instrument};

use crate::analysis::{ResumeAnalysis, ResumeAnalyzer};
use crate::errors::AppError;
use crate::screening::bias::{analyze_bias, BiasReport};
use crate::screening::profiles::{extract_profile_links, ProfileLinks};
use crate::screening::ranking::{analyze_advanced_ranking, AdvancedRanking, RankingOptions};
use crate::screening::redaction::{create_blind_version, AddressStrictness, RedactionResult};

pub const DEFAULT_BLIND_THRESHOLD: f64 = 30.0;

/// The routing rule: blind iff the overall bias score is strictly above `threshold`.
pub fn prefers_blind_text(report: &BiasReport, threshold: f64) -> bool {
    report.overall_bias_score > threshold
}

pub fn choose_analysis_text<'a>(
    report: &BiasReport,
    original: &'a str,
    blind: &'a str,
    threshold: f64,
) -> &'a str {
    if prefers_blind_text(report, threshold) {
        blind
    } else {
        original
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScreeningSettings {
    pub address_strictness: AddressStrictness,
    pub blind_threshold: f64,
}

impl Default for ScreeningSettings {
    fn default() -> Self {
        Self {
            address_strictness: AddressStrictness::default(),
            blind_threshold: DEFAULT_BLIND_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScreeningInput<'a> {
    pub resume_text: &'a str,
    pub job_description: Option<&'a str>,
    pub company_values: Option<&'a [String]>,
    /// Overrides the analyzer's estimate for ranking when set.
    pub years_experience: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    pub bias_analysis: BiasReport,
    pub redaction: RedactionResult,
    pub used_blind_text: bool,
    pub analysis: ResumeAnalysis,
    pub advanced_ranking: AdvancedRanking,
    pub profile_links: ProfileLinks,
}

pub async fn screen_resume(
    input: ScreeningInput<'_>,
    analyzer: &dyn ResumeAnalyzer,
    settings: ScreeningSettings,
) -> Result<ScreeningOutcome, AppError> {
    let span = info_span!("screen_resume", chars = input.resume_text.len());
    async move {
        let bias_analysis = analyze_bias(input.resume_text);
        let redaction = create_blind_version(input.resume_text, settings.address_strictness);

        let analysis_text = choose_analysis_text(
            &bias_analysis,
            input.resume_text,
            &redaction.blind_text,
            settings.blind_threshold,
        );
        let used_blind_text = prefers_blind_text(&bias_analysis, settings.blind_threshold);
        debug!(
            overall_bias = bias_analysis.overall_bias_score,
            used_blind_text, "Bias analysis complete"
        );

        let analysis = analyzer.analyze(analysis_text, input.job_description).await?;

        let advanced_ranking = analyze_advanced_ranking(
            input.resume_text,
            RankingOptions {
                job_description: input.job_description,
                company_values: input.company_values,
                years_experience: input.years_experience.unwrap_or(analysis.years_experience),
            },
        );

        info!(
            tier = ?advanced_ranking.ranking_tier,
            score = advanced_ranking.overall_advanced_score,
            "Screening complete"
        );

        Ok(ScreeningOutcome {
            bias_analysis,
            profile_links: extract_profile_links(input.resume_text),
            redaction,
            used_blind_text,
            analysis,
            advanced_ranking,
        })
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FallbackResumeAnalyzer;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the text it was asked to analyze.
    #[derive(Default)]
    struct RecordingAnalyzer {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ResumeAnalyzer for RecordingAnalyzer {
        async fn analyze(
            &self,
            resume_text: &str,
            _job_description: Option<&str>,
        ) -> Result<ResumeAnalysis, AppError> {
            self.seen.lock().unwrap().push(resume_text.to_string());
            Ok(ResumeAnalysis {
                years_experience: 12,
                ..Default::default()
            })
        }
    }

    fn report_with_overall(score: f64) -> BiasReport {
        let mut report = analyze_bias("");
        report.overall_bias_score = score;
        report.bias_free_score = 100.0 - score;
        report
    }

    #[test]
    fn test_choose_blind_only_above_threshold() {
        let at = report_with_overall(30.0);
        let above = report_with_overall(30.5);
        assert_eq!(choose_analysis_text(&at, "orig", "blind", 30.0), "orig");
        assert_eq!(choose_analysis_text(&above, "orig", "blind", 30.0), "blind");
        assert_eq!(choose_analysis_text(&above, "orig", "blind", 40.0), "orig");
    }

    #[tokio::test]
    async fn test_used_blind_flag_follows_routed_text() {
        for threshold in [-1.0, 30.0] {
            let analyzer = RecordingAnalyzer::default();
            let text = "He is a young rockstar. Jane Doe, 555-123-4567.";
            let outcome = screen_resume(
                ScreeningInput {
                    resume_text: text,
                    ..Default::default()
                },
                &analyzer,
                ScreeningSettings {
                    blind_threshold: threshold,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

            let expected = if outcome.used_blind_text {
                outcome.redaction.blind_text.clone()
            } else {
                text.to_string()
            };
            assert_eq!(analyzer.seen.lock().unwrap().as_slice(), [expected]);
            assert_eq!(outcome.used_blind_text, threshold < 0.0);
        }
    }

    #[tokio::test]
    async fn test_low_bias_sends_original_text() {
        let analyzer = RecordingAnalyzer::default();
        let text = "Jane Doe built data pipelines in Python.";
        let outcome = screen_resume(
            ScreeningInput {
                resume_text: text,
                ..Default::default()
            },
            &analyzer,
            ScreeningSettings::default(),
        )
        .await
        .unwrap();

        assert!(!outcome.used_blind_text);
        assert_eq!(analyzer.seen.lock().unwrap().as_slice(), [text.to_string()]);
        assert_eq!(outcome.redaction.removed.names, vec!["Jane Doe"]);
    }

    #[tokio::test]
    async fn test_high_bias_sends_blind_text() {
        let analyzer = RecordingAnalyzer::default();
        let text = "Jane Doe";
        let settings = ScreeningSettings {
            blind_threshold: -1.0,
            ..Default::default()
        };
        let outcome = screen_resume(
            ScreeningInput {
                resume_text: text,
                ..Default::default()
            },
            &analyzer,
            settings,
        )
        .await
        .unwrap();

        assert!(outcome.used_blind_text);
        assert_eq!(
            analyzer.seen.lock().unwrap().as_slice(),
            ["[NAME REMOVED]".to_string()]
        );
    }

    #[tokio::test]
    async fn test_years_experience_prefers_caller_value() {
        let analyzer = RecordingAnalyzer::default();
        let input = ScreeningInput {
            resume_text: "Led teams",
            ..Default::default()
        };

        let from_analyzer = screen_resume(input, &analyzer, ScreeningSettings::default())
            .await
            .unwrap();
        let overridden = screen_resume(
            ScreeningInput {
                years_experience: Some(0),
                ..input
            },
            &analyzer,
            ScreeningSettings::default(),
        )
        .await
        .unwrap();

        // leadership 15 → factor 7.5; base 60 vs 0
        let with_twelve = from_analyzer
            .advanced_ranking
            .career_trajectory_analysis
            .senior_role_potential;
        let with_zero = overridden
            .advanced_ranking
            .career_trajectory_analysis
            .senior_role_potential;
        assert!((with_twelve - 33.75).abs() < 1e-9);
        assert!((with_zero - 3.75).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_outcome_carries_profile_links() {
        let outcome = screen_resume(
            ScreeningInput {
                resume_text: "Portfolio: https://github.com/octocat",
                ..Default::default()
            },
            &FallbackResumeAnalyzer,
            ScreeningSettings::default(),
        )
        .await
        .unwrap();
        assert_eq!(outcome.profile_links.github, vec!["https://github.com/octocat"]);
        assert_eq!(outcome.analysis.years_experience, 1);
    }
}
