use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::analysis::ResumeAnalysis;
use crate::screening::bias::BiasReport;
use crate::screening::profiles::ProfileLinks;
use crate::screening::ranking::{AdvancedRanking, RankingTier};

const PREVIEW_CHARS: usize = 200;

/// One screened resume as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub filename: String,
    pub upload_date: DateTime<Utc>,
    pub resume_text: String,
    /// Object key of the archived original, when archiving succeeded.
    pub archive_key: Option<String>,
    pub analysis_result: Json<ResumeAnalysis>,
    pub bias_analysis: Json<BiasReport>,
    pub advanced_ranking: Json<AdvancedRanking>,
    pub profile_links: Json<ProfileLinks>,
    pub used_blind_text: bool,
    pub created_at: DateTime<Utc>,
}

/// Everything needed to insert a candidate; ids and timestamps are assigned
/// by the store.
#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub filename: String,
    pub resume_text: String,
    pub archive_key: Option<String>,
    pub analysis_result: ResumeAnalysis,
    pub bias_analysis: BiasReport,
    pub advanced_ranking: AdvancedRanking,
    pub profile_links: ProfileLinks,
    pub used_blind_text: bool,
}

impl NewCandidate {
    #[cfg(test)]
    pub fn into_row(self, id: Uuid, now: DateTime<Utc>) -> CandidateRow {
        CandidateRow {
            id,
            filename: self.filename,
            upload_date: now,
            resume_text: self.resume_text,
            archive_key: self.archive_key,
            analysis_result: Json(self.analysis_result),
            bias_analysis: Json(self.bias_analysis),
            advanced_ranking: Json(self.advanced_ranking),
            profile_links: Json(self.profile_links),
            used_blind_text: self.used_blind_text,
            created_at: now,
        }
    }
}

/// List view of a candidate: resume text cut to a short preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub id: Uuid,
    pub filename: String,
    pub upload_date: DateTime<Utc>,
    pub resume_text: String,
    pub analysis_result: ResumeAnalysis,
    pub overall_bias_score: f64,
    pub overall_advanced_score: f64,
    pub ranking_tier: RankingTier,
    pub used_blind_text: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CandidateRow> for CandidateSummary {
    fn from(row: CandidateRow) -> Self {
        CandidateSummary {
            id: row.id,
            filename: row.filename,
            upload_date: row.upload_date,
            resume_text: preview(&row.resume_text),
            overall_bias_score: row.bias_analysis.overall_bias_score,
            overall_advanced_score: row.advanced_ranking.overall_advanced_score,
            ranking_tier: row.advanced_ranking.ranking_tier,
            analysis_result: row.analysis_result.0,
            used_blind_text: row.used_blind_text,
            created_at: row.created_at,
        }
    }
}

/// First 200 characters plus "..." when longer, otherwise unchanged.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("short"), "short");
        let exact = "a".repeat(200);
        assert_eq!(preview(&exact), exact);
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let long = "é".repeat(250);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }
}
