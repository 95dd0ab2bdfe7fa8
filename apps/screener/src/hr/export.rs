use std::str::FromStr;

use anyhow::Context;
use chrono::Utc;
use serde_json::json;

use crate::candidates::models::CandidateRow;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(AppError::Validation(format!("Unsupported export format: {s}"))),
        }
    }
}

/// Serializes a candidate's insights for download.
pub fn export_candidate(row: &CandidateRow, format: ExportFormat) -> Result<Vec<u8>, AppError> {
    match format {
        ExportFormat::Json => export_json(row),
        ExportFormat::Csv => Ok(export_csv(row)?),
    }
}

fn export_json(row: &CandidateRow) -> Result<Vec<u8>, AppError> {
    let analysis = &row.analysis_result;
    let document = json!({
        "candidate_info": {
            "id": row.id,
            "filename": row.filename,
            "upload_date": row.upload_date,
            "relevance_score": analysis.relevance_score,
            "category": analysis.category,
            "years_experience": analysis.years_experience,
            "key_skills": analysis.key_skills,
            "education": analysis.education,
            "previous_roles": analysis.previous_roles,
        },
        "bias_analysis": row.bias_analysis,
        "profile_links": row.profile_links,
        "advanced_ranking": row.advanced_ranking,
        "export_date": Utc::now(),
    });

    serde_json::to_vec_pretty(&document)
        .context("Failed to serialize candidate export")
        .map_err(AppError::from)
}

/// Two-column `Field,Value` sheet.
fn export_csv(row: &CandidateRow) -> anyhow::Result<Vec<u8>> {
    let analysis = &row.analysis_result;
    let ranking = &row.advanced_ranking;

    let rows: Vec<(&str, String)> = vec![
        ("ID", row.id.to_string()),
        ("Filename", row.filename.clone()),
        ("Upload Date", row.upload_date.to_rfc3339()),
        ("Relevance Score", analysis.relevance_score.to_string()),
        ("Category", analysis.category.as_str().to_string()),
        ("Experience", analysis.years_experience.to_string()),
        ("Education", analysis.education.clone()),
        ("Key Skills", analysis.key_skills.join(", ")),
        ("Previous Roles", analysis.previous_roles.join("; ")),
        (
            "Overall Bias Score",
            format!("{:.1}", row.bias_analysis.overall_bias_score),
        ),
        (
            "Overall Advanced Score",
            format!("{:.1}", ranking.overall_advanced_score),
        ),
        ("Ranking Tier", ranking.ranking_tier.label().to_string()),
        ("Used Blind Text", row.used_blind_text.to_string()),
    ];

    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["Field", "Value"])?;
    for (field, value) in &rows {
        writer.write_record([*field, value.as_str()])?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV export: {e}"))
}
