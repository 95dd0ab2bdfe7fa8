//! HR Integration — forwards screened candidates to ATS platforms and exports
//! candidate insights.
//!
//! Contact details are not stored; they are recovered from the resume text by
//! the redactor at send time.

pub mod client;
pub mod export;
pub mod handlers;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::candidates::models::CandidateRow;
use crate::errors::AppError;
use crate::screening::redaction::{create_blind_version, AddressStrictness};

pub use client::HrClient;

const SOURCE: &str = "AI Resume Screener";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HrSystem {
    Workday,
    Greenhouse,
    Sap,
}

impl HrSystem {
    pub const ALL: [HrSystem; 3] = [HrSystem::Workday, HrSystem::Greenhouse, HrSystem::Sap];

    pub fn key(self) -> &'static str {
        match self {
            HrSystem::Workday => "workday",
            HrSystem::Greenhouse => "greenhouse",
            HrSystem::Sap => "sap",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HrSystem::Workday => "Workday",
            HrSystem::Greenhouse => "Greenhouse",
            HrSystem::Sap => "SAP SuccessFactors",
        }
    }

    pub fn candidates_endpoint(self) -> &'static str {
        match self {
            HrSystem::Workday => "/api/v1/candidates",
            HrSystem::Greenhouse => "/v1/candidates",
            HrSystem::Sap => "/odata/v2/Candidate",
        }
    }
}

impl fmt::Display for HrSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for HrSystem {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HrSystem::ALL
            .into_iter()
            .find(|system| system.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::Validation(format!("Unsupported HR system: {s}")))
    }
}

/// System-neutral candidate record, the input to every payload shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HrCandidate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub resume_text: String,
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub education: String,
    pub current_position: String,
}

impl HrCandidate {
    pub fn from_record(row: &CandidateRow, strictness: AddressStrictness) -> Self {
        let removed = create_blind_version(&row.resume_text, strictness).removed;

        let (first_name, last_name) = removed
            .names
            .first()
            .map(|name| match name.split_once(char::is_whitespace) {
                Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
                None => (name.clone(), String::new()),
            })
            .unwrap_or_default();

        let analysis = &row.analysis_result;
        HrCandidate {
            first_name,
            last_name,
            email: removed.emails.first().cloned().unwrap_or_default(),
            phone: removed.phones.first().cloned().unwrap_or_default(),
            resume_text: row.resume_text.clone(),
            skills: analysis.key_skills.clone(),
            experience_years: analysis.years_experience,
            education: analysis.education.clone(),
            current_position: analysis.previous_roles.first().cloned().unwrap_or_default(),
        }
    }
}

/// The JSON body each system expects on its candidates endpoint.
pub fn format_payload(system: HrSystem, candidate: &HrCandidate) -> Value {
    match system {
        HrSystem::Workday => json!({
            "candidate": {
                "personalInfo": {
                    "firstName": candidate.first_name,
                    "lastName": candidate.last_name,
                    "email": candidate.email,
                    "phone": candidate.phone,
                },
                "professionalInfo": {
                    "skills": candidate.skills,
                    "experience": candidate.experience_years,
                    "education": candidate.education,
                    "currentPosition": candidate.current_position,
                },
                "attachments": [{
                    "type": "resume",
                    "content": candidate.resume_text,
                }],
                "source": SOURCE,
            }
        }),
        HrSystem::Greenhouse => json!({
            "first_name": candidate.first_name,
            "last_name": candidate.last_name,
            "email_addresses": [{ "value": candidate.email, "type": "personal" }],
            "phone_numbers": [{ "value": candidate.phone, "type": "mobile" }],
            "custom_fields": {
                "skills": candidate.skills.join(", "),
                "experience_years": candidate.experience_years.to_string(),
                "education": candidate.education,
                "source": SOURCE,
            },
            "attachments": [{
                "filename": "resume.txt",
                "content": candidate.resume_text,
                "content_type": "text/plain",
            }],
        }),
        HrSystem::Sap => json!({
            "firstName": candidate.first_name,
            "lastName": candidate.last_name,
            "email": candidate.email,
            "phone": candidate.phone,
            "backgroundElements": {
                "education": [{ "school": candidate.education }],
                "experience": [{
                    "company": candidate.current_position,
                    "years": candidate.experience_years,
                }],
            },
            "skills": candidate
                .skills
                .iter()
                .map(|skill| json!({ "skillName": skill }))
                .collect::<Vec<_>>(),
            "attachments": [{
                "fileName": "resume.txt",
                "fileContent": candidate.resume_text,
            }],
        }),
    }
}
