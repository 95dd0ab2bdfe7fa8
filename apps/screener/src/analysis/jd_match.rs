use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::prompts::build_job_match_prompt;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

const FALLBACK_SCORE: u32 = 80;
const FALLBACK_EXPLANATION: &str =
    "Candidate has relevant skills and experience matching the job description.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    /// 0 – 100
    pub match_score: u32,
    pub explanation: String,
}

impl JobMatch {
    fn fallback() -> Self {
        Self {
            match_score: FALLBACK_SCORE,
            explanation: FALLBACK_EXPLANATION.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawJobMatch {
    match_score: f64,
    #[serde(default)]
    explanation: String,
}

/// Semantic match of a resume against a job description.
///
/// Never fails: without a client, or on any LLM error, returns the fixed
/// fallback match.
pub async fn match_job_description(
    llm: Option<&LlmClient>,
    job_description: &str,
    resume_text: &str,
) -> JobMatch {
    let Some(llm) = llm else {
        return JobMatch::fallback();
    };

    let prompt = build_job_match_prompt(job_description, resume_text);
    match llm.call_json::<RawJobMatch>(&prompt, JSON_ONLY_SYSTEM).await {
        Ok(raw) => JobMatch {
            match_score: raw.match_score.clamp(0.0, 100.0).round() as u32,
            explanation: raw.explanation,
        },
        Err(e) => {
            warn!("JD matching failed, using fallback match: {e}");
            JobMatch::fallback()
        }
    }
}
