use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;
use crate::archive::ResumeArchive;
use crate::candidates::CandidateStore;
use crate::config::Config;
use crate::hr::HrClient;
use crate::llm_client::LlmClient;
use crate::screening::profiles::ProfileVerifier;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CandidateStore>,
    pub archive: Arc<dyn ResumeArchive>,
    /// Resilient by construction: falls back to keyword analysis without an API key.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    /// `None` when no API key is configured; JD matching then uses its fallback.
    pub llm: Option<LlmClient>,
    pub profiles: ProfileVerifier,
    pub hr: HrClient,
    pub config: Config,
}
