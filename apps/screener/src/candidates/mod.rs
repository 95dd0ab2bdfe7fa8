//! Candidates — upload, persistence and retrieval of screened resumes.

pub mod handlers;
pub mod models;
pub mod store;

pub use store::{CandidateStore, PgCandidateStore};
