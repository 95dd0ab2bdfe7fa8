//! Heuristic text analysis: bias detection, blind-resume redaction, and
//! multi-dimensional ranking, plus the pipeline that sequences them.
//!
//! Everything except `pipeline`, `profiles` and `handlers` is synchronous and
//! total over `&str`.

pub mod bias;
pub mod handlers;
pub mod patterns;
pub mod pipeline;
pub mod profiles;
pub mod ranking;
pub mod redaction;
