//! Sentinel commit risk engine: heuristic, rule-based scoring of a single commit.
//! Used by the binary for stdin/stdout; can also be called as a library.
//!
//! Checks, in order: author behavior profile (unknown authors are denied
//! outright), diff entropy, critical-asset keywords, suspicious code patterns.
//! No DB, no network; pure computation against read-only profiles.

pub mod assets;
pub mod config;
pub mod engine;
pub mod entropy;
pub mod error;
pub mod patterns;
pub mod profile;
pub mod report;
pub mod types;

pub use config::Config;
pub use engine::RiskEngine;
pub use error::EngineError;
pub use profile::ProfileDirectory;
pub use types::{AuthorProfile, HourOfDay, Input, Output, RiskAssessment, RiskLevel, TypicalHours};

/// Assess one commit against the built-in profiles and default thresholds.
pub fn assess_risk(author: &str, diff: &str, commit_message: &str, hour: HourOfDay) -> RiskAssessment {
  RiskEngine::with_defaults().assess(author, diff, commit_message, hour)
}

/// Run the engine on parsed input and return the report (no I/O).
///
/// `hour_override` wins over `input.hour`; with neither, the current local hour is used.
pub fn run(engine: &RiskEngine, input: &Input, hour_override: Option<HourOfDay>) -> Result<Output, EngineError> {
  let hour = match (hour_override, input.hour) {
    (Some(h), _) => h,
    (None, Some(h)) => HourOfDay::new(h)?,
    (None, None) => HourOfDay::now_local(),
  };
  let assessment = engine.assess(&input.author, &input.diff, &input.commit_message, hour);
  Ok(report::build_output(input, hour, assessment))
}
