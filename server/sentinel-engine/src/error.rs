//! Errors raised at the engine's fallible edges: hour/profile validation,
//! profile-file loading and input decoding. Scoring itself cannot fail.

use std::fmt::Display;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("invalid {field}: {reason}")]
  Validation { field: String, reason: String },

  /// A profile file could not be read or decoded.
  #[error("profiles {path}: {reason}")]
  Profiles { path: String, reason: String },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn profiles(path: &Path, reason: impl Display) -> Self {
    Self::Profiles {
      path: path.display().to_string(),
      reason: reason.to_string(),
    }
  }
}
