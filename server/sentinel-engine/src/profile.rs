//! Author behavior profiles and the behavioral anomaly check.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::EngineError;
use crate::types::{AuthorProfile, HourOfDay, TypicalHours};

/// Read-only directory of known authors, keyed by author identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileDirectory {
  profiles: HashMap<String, AuthorProfile>,
}

impl ProfileDirectory {
  pub fn new(profiles: HashMap<String, AuthorProfile>) -> Self {
    Self { profiles }
  }

  /// The two reference committers shipped with the engine.
  pub fn builtin() -> Self {
    [
      (
        "marian_popescu",
        AuthorProfile {
          role: "Senior Dev".into(),
          trusted: true,
          typical_hours: TypicalHours::span(9, 18),
          average_change_volume: 150,
        },
      ),
      (
        "ion_popescu",
        AuthorProfile {
          role: "Junior Dev".into(),
          trusted: true,
          typical_hours: TypicalHours::span(10, 19),
          average_change_volume: 50,
        },
      ),
    ]
    .into_iter()
    .map(|(author, profile)| (author.to_string(), profile))
    .collect()
  }

  /// Parse a JSON object of `author -> profile`.
  pub fn from_json_str(raw: &str) -> Result<Self, EngineError> {
    let dir: Self = serde_json::from_str(raw)?;
    if dir.profiles.keys().any(|author| author.trim().is_empty()) {
      return Err(EngineError::validation("author", "profile key must not be empty"));
    }
    Ok(dir)
  }

  pub fn from_path(path: &Path) -> Result<Self, EngineError> {
    let raw = std::fs::read_to_string(path).map_err(|e| EngineError::profiles(path, e))?;
    Self::from_json_str(&raw).map_err(|e| EngineError::profiles(path, e))
  }

  pub fn get(&self, author: &str) -> Option<&AuthorProfile> {
    self.profiles.get(author)
  }

  pub fn len(&self) -> usize {
    self.profiles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.profiles.is_empty()
  }

  /// Author identifiers, sorted.
  pub fn authors(&self) -> Vec<&str> {
    let mut v: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
    v.sort();
    v
  }
}

impl FromIterator<(String, AuthorProfile)> for ProfileDirectory {
  fn from_iter<I: IntoIterator<Item = (String, AuthorProfile)>>(iter: I) -> Self {
    Self::new(iter.into_iter().collect())
  }
}

pub fn unknown_author_alert(author: &str) -> String {
  format!(
    "[CRITICAL] Unknown author: '{}' has no behavioral profile. Access denied under the zero-trust policy.",
    author
  )
}

/// Weighted alerts for a known author: off-hours first, then change volume.
pub fn check_behavior(
  author: &str,
  profile: &AuthorProfile,
  hour: HourOfDay,
  diff: &str,
  config: &Config,
) -> Vec<(u32, String)> {
  let mut out = Vec::new();

  if !profile.typical_hours.contains(hour) {
    out.push((
      config.off_hours_weight,
      format!(
        "[WARNING] Off-hours anomaly: {} is committing outside their usual working hours.",
        author
      ),
    ));
  }

  let volume = diff.chars().count() as u64;
  let limit = profile
    .average_change_volume
    .saturating_mul(config.volume_multiplier);
  if volume > limit {
    out.push((
      config.volume_weight,
      "[WARNING] Volume anomaly: change size is far above the author's average.".to_string(),
    ));
  }

  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn hour(h: u8) -> HourOfDay {
    HourOfDay::new(h).unwrap()
  }

  #[test]
  fn builtin_has_reference_authors() {
    let dir = ProfileDirectory::builtin();
    assert_eq!(dir.authors(), vec!["ion_popescu", "marian_popescu"]);
    let marian = dir.get("marian_popescu").unwrap();
    assert_eq!(marian.average_change_volume, 150);
    assert!(marian.typical_hours.contains(hour(9)));
    assert!(marian.typical_hours.contains(hour(17)));
    assert!(!marian.typical_hours.contains(hour(18)));
    let ion = dir.get("ion_popescu").unwrap();
    assert!(ion.typical_hours.contains(hour(18)));
    assert!(!ion.typical_hours.contains(hour(9)));
  }

  #[test]
  fn off_hours_adds_weight() {
    let dir = ProfileDirectory::builtin();
    let profile = dir.get("marian_popescu").unwrap();
    let config = Config::default();

    let night = check_behavior("marian_popescu", profile, hour(3), "x", &config);
    assert_eq!(night.len(), 1);
    assert_eq!(night[0].0, 30);
    assert!(night[0].1.contains("marian_popescu"));

    let day = check_behavior("marian_popescu", profile, hour(10), "x", &config);
    assert!(day.is_empty());
  }

  #[test]
  fn volume_limit_is_exclusive() {
    let dir = ProfileDirectory::builtin();
    let profile = dir.get("ion_popescu").unwrap();
    let config = Config::default();

    let at_limit = "a".repeat(250);
    assert!(check_behavior("ion_popescu", profile, hour(12), &at_limit, &config).is_empty());

    let over = "a".repeat(251);
    let hits = check_behavior("ion_popescu", profile, hour(12), &over, &config);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0, 25);
  }

  #[test]
  fn off_hours_precedes_volume() {
    let dir = ProfileDirectory::builtin();
    let profile = dir.get("ion_popescu").unwrap();
    let hits = check_behavior("ion_popescu", profile, hour(2), &"a".repeat(300), &Config::default());
    let weights: Vec<u32> = hits.iter().map(|(w, _)| *w).collect();
    assert_eq!(weights, vec![30, 25]);
  }

  #[test]
  fn loads_directory_from_json() {
    let raw = r#"{
      "ana": {"role": "SRE", "trusted": false, "typical_hours": [22, 23, 0, 1], "average_change_volume": 400},
      "dan": {"role": "Dev", "trusted": true, "typical_hours": {"start": 8, "end": 16}, "average_change_volume": 80}
    }"#;
    let dir = ProfileDirectory::from_json_str(raw).unwrap();
    assert_eq!(dir.len(), 2);
    assert!(dir.get("ana").unwrap().typical_hours.contains(hour(0)));
    assert!(!dir.get("dan").unwrap().typical_hours.contains(hour(16)));
  }

  #[test]
  fn rejects_invalid_hours_in_json() {
    let raw = r#"{"ana": {"role": "SRE", "trusted": true, "typical_hours": [25], "average_change_volume": 1}}"#;
    assert!(ProfileDirectory::from_json_str(raw).is_err());
  }

  #[test]
  fn rejects_blank_author_key() {
    let raw = r#"{" ": {"role": "SRE", "trusted": true, "typical_hours": [1], "average_change_volume": 1}}"#;
    let err = ProfileDirectory::from_json_str(raw).unwrap_err();
    assert!(err.to_string().contains("author"));
  }

  #[test]
  fn loads_directory_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("team.json");
    std::fs::write(
      &path,
      r#"{"dan": {"role": "Dev", "trusted": true, "typical_hours": {"start": 8, "end": 16}, "average_change_volume": 80}}"#,
    )
    .unwrap();

    let profiles = ProfileDirectory::from_path(&path).unwrap();
    assert_eq!(profiles.authors(), vec!["dan"]);
  }

  #[test]
  fn file_errors_name_the_path() {
    let dir = tempfile::TempDir::new().unwrap();

    let missing = dir.path().join("missing.json");
    let err = ProfileDirectory::from_path(&missing).unwrap_err();
    assert!(matches!(err, EngineError::Profiles { .. }));
    assert!(err.to_string().contains("missing.json"), "{}", err);

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, r#"{"dan": {"typical_hours": [99]}}"#).unwrap();
    let err = ProfileDirectory::from_path(&broken).unwrap_err();
    assert!(err.to_string().contains("broken.json"), "{}", err);
  }

  #[test]
  fn directory_round_trips_through_json() {
    let dir = ProfileDirectory::builtin();
    let json = serde_json::to_string(&dir).unwrap();
    assert_eq!(ProfileDirectory::from_json_str(&json).unwrap(), dir);
  }
}
