//! Core engine: runs the checks in order and folds them into one assessment.

use chrono::{DateTime, TimeZone};
use tracing::{debug, warn};

use crate::assets;
use crate::config::Config;
use crate::entropy;
use crate::patterns;
use crate::profile::{self, ProfileDirectory};
use crate::types::{HourOfDay, RiskAssessment};

/// The commit risk engine. Holds only read-only reference data, so one
/// instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct RiskEngine {
  config: Config,
  profiles: ProfileDirectory,
}

impl RiskEngine {
  pub fn new(profiles: ProfileDirectory, config: Config) -> Self {
    Self { config, profiles }
  }

  /// Built-in profile directory, default thresholds.
  pub fn with_defaults() -> Self {
    Self::new(ProfileDirectory::builtin(), Config::default())
  }

  pub fn profiles(&self) -> &ProfileDirectory {
    &self.profiles
  }

  /// Score one commit made at `hour`.
  ///
  /// Unknown authors short-circuit to the maximum score with a single alert.
  /// For known authors the alerts follow check order: behavior, entropy,
  /// critical assets, suspicious patterns.
  pub fn assess(
    &self,
    author: &str,
    diff: &str,
    commit_message: &str,
    hour: HourOfDay,
  ) -> RiskAssessment {
    let profile = match self.profiles.get(author) {
      Some(p) => p,
      None => {
        warn!(author, "unknown author, denying");
        return RiskAssessment {
          score: self.config.max_score,
          alerts: vec![profile::unknown_author_alert(author)],
        };
      }
    };

    let mut score: u32 = 0;
    let mut alerts: Vec<String> = Vec::new();

    for (weight, alert) in profile::check_behavior(author, profile, hour, diff, &self.config) {
      debug!(author, %hour, weight, "behavior anomaly");
      score += weight;
      alerts.push(alert);
    }

    let entropy_val = entropy::shannon_entropy(diff);
    if entropy_val > self.config.entropy_threshold {
      debug!(entropy = entropy_val, "high-entropy diff");
      score += self.config.entropy_weight;
      alerts.push(entropy::entropy_alert(entropy_val));
    }

    if assets::touches_critical_asset(diff, commit_message) {
      debug!("critical asset touched");
      score += self.config.critical_asset_weight;
      alerts.push(assets::CRITICAL_ASSET_ALERT.to_string());
    }

    for (pattern, weight) in patterns::matched_patterns(diff) {
      debug!(pattern, weight, "suspicious pattern");
      score += weight;
      alerts.push(patterns::pattern_alert(pattern));
    }

    let score = score.min(u32::from(self.config.max_score)) as u8;
    debug!(author, score, alerts = alerts.len(), "assessment complete");
    RiskAssessment { score, alerts }
  }

  /// Score one commit made at timestamp `ts` (its local hour in `Tz`).
  pub fn assess_at<Tz: TimeZone>(
    &self,
    author: &str,
    diff: &str,
    commit_message: &str,
    ts: &DateTime<Tz>,
  ) -> RiskAssessment {
    self.assess(author, diff, commit_message, HourOfDay::from_datetime(ts))
  }
}

impl Default for RiskEngine {
  fn default() -> Self {
    Self::with_defaults()
  }
}
