//! Engine configuration with the reference thresholds and weights.

/// Tunable thresholds and weights for commit scoring.
#[derive(Debug, Clone)]
pub struct Config {
  /// Diff entropy (bits per character) above which the diff counts as obfuscated.
  pub entropy_threshold: f64,
  /// A diff longer than `average_change_volume * volume_multiplier` is a volume anomaly.
  pub volume_multiplier: u64,
  pub off_hours_weight: u32,
  pub volume_weight: u32,
  pub entropy_weight: u32,
  pub critical_asset_weight: u32,
  /// Upper clamp for the final score. Also the score given to unknown authors.
  pub max_score: u8,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      entropy_threshold: 4.8,
      volume_multiplier: 5,
      off_hours_weight: 30,
      volume_weight: 25,
      entropy_weight: 40,
      critical_asset_weight: 35,
      max_score: 100,
    }
  }
}
