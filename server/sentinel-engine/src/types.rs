//! Core types for the risk engine (JSON contracts + domain models).

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Inbound / outbound types (JSON contract with the calling shell)
// ---------------------------------------------------------------------------

/// One commit to assess. Unknown fields are silently ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Input {
  pub author: String,
  pub diff: String,
  pub commit_message: String,
  /// Hour of day (0..=23) the commit was made. Defaults to the current local hour.
  #[serde(default)]
  pub hour: Option<u8>,
}

/// One report object written to stdout.
#[derive(Debug, Clone, Serialize)]
pub struct Output {
  pub assessment_id: String,
  pub score: u8,
  pub level: RiskLevel,
  pub alerts: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
}

/// Error line emitted in batch mode when an input line cannot be assessed.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A validated hour of day, 0..=23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourOfDay(u8);

impl HourOfDay {
  pub fn new(hour: u8) -> Result<Self, EngineError> {
    if hour < 24 {
      Ok(Self(hour))
    } else {
      Err(EngineError::validation("hour", "must be in 0..=23"))
    }
  }

  pub fn from_datetime<Tz: TimeZone>(ts: &DateTime<Tz>) -> Self {
    // Timelike::hour is always < 24.
    Self(ts.hour() as u8)
  }

  pub fn now_local() -> Self {
    Self::from_datetime(&Local::now())
  }

  pub fn get(self) -> u8 {
    self.0
  }
}

impl fmt::Display for HourOfDay {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:02}:00", self.0)
  }
}

/// Hours during which an author's commits are considered normal.
///
/// Stored as a 24-bit mask. In JSON it is either a half-open range
/// `{"start": 9, "end": 18}` (hours 9 through 17) or an explicit list of hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HoursSpec", into = "HoursSpec")]
pub struct TypicalHours(u32);

/// Serialized form of [`TypicalHours`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HoursSpec {
  // List first: a two-element array must not deserialize as a range.
  List(Vec<u8>),
  Range { start: u8, end: u8 },
}

impl TypicalHours {
  /// Half-open range `start..end`; `end` may be 24.
  pub fn from_range(start: u8, end: u8) -> Result<Self, EngineError> {
    if start > end || end > 24 {
      return Err(EngineError::validation(
        "typical_hours",
        &format!("invalid range {}..{}", start, end),
      ));
    }
    Ok(Self::span(start, end))
  }

  /// Unchecked half-open range; callers guarantee `start <= end <= 24`.
  pub(crate) const fn span(start: u8, end: u8) -> Self {
    Self(((1u32 << end) - 1) & !((1u32 << start) - 1))
  }

  pub fn from_hours(hours: impl IntoIterator<Item = u8>) -> Result<Self, EngineError> {
    let mut mask = 0u32;
    for h in hours {
      if h >= 24 {
        return Err(EngineError::validation(
          "typical_hours",
          &format!("hour {} out of range 0..=23", h),
        ));
      }
      mask |= 1 << h;
    }
    Ok(Self(mask))
  }

  pub fn contains(&self, hour: HourOfDay) -> bool {
    self.0 & (1 << hour.get()) != 0
  }

  pub fn hours(&self) -> impl Iterator<Item = u8> + '_ {
    (0..24u8).filter(move |&h| self.0 & (1 << h) != 0)
  }
}

impl TryFrom<HoursSpec> for TypicalHours {
  type Error = EngineError;

  fn try_from(spec: HoursSpec) -> Result<Self, Self::Error> {
    match spec {
      HoursSpec::Range { start, end } => Self::from_range(start, end),
      HoursSpec::List(hours) => Self::from_hours(hours),
    }
  }
}

impl From<TypicalHours> for HoursSpec {
  fn from(hours: TypicalHours) -> Self {
    HoursSpec::List(hours.hours().collect())
  }
}

// ---------------------------------------------------------------------------
// Domain models
// ---------------------------------------------------------------------------

/// Behavioral baseline of a known committer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
  pub role: String,
  pub trusted: bool,
  pub typical_hours: TypicalHours,
  /// Typical diff size in characters.
  pub average_change_volume: u64,
}

/// Result of one assessment. Alerts are in the order the checks fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
  pub score: u8,
  pub alerts: Vec<String>,
}

impl RiskAssessment {
  pub fn level(&self) -> RiskLevel {
    RiskLevel::from_score(self.score)
  }

  pub fn is_clean(&self) -> bool {
    self.alerts.is_empty()
  }
}

/// Traffic-light bucket the calling shell colors the score with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
  Green,
  Orange,
  Red,
}

impl RiskLevel {
  pub fn from_score(score: u8) -> Self {
    if score < 30 {
      Self::Green
    } else if score < 60 {
      Self::Orange
    } else {
      Self::Red
    }
  }
}

impl fmt::Display for RiskLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::Green => "green",
      Self::Orange => "orange",
      Self::Red => "red",
    };
    f.write_str(s)
  }
}
