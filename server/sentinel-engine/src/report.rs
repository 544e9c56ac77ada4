//! Turns an assessment into the JSON report the calling shell renders.

use crate::types::{HourOfDay, Input, Output, RiskAssessment};

pub const CLEAN_SUMMARY: &str = "No major anomalies detected.";

/// Stable id for one (author, message, diff, hour) tuple: `asm-` + 16 hex chars.
pub fn assessment_id(author: &str, diff: &str, commit_message: &str, hour: HourOfDay) -> String {
  let mut hasher = blake3::Hasher::new();
  hasher.update(author.as_bytes());
  hasher.update(b"|");
  hasher.update(commit_message.as_bytes());
  hasher.update(b"|");
  hasher.update(&[hour.get()]);
  hasher.update(b"|");
  hasher.update(diff.as_bytes());
  let hex = hasher.finalize().to_hex();
  format!("asm-{}", &hex[..16])
}

pub fn build_output(input: &Input, hour: HourOfDay, assessment: RiskAssessment) -> Output {
  let level = assessment.level();
  let summary = assessment.is_clean().then(|| CLEAN_SUMMARY.to_string());
  Output {
    assessment_id: assessment_id(&input.author, &input.diff, &input.commit_message, hour),
    score: assessment.score,
    level,
    alerts: assessment.alerts,
    summary,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::RiskLevel;

  fn input(author: &str, diff: &str) -> Input {
    Input {
      author: author.into(),
      diff: diff.into(),
      commit_message: "msg".into(),
      hour: None,
    }
  }

  #[test]
  fn id_is_stable_and_input_sensitive() {
    let h = HourOfDay::new(10).unwrap();
    let a = assessment_id("ion_popescu", "diff", "msg", h);
    let b = assessment_id("ion_popescu", "diff", "msg", h);
    assert_eq!(a, b);
    assert!(a.starts_with("asm-"));
    assert_eq!(a.len(), 20);

    assert_ne!(a, assessment_id("ion_popescu", "diff2", "msg", h));
    assert_ne!(a, assessment_id("ion_popescu", "diff", "msg", HourOfDay::new(11).unwrap()));
  }

  #[test]
  fn clean_assessment_gets_summary() {
    let out = build_output(
      &input("a", "x"),
      HourOfDay::new(10).unwrap(),
      RiskAssessment { score: 0, alerts: vec![] },
    );
    assert_eq!(out.level, RiskLevel::Green);
    assert_eq!(out.summary.as_deref(), Some(CLEAN_SUMMARY));
  }

  #[test]
  fn alerts_suppress_summary() {
    let out = build_output(
      &input("a", "x"),
      HourOfDay::new(10).unwrap(),
      RiskAssessment {
        score: 65,
        alerts: vec!["one".into(), "two".into()],
      },
    );
    assert_eq!(out.level, RiskLevel::Red);
    assert!(out.summary.is_none());
    assert_eq!(out.alerts, vec!["one".to_string(), "two".to_string()]);

    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["level"], "red");
    assert!(json.get("summary").is_none());
  }
}
