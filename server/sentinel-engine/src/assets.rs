//! Critical-asset detection over diff and commit message.

/// Keywords naming credential or configuration material.
pub const CRITICAL_ASSETS: &[&str] = &["config", ".env", "password", "secret", "token", "database"];

pub const CRITICAL_ASSET_ALERT: &str =
  "[HIGH] Critical asset: change touches credentials, secrets or configuration files.";

/// True if any keyword occurs, case-insensitively, in the diff or the message.
pub fn touches_critical_asset(diff: &str, commit_message: &str) -> bool {
  let diff = diff.to_lowercase();
  let msg = commit_message.to_lowercase();
  CRITICAL_ASSETS
    .iter()
    .any(|asset| diff.contains(*asset) || msg.contains(*asset))
}
