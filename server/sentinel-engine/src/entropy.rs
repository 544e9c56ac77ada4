//! Shannon entropy of a text, used as a proxy for obfuscated or encrypted content.

use std::collections::HashMap;

/// Entropy in bits over the character-frequency distribution of `text`.
///
/// Returns 0.0 for the empty string. Only the multiset of characters matters,
/// not their order.
pub fn shannon_entropy(text: &str) -> f64 {
  let mut counts: HashMap<char, usize> = HashMap::new();
  let mut total = 0usize;
  for c in text.chars() {
    *counts.entry(c).or_insert(0) += 1;
    total += 1;
  }
  if total == 0 {
    return 0.0;
  }

  let len = total as f64;
  let sum: f64 = counts
    .values()
    .map(|&n| {
      let p = n as f64 / len;
      p * p.log2()
    })
    .sum();
  // A single-symbol text sums to -0.0.
  (-sum).max(0.0)
}

pub fn entropy_alert(entropy: f64) -> String {
  format!(
    "[ENTROPY] Entropy anomaly ({:.2}): the code looks obfuscated or contains encrypted data.",
    entropy
  )
}
