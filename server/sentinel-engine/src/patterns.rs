//! Suspicious code patterns: literal, case-sensitive substrings with weights.

/// Pattern table, in alert order.
pub const SUSPICIOUS_PATTERNS: &[(&str, u32)] = &[
  ("eval(", 40),
  ("base64.b64decode", 35),
  ("socket.connect", 30),
  ("chmod +x", 45),
  ("os.system(", 40),
  ("subprocess.Popen", 40),
  ("import ctypes", 30),
  ("os.spawnv(", 35),
  ("marshal.loads(", 40),
  ("zlib.decompress(data).decode()", 40),
  ("exec(", 45),
];

/// Every table entry found in `diff`, in table order.
pub fn matched_patterns(diff: &str) -> Vec<(&'static str, u32)> {
  SUSPICIOUS_PATTERNS
    .iter()
    .filter(|(pattern, _)| diff.contains(*pattern))
    .copied()
    .collect()
}

pub fn pattern_alert(pattern: &str) -> String {
  format!("[MALICIOUS] Suspicious pattern: detected '{}' in the diff.", pattern)
}
