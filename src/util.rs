//! Small utility helpers used across modules.

/// Split comma-separated option text as typed by a user.
/// Each segment is trimmed and blank segments are dropped, so `"a, ,b,"` gives `["a", "b"]`.
pub fn parse_options(text: &str) -> Vec<String> {
  text
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
    .collect()
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}
