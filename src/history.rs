//! Append-only log of generated forms: timestamp, title, link.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::instrument;

use crate::error::Result;

#[derive(Clone, Debug)]
pub struct HistoryLog {
  path: PathBuf,
}

impl HistoryLog {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path { &self.path }

  #[instrument(level = "debug", skip(self, link))]
  pub fn append(&self, title: &str, link: &str) -> Result<()> {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
      fs::create_dir_all(dir)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
    write!(file, "[{}] {}\n{}\n\n", timestamp, title, link)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_append_entries() {
    let dir = TempDir::new().unwrap();
    let log = HistoryLog::new(dir.path().join("form_history.txt"));
    log.append("Survey", "https://example.test/a").unwrap();
    log.append("Quiz", "https://example.test/b").unwrap();

    let text = fs::read_to_string(log.path()).unwrap();
    let entries: Vec<&str> = text.split_terminator("\n\n").collect();
    assert_eq!(entries.len(), 2);

    let (head, link) = entries[1].split_once('\n').unwrap();
    assert!(head.starts_with('['));
    assert!(head.ends_with("] Quiz"));
    // "[YYYY-MM-DD HH:MM:SS]"
    assert_eq!(head.find(']'), Some(20));
    assert_eq!(link, "https://example.test/b");
  }
}
