//! Template persistence: one JSON document mapping template name to `{title, questions}`.
//!
//! The document is re-read on every call so edits made between sessions are picked up,
//! and every mutation rewrites the whole document through a temporary sibling file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::domain::{FormDraft, Template};
use crate::error::{FormError, Result};

type Document = BTreeMap<String, FormDraft>;

#[derive(Clone, Debug)]
pub struct TemplateStore {
  path: PathBuf,
}

impl TemplateStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path { &self.path }

  /// Names of all saved templates, sorted.
  #[instrument(level = "debug", skip(self))]
  pub fn list(&self) -> Result<Vec<String>> {
    Ok(self.read_document()?.into_keys().collect())
  }

  /// Insert or fully replace the template stored under `name`.
  /// Names are trimmed here and in `load`/`delete`, so lookups match what was stored.
  #[instrument(level = "info", skip(self, draft), fields(questions = draft.questions.len()))]
  pub fn save(&self, name: &str, draft: &FormDraft) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
      return Err(FormError::validation("template name is required"));
    }
    draft.ensure_complete()?;

    let mut doc = self.read_document()?;
    let replaced = doc.insert(name.to_string(), draft.clone()).is_some();
    self.write_document(&doc)?;
    info!(target: "templates", %name, replaced, "Template saved");
    Ok(())
  }

  /// Copy of the template stored under `name`.
  #[instrument(level = "info", skip(self))]
  pub fn load(&self, name: &str) -> Result<Template> {
    let name = name.trim();
    let mut doc = self.read_document()?;
    let snapshot = doc
      .remove(name)
      .ok_or_else(|| FormError::NotFound(name.to_string()))?;
    Ok(Template { name: name.to_string(), snapshot })
  }

  /// Remove the template stored under `name`. Confirmation is the caller's job.
  #[instrument(level = "info", skip(self))]
  pub fn delete(&self, name: &str) -> Result<()> {
    let name = name.trim();
    let mut doc = self.read_document()?;
    if doc.remove(name).is_none() {
      return Err(FormError::NotFound(name.to_string()));
    }
    self.write_document(&doc)?;
    info!(target: "templates", %name, "Template deleted");
    Ok(())
  }

  fn read_document(&self) -> Result<Document> {
    let text = match fs::read_to_string(&self.path) {
      Ok(t) => t,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!(target: "templates", path = %self.path.display(), "No template document yet");
        return Ok(Document::new());
      }
      Err(e) => return Err(self.storage_error("read", e)),
    };
    if text.trim().is_empty() {
      return Ok(Document::new());
    }
    serde_json::from_str(&text).map_err(|e| self.storage_error("parse", e))
  }

  fn write_document(&self, doc: &Document) -> Result<()> {
    if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
      fs::create_dir_all(dir).map_err(|e| self.storage_error("create directory for", e))?;
    }
    let json = serde_json::to_string_pretty(doc)?;
    let tmp = self.tmp_path();
    fs::write(&tmp, json).map_err(|e| self.storage_error("write", e))?;
    fs::rename(&tmp, &self.path).map_err(|e| self.storage_error("replace", e))?;
    Ok(())
  }

  fn tmp_path(&self) -> PathBuf {
    let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    self.path.with_file_name(name)
  }

  fn storage_error(&self, action: &str, e: impl std::fmt::Display) -> FormError {
    FormError::Storage(format!("failed to {} {}: {}", action, self.path.display(), e))
  }
}
