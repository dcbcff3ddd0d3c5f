//! Error taxonomy shared by the editor, the template store and the submission client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
  /// Empty required field or a choice question without options. Nothing was mutated.
  #[error("validation failed: {0}")]
  Validation(String),

  /// Index out of bounds, or no question selected.
  #[error("no question at position {index:?} (list has {len})")]
  Range { index: Option<usize>, len: usize },

  #[error("template not found: {0}")]
  NotFound(String),

  /// Backing document unreadable, unwritable or corrupt.
  #[error("storage error: {0}")]
  Storage(String),

  /// Endpoint unreachable, non-success status or malformed reply.
  #[error("submission failed: {0}")]
  Submit(String),
}

impl FormError {
  pub fn validation(msg: impl Into<String>) -> Self {
    FormError::Validation(msg.into())
  }

  /// Short machine-readable kind used in HTTP error bodies.
  pub fn kind(&self) -> &'static str {
    match self {
      FormError::Validation(_) => "validation",
      FormError::Range { .. } => "range",
      FormError::NotFound(_) => "not_found",
      FormError::Storage(_) => "storage",
      FormError::Submit(_) => "submit",
    }
  }
}

impl From<std::io::Error> for FormError {
  fn from(e: std::io::Error) -> Self {
    FormError::Storage(e.to_string())
  }
}

impl From<serde_json::Error> for FormError {
  fn from(e: serde_json::Error) -> Self {
    FormError::Storage(e.to_string())
  }
}

pub type Result<T> = std::result::Result<T, FormError>;
