//! Domain models: question kinds, questions, drafts and templates.
//!
//! The JSON shape of a question is shared by the template document and the payload
//! sent to the form script: `{ "type": ..., "question": ..., "options": [...] }`,
//! where `options` only appears on multiple-choice questions.

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

/// Closed set of question kinds the form script knows how to materialize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
  ShortAnswer,
  Paragraph,
  MultipleChoice,
}
impl QuestionKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      QuestionKind::ShortAnswer => "short_answer",
      QuestionKind::Paragraph => "paragraph",
      QuestionKind::MultipleChoice => "multiple_choice",
    }
  }
}

/// A single form question.
///
/// Invariant: `options` is non-empty (and every option non-empty) exactly when
/// `kind` is `MultipleChoice`; it is empty otherwise and never serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
  #[serde(rename = "type")]
  kind: QuestionKind,
  #[serde(rename = "question")]
  text: String,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  options: Vec<String>,
}

/// Unchecked wire form; converted through `Question::new` so stored data obeys the invariant.
#[derive(Deserialize)]
struct RawQuestion {
  #[serde(rename = "type")]
  kind: QuestionKind,
  question: String,
  #[serde(default)]
  options: Option<Vec<String>>,
}

impl TryFrom<RawQuestion> for Question {
  type Error = FormError;

  fn try_from(raw: RawQuestion) -> Result<Self> {
    if raw.kind != QuestionKind::MultipleChoice && raw.options.is_some() {
      return Err(FormError::validation(format!(
        "{} question '{}' must not carry options",
        raw.kind.as_str(),
        raw.question
      )));
    }
    Question::new(raw.kind, &raw.question, raw.options)
  }
}

impl Question {
  /// Build a question from user input. Text is trimmed; options are kept only for
  /// multiple choice and must then be present, non-empty, and free of empty entries.
  pub fn new(kind: QuestionKind, text: &str, options: Option<Vec<String>>) -> Result<Self> {
    let text = text.trim();
    if text.is_empty() {
      return Err(FormError::validation("question text is required"));
    }

    let options = match kind {
      QuestionKind::MultipleChoice => {
        let options = options.unwrap_or_default();
        check_options(&options)?;
        options
      }
      _ => Vec::new(),
    };

    Ok(Self { kind, text: text.to_string(), options })
  }

  pub fn kind(&self) -> QuestionKind { self.kind }
  pub fn text(&self) -> &str { &self.text }
  pub fn options(&self) -> &[String] { &self.options }

  pub(crate) fn set_text(&mut self, text: String) { self.text = text; }
  pub(crate) fn set_options(&mut self, options: Vec<String>) { self.options = options; }

  /// One line of the numbered question list, `position` being 1-based.
  pub fn display_line(&self, position: usize) -> String {
    let mut line = format!("{}. [{}] {}", position, self.kind.as_str(), self.text);
    if self.kind == QuestionKind::MultipleChoice {
      line.push_str(" → ");
      line.push_str(&self.options.join(", "));
    }
    line
  }
}

/// Options must be a non-empty list of non-empty strings.
pub(crate) fn check_options(options: &[String]) -> Result<()> {
  if options.is_empty() {
    return Err(FormError::validation("multiple choice requires options"));
  }
  if options.iter().any(|o| o.is_empty()) {
    return Err(FormError::validation("options must not be empty"));
  }
  Ok(())
}

/// The form being authored: a title plus questions in submission order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDraft {
  pub title: String,
  pub questions: Vec<Question>,
}

impl FormDraft {
  pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Self {
    Self { title: title.into(), questions }
  }

  /// A draft may only be saved or submitted with a title and at least one question.
  pub fn ensure_complete(&self) -> Result<()> {
    if self.title.trim().is_empty() {
      return Err(FormError::validation("form title is required"));
    }
    if self.questions.is_empty() {
      return Err(FormError::validation("add at least one question"));
    }
    Ok(())
  }
}

/// A named snapshot of a draft, decoupled from the live editor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Template {
  pub name: String,
  pub snapshot: FormDraft,
}
