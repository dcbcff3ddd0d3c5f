//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Editing the draft (title, add/remove/move/edit questions, reset)
//!   - Saving, loading, listing and deleting templates
//!   - Generating a form through the script endpoint and logging the result
//!
//! Every operation runs to completion against the shared session; the session lock is
//! never held across file I/O on the template document or the outbound request.

use tracing::{error, info, instrument, warn};

use crate::domain::{FormDraft, QuestionKind};
use crate::error::{FormError, Result};
use crate::state::{AppState, FormSession};

pub async fn current_session(state: &AppState) -> FormSession {
  state.session.read().await.clone()
}

#[instrument(level = "info", skip(state))]
pub async fn set_title(state: &AppState, title: &str) {
  state.session.write().await.title = title.trim().to_string();
}

#[instrument(level = "info", skip(state))]
pub async fn reset_draft(state: &AppState) {
  state.session.write().await.reset();
}

#[instrument(level = "info", skip(state, text, options), fields(kind = kind.as_str(), text_len = text.len()))]
pub async fn add_question(state: &AppState, kind: QuestionKind, text: &str, options: Option<Vec<String>>) -> Result<usize> {
  state.session.write().await.editor.add(kind, text, options)
}

#[instrument(level = "info", skip(state))]
pub async fn remove_question(state: &AppState, index: Option<usize>) -> Result<()> {
  let removed = state.session.write().await.editor.remove(index)?;
  info!(target: "form_builder", ?index, text = removed.text(), "Question removed");
  Ok(())
}

#[instrument(level = "info", skip(state))]
pub async fn move_question_up(state: &AppState, index: Option<usize>) -> Option<usize> {
  state.session.write().await.editor.move_up(index)
}

#[instrument(level = "info", skip(state))]
pub async fn move_question_down(state: &AppState, index: Option<usize>) -> Option<usize> {
  state.session.write().await.editor.move_down(index)
}

#[instrument(level = "info", skip(state, text, options), fields(text_len = text.len()))]
pub async fn edit_question(state: &AppState, index: Option<usize>, text: &str, options: Option<Vec<String>>) -> Result<bool> {
  state.session.write().await.editor.edit(index, text, options)
}

#[instrument(level = "info", skip(state))]
pub async fn list_templates(state: &AppState) -> Result<Vec<String>> {
  state.store.list()
}

/// Save the current draft under `name`, or under its title when no name is given.
/// Returns the name used.
#[instrument(level = "info", skip(state))]
pub async fn save_template(state: &AppState, name: Option<&str>) -> Result<String> {
  let draft = state.session.read().await.draft();
  let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
    Some(n) => n.to_string(),
    None => draft.title.clone(),
  };
  state.store.save(&name, &draft)?;
  Ok(name)
}

/// Replace the draft with a copy of the named template.
#[instrument(level = "info", skip(state))]
pub async fn load_template(state: &AppState, name: &str) -> Result<FormDraft> {
  let template = state.store.load(name)?;
  let snapshot = template.snapshot.clone();
  state.session.write().await.restore(template.snapshot);
  info!(target: "templates", %name, questions = snapshot.questions.len(), "Template loaded into draft");
  Ok(snapshot)
}

#[instrument(level = "info", skip(state))]
pub async fn delete_template(state: &AppState, name: &str) -> Result<()> {
  state.store.delete(name)
}

/// Submit the draft to the script endpoint and return the created form's link.
///
/// A non-empty `script_url` is remembered in the session once a form was created with it;
/// a failed call leaves the session untouched.
#[instrument(level = "info", skip(state, script_url))]
pub async fn generate_form(state: &AppState, script_url: Option<&str>) -> Result<String> {
  let requested = script_url.map(str::trim).filter(|u| !u.is_empty());
  let (draft, url) = {
    let session = state.session.read().await;
    let url = match requested {
      Some(u) => u.to_string(),
      None if !session.script_url.is_empty() => session.script_url.clone(),
      None => state.config.script_url.clone(),
    };
    (session.draft(), url)
  };

  draft.ensure_complete()?;
  if url.trim().is_empty() {
    return Err(FormError::Submit("no script URL configured".into()));
  }

  let link = state.submitter.submit(&url, &draft).await.map_err(|e| {
    warn!(target: "submit", title = %draft.title, error = %e, "Form generation failed");
    e
  })?;
  info!(target: "submit", title = %draft.title, %link, "Form created");
  if requested.is_some() {
    state.session.write().await.script_url = url;
  }

  if let Err(e) = state.history.append(&draft.title, &link) {
    error!(target: "form_builder", path = %state.history.path().display(), error = %e, "Failed to append form history");
  }
  Ok(link)
}
