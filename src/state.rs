//! Application state: the authoring session, template store, script client and history log.
//!
//! This module owns:
//!   - the live draft (title + question editor) behind a lock
//!   - the template store and history log file locations
//!   - the outbound script client
//!   - the loaded configuration

use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::config::{load_app_config_from_env, AppConfig};
use crate::domain::FormDraft;
use crate::editor::QuestionListEditor;
use crate::error::Result;
use crate::history::HistoryLog;
use crate::store::TemplateStore;
use crate::submit::ScriptClient;

/// The form currently being authored.
#[derive(Clone, Debug, Default)]
pub struct FormSession {
    pub title: String,
    pub editor: QuestionListEditor,
    /// Last script URL used; falls back to the configured one when empty.
    pub script_url: String,
}

impl FormSession {
    /// Detached copy of the title and questions.
    pub fn draft(&self) -> FormDraft {
        FormDraft::new(self.title.trim(), self.editor.questions().to_vec())
    }

    /// Overwrite the session with a snapshot's content.
    pub fn restore(&mut self, snapshot: FormDraft) {
        self.title = snapshot.title;
        self.editor.replace_all(snapshot.questions);
    }

    pub fn reset(&mut self) {
        self.title.clear();
        self.editor.clear();
    }
}

pub struct AppState {
    pub session: RwLock<FormSession>,
    pub store: TemplateStore,
    pub history: HistoryLog,
    pub submitter: ScriptClient,
    pub config: AppConfig,
}

impl AppState {
    /// Build state from env: load config, then wire store, history and client.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Result<Self> {
        Self::with_config(load_app_config_from_env())
    }

    pub fn with_config(config: AppConfig) -> Result<Self> {
        let submitter = ScriptClient::new(Duration::from_secs(config.submit_timeout_secs))?;
        let store = TemplateStore::new(&config.templates_path);
        let history = HistoryLog::new(&config.history_path);
        let session = FormSession {
            script_url: config.script_url.clone(),
            ..FormSession::default()
        };

        info!(
            target: "form_builder",
            templates = %store.path().display(),
            history = %history.path().display(),
            script_url_set = !config.script_url.is_empty(),
            "State initialized"
        );

        Ok(Self {
            session: RwLock::new(session),
            store,
            history,
            submitter,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuestionKind;

    #[test]
    fn test_draft_is_detached_copy() {
        let mut session = FormSession::default();
        session.title = "  Survey ".into();
        session.editor.add(QuestionKind::ShortAnswer, "Name?", None).unwrap();

        let draft = session.draft();
        session.editor.clear();
        assert_eq!(draft.title, "Survey");
        assert_eq!(draft.questions.len(), 1);
    }

    #[test]
    fn test_restore_and_reset() {
        let mut session = FormSession::default();
        session.editor.add(QuestionKind::Paragraph, "Old", None).unwrap();

        let mut other = FormSession::default();
        other.title = "New".into();
        other.editor.add(QuestionKind::ShortAnswer, "A", None).unwrap();
        other.editor.add(QuestionKind::ShortAnswer, "B", None).unwrap();

        session.restore(other.draft());
        assert_eq!(session.title, "New");
        assert_eq!(session.editor.len(), 2);

        session.reset();
        assert!(session.title.is_empty());
        assert!(session.editor.is_empty());
    }
}
