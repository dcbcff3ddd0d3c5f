//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Question, QuestionKind};
use crate::state::FormSession;

/// DTO for the draft currently being authored.
#[derive(Debug, Serialize)]
pub struct DraftOut {
    pub title: String,
    pub questions: Vec<Question>,
    /// Numbered lines as shown in the question list.
    pub lines: Vec<String>,
}

/// Convert the live session to the public DTO.
pub fn to_out(session: &FormSession) -> DraftOut {
    let questions = session.editor.questions().to_vec();
    let lines = questions
        .iter()
        .enumerate()
        .map(|(i, q)| q.display_line(i + 1))
        .collect();
    DraftOut {
        title: session.title.clone(),
        questions,
        lines,
    }
}

//
// HTTP request/response DTOs
//

#[derive(Deserialize)]
pub struct TitleIn {
    pub title: String,
}

/// Options arrive as the comma-separated text the user typed.
#[derive(Deserialize)]
pub struct AddQuestionIn {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: String,
    #[serde(default)]
    pub options: Option<String>,
}
#[derive(Serialize)]
pub struct IndexOut {
    pub index: usize,
}

#[derive(Deserialize)]
pub struct EditQuestionIn {
    pub question: String,
    #[serde(default)]
    pub options: Option<String>,
}
#[derive(Serialize)]
pub struct EditOut {
    pub applied: bool,
}

/// New position of a moved question; `null` when the move was a no-op.
#[derive(Serialize)]
pub struct MoveOut {
    pub index: Option<usize>,
}

#[derive(Serialize)]
pub struct TemplatesOut {
    pub names: Vec<String>,
}

#[derive(Deserialize, Default)]
pub struct SaveTemplateIn {
    #[serde(default)]
    pub name: Option<String>,
}
#[derive(Serialize)]
pub struct SavedOut {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIn {
    #[serde(default)]
    pub script_url: Option<String>,
}
#[derive(Serialize)]
pub struct GenerateOut {
    pub link: String,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: &'static str,
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
