//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; option text is split into a list here, before the core sees it.

use std::sync::Arc;
use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument, warn};

use crate::error::FormError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;
use crate::util::parse_options;

impl IntoResponse for FormError {
  fn into_response(self) -> Response {
    let status = match &self {
      FormError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
      FormError::Range { .. } => StatusCode::BAD_REQUEST,
      FormError::NotFound(_) => StatusCode::NOT_FOUND,
      FormError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
      FormError::Submit(_) => StatusCode::BAD_GATEWAY,
    };
    warn!(target: "form_builder", %status, error = %self, "Request failed");
    (status, Json(ErrorOut { error: self.kind(), message: self.to_string() })).into_response()
  }
}

type ApiResult<T> = Result<Json<T>, FormError>;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_draft(State(state): State<Arc<AppState>>) -> Json<DraftOut> {
  Json(to_out(&current_session(&state).await))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_put_title(
  State(state): State<Arc<AppState>>,
  Json(body): Json<TitleIn>,
) -> Json<DraftOut> {
  set_title(&state, &body.title).await;
  Json(to_out(&current_session(&state).await))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_reset(State(state): State<Arc<AppState>>) -> Json<DraftOut> {
  reset_draft(&state).await;
  Json(to_out(&current_session(&state).await))
}

#[instrument(level = "info", skip(state, body), fields(kind = body.kind.as_str(), text_len = body.question.len()))]
pub async fn http_post_question(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AddQuestionIn>,
) -> ApiResult<IndexOut> {
  let options = body.options.as_deref().map(parse_options);
  let index = add_question(&state, body.kind, &body.question, options).await?;
  info!(target: "form_builder", index, "HTTP question added");
  Ok(Json(IndexOut { index }))
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.question.len()))]
pub async fn http_put_question(
  State(state): State<Arc<AppState>>,
  Path(index): Path<usize>,
  Json(body): Json<EditQuestionIn>,
) -> ApiResult<EditOut> {
  let options = body.options.as_deref().map(parse_options);
  let applied = edit_question(&state, Some(index), &body.question, options).await?;
  Ok(Json(EditOut { applied }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_question(
  State(state): State<Arc<AppState>>,
  Path(index): Path<usize>,
) -> Result<StatusCode, FormError> {
  remove_question(&state, Some(index)).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_move_up(State(state): State<Arc<AppState>>, Path(index): Path<usize>) -> Json<MoveOut> {
  Json(MoveOut { index: move_question_up(&state, Some(index)).await })
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_move_down(State(state): State<Arc<AppState>>, Path(index): Path<usize>) -> Json<MoveOut> {
  Json(MoveOut { index: move_question_down(&state, Some(index)).await })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_templates(State(state): State<Arc<AppState>>) -> ApiResult<TemplatesOut> {
  Ok(Json(TemplatesOut { names: list_templates(&state).await? }))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_template(
  State(state): State<Arc<AppState>>,
  body: Option<Json<SaveTemplateIn>>,
) -> ApiResult<SavedOut> {
  let body = body.map(|Json(b)| b).unwrap_or_default();
  let name = save_template(&state, body.name.as_deref()).await?;
  Ok(Json(SavedOut { name }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_load_template(
  State(state): State<Arc<AppState>>,
  Path(name): Path<String>,
) -> ApiResult<DraftOut> {
  load_template(&state, &name).await?;
  Ok(Json(to_out(&current_session(&state).await)))
}

/// Deleting requires `?confirm=true`; the store itself deletes unconditionally.
#[instrument(level = "info", skip(state))]
pub async fn http_delete_template(
  State(state): State<Arc<AppState>>,
  Path(name): Path<String>,
  Query(q): Query<DeleteQuery>,
) -> Result<StatusCode, FormError> {
  if !q.confirm {
    return Err(FormError::validation(format!("deleting '{}' must be confirmed", name)));
  }
  delete_template(&state, &name).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_generate(
  State(state): State<Arc<AppState>>,
  body: Option<Json<GenerateIn>>,
) -> ApiResult<GenerateOut> {
  let body = body.map(|Json(b)| b).unwrap_or_default();
  let link = generate_form(&state, body.script_url.as_deref()).await?;
  Ok(Json(GenerateOut { link }))
}
