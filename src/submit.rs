//! Client for the user-deployed form-creation script.
//!
//! One POST of `{title, questions}` as JSON; the script answers with the new form's
//! link as plain text. Calls log the endpoint host, status and latency, never the body.

use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::{error, info, instrument};

use crate::domain::FormDraft;
use crate::error::{FormError, Result};
use crate::util::trunc_for_log;

/// Prefix the script uses to report its own failures in a 200 response.
const SCRIPT_ERROR_PREFIX: &str = "Error:";

#[derive(Clone)]
pub struct ScriptClient {
  client: reqwest::Client,
}

impl ScriptClient {
  pub fn new(timeout: Duration) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| FormError::Submit(format!("cannot build HTTP client: {}", e)))?;
    Ok(Self { client })
  }

  /// Submit the draft and return the link to the created form.
  #[instrument(level = "info", skip(self, draft), fields(questions = draft.questions.len()))]
  pub async fn submit(&self, url: &str, draft: &FormDraft) -> Result<String> {
    let url = url.trim();
    if url.is_empty() {
      return Err(FormError::Submit("no script URL configured".into()));
    }

    let started = Instant::now();
    let res = self.client.post(url)
      .header(USER_AGENT, "form-builder-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(draft)
      .send()
      .await
      .map_err(|e| {
        error!(target: "submit", error = %e, "Script request failed");
        FormError::Submit(e.to_string())
      })?;

    let status = res.status();
    let body = res.text().await.map_err(|e| FormError::Submit(e.to_string()))?;
    info!(target: "submit", %status, elapsed_ms = started.elapsed().as_millis() as u64, body_len = body.len(), "Script responded");

    if !status.is_success() {
      return Err(FormError::Submit(format!("script returned HTTP {}: {}", status, trunc_for_log(&body, 200))));
    }
    parse_link(&body)
  }
}

/// Interpret the script's plain-text reply.
fn parse_link(body: &str) -> Result<String> {
  let link = body.trim();
  if link.is_empty() {
    return Err(FormError::Submit("script returned an empty response".into()));
  }
  if link.starts_with(SCRIPT_ERROR_PREFIX) {
    return Err(FormError::Submit(format!("script reported: {}", trunc_for_log(link, 200))));
  }
  Ok(link.to_string())
}
