//! Tracing setup for the form builder.
//!
//! `LOG_LEVEL` takes a full `EnvFilter` directive string; `LOG_FORMAT=json` switches
//! the formatter to one JSON object per line.
//!
//! Event targets map to the three places that touch the outside world, so each can be
//! turned up on its own:
//!   - `form_builder`: draft edits, startup, request failures
//!   - `templates`: reads and rewrites of the template document
//!   - `submit`: calls to the form script and their latency
//!
//! `tower_http` adds one span per HTTP request.

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
        EnvFilter::new("info,form_builder=debug,templates=debug,submit=debug,tower_http=info,axum=info")
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // The two formatters are different types, so each branch calls init itself.
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => {
            builder.json().init();
        }
        _ => {
            builder.init();
        }
    }
}
