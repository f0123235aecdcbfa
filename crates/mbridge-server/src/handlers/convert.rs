//! Conversion endpoints.
//!
//! Both endpoints take a plain text body and return plain text. Errors come
//! back as JSON bodies with a matching status code.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use mbridge_markup::{MarkdownRenderer, ParseOptions};
use serde::Deserialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Query parameters for POST /contentapi2discord.
#[derive(Deserialize)]
pub(crate) struct ConvertParams {
    /// Source dialect; the server default applies when absent.
    lang: Option<String>,
}

/// Handle POST /discord2contentapi.
///
/// Always 200 with best-effort output: malformed markdown degrades to
/// literal escaped text instead of failing the request.
pub(crate) async fn discord_to_markup(
    State(state): State<Arc<AppState>>,
    body: String,
) -> String {
    if state.verbose {
        tracing::info!(bytes = body.len(), "converting markdown to markup");
    }
    mbridge_markdown::convert(&body)
}

/// Handle POST /contentapi2discord.
pub(crate) async fn markup_to_discord(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConvertParams>,
    body: String,
) -> Result<String, ServerError> {
    let lang = params.lang.as_deref().unwrap_or(&state.default_dialect);
    if state.verbose {
        tracing::info!(bytes = body.len(), lang, "converting markup to markdown");
    }

    let document = state.registry.parse(&body, lang, &ParseOptions::default())?;
    let renderer = if state.strict_render {
        MarkdownRenderer::new().strict()
    } else {
        MarkdownRenderer::new()
    };
    Ok(renderer.render(&document)?)
}

/// Fallback for unmatched routes.
///
/// The literal "404" body predates this implementation and existing bridge
/// clients match on it; only the status code was corrected.
pub(crate) async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404")
}
