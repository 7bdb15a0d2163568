//! Axum route handler for document generation.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::{builder::build_document, gate};
use crate::state::AppState;

/// `{prefix}_{YYYYMMDD_HHMMSS}.{extension}` for the given instant.
pub fn download_filename<Tz: TimeZone>(prefix: &str, at: &DateTime<Tz>, extension: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{prefix}_{}.{extension}", at.format("%Y%m%d_%H%M%S"))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate_cv
///
/// Validates a résumé record and returns it as a Word document attachment.
/// Input problems are 400s; anything that fails after admission is a 500.
pub async fn handle_generate_cv(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    debug!(
        "Received CV request: {} bytes, content type {:?}",
        body.len(),
        content_type
    );

    let record = gate::admit_request(content_type, &body)?;

    // Build + serialize is CPU-bound; keep it off the async executor.
    let style = state.style.clone();
    let sink = state.sink.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        let document = build_document(&record, &style);
        sink.serialize(&document)
    })
    .await
    .map_err(|e| AppError::Rendering(format!("document task failed: {e}")))??;

    let filename = download_filename(
        &state.config.file_prefix,
        &Local::now(),
        state.sink.extension(),
    );
    info!("Generated {filename} ({} bytes)", bytes.len());

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| AppError::Rendering(format!("invalid download filename: {e}")))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(state.sink.media_type()),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
