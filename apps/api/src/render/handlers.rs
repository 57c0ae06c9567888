//! Axum route handlers for document generation.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE},
        HeaderValue,
    },
    response::{IntoResponse, Response},
    Extension, Json,
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::auth::Identity;
use crate::errors::AppError;
use crate::render::assembler::{PDF_CONTENT_TYPE, RESUME_DISPOSITION};
use crate::render::markup::RenderOptions;
use crate::render::render_resume_blocking;
use crate::state::AppState;

const MARKUP_DISPOSITION: &str = "attachment; filename=output.pdf";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkupRequest {
    #[serde(default)]
    pub html_content: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-pdf
///
/// Lays out the structured resume in the body and returns it as a PDF download.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body?;
    let request_id = Uuid::new_v4();
    let span = info_span!("generate_pdf", %request_id, subject = %identity.subject);

    async move {
        info!("Generating resume PDF");
        let document = render_resume_blocking(body, state.page_config.clone()).await?;
        info!(bytes = document.len(), "Resume PDF ready");

        Ok::<_, AppError>(pdf_response(
            document.bytes,
            document.content_type,
            document.content_disposition,
        ))
    }
    .instrument(span)
    .await
}

/// POST /api/pdf
///
/// Renders `htmlContent` through the configured markup backend (A4, backgrounds on).
pub async fn handle_markup_pdf(
    State(state): State<AppState>,
    request: Result<Json<MarkupRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = request?;
    let markup = request
        .html_content
        .filter(|html| !html.trim().is_empty())
        .ok_or_else(|| AppError::Validation("HTML content is required".to_string()))?;

    let renderer = state.markup.as_ref().ok_or(AppError::NotImplemented)?;
    let bytes = renderer.render(&markup, &RenderOptions::default()).await?;

    info!(bytes = bytes.len(), "Markup PDF ready");
    Ok(pdf_response(bytes, PDF_CONTENT_TYPE, MARKUP_DISPOSITION))
}

fn pdf_response(bytes: Bytes, content_type: &'static str, disposition: &'static str) -> Response {
    (
        [
            (CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (CONTENT_DISPOSITION, HeaderValue::from_static(disposition)),
            (CONTENT_LENGTH, HeaderValue::from(bytes.len())),
        ],
        bytes,
    )
        .into_response()
}
