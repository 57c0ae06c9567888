//! Render pipeline: Normalizer → Layout Engine → Stream Assembler.
//!
//! `render_resume` is the synchronous pipeline. `render_resume_blocking` runs it
//! on the blocking pool so async handlers never do layout work on the executor.

pub mod assembler;
pub mod encoder;
pub mod handlers;
pub mod markup;
pub mod normalizer;
pub mod pdf_encoder;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::layout::{layout_resume, LayoutError, PageConfig};
use crate::render::assembler::{RenderedDocument, StreamAssembler};
use crate::render::encoder::EncodingError;
use crate::render::normalizer::{normalize, ValidationError};
use crate::render::pdf_encoder::PdfEncoder;

/// Failure of any pipeline stage. `kind()` is the stable, machine-readable tag.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid resume: {0}")]
    Validation(#[from] ValidationError),

    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("encoding failed: {0}")]
    Encoding(#[from] EncodingError),
}

impl PipelineError {
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Validation(_) => "VALIDATION_ERROR",
            PipelineError::Layout(_) => "LAYOUT_ERROR",
            PipelineError::Encoding(_) => "ENCODING_ERROR",
        }
    }
}

/// Runs the full pipeline on a raw request body.
pub fn render_resume(body: &Value, config: &PageConfig) -> Result<RenderedDocument, PipelineError> {
    let record = normalize(body)?;
    let plan = layout_resume(&record, config)?;

    let mut assembler = StreamAssembler::new(PdfEncoder::begin(config));
    assembler.push_all(&plan.operations)?;
    let document = assembler.finish()?;

    info!(
        pages = plan.page_count,
        breaks = plan.page_breaks(),
        operations = plan.operations.len(),
        bytes = document.len(),
        "Rendered resume document"
    );
    Ok(document)
}

/// `render_resume` on `tokio::task::spawn_blocking`.
pub async fn render_resume_blocking(
    body: Value,
    config: PageConfig,
) -> Result<RenderedDocument, AppError> {
    let result = tokio::task::spawn_blocking(move || render_resume(&body, &config))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render pipeline: {e}"))
        })?;
    result.map_err(|e| {
        warn!(kind = e.kind(), "Render pipeline failed: {e}");
        AppError::from(e)
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{default_page_config, PageFormat};
    use serde_json::json;

    fn make_config() -> PageConfig {
        default_page_config(PageFormat::Letter)
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_render_scenario_single_page() {
        let body = json!({
            "name": "A", "email": "a@x.com", "phone": "", "address": "",
            "education": [], "experience": [], "skills": ["Go"], "projects": []
        });

        let doc = render_resume(&body, &make_config()).unwrap();
        assert!(doc.bytes.starts_with(b"%PDF-"));
        assert!(contains(&doc.bytes, b"(Resume: A) Tj"));
        assert!(contains(&doc.bytes, b"(Go) Tj"));
        assert!(contains(&doc.bytes, b"/Count 1"));
        assert_eq!(doc.len(), doc.bytes.len());
    }

    #[test]
    fn test_render_is_byte_deterministic() {
        let body = json!({
            "name": "Determinism",
            "education": (0..15).map(|i| json!({"institution": format!("School {i}")})).collect::<Vec<_>>(),
            "skills": "Rust, Go"
        });
        let config = make_config();
        let first = render_resume(&body, &config).unwrap();
        let second = render_resume(&body, &config).unwrap();
        assert_eq!(first, second);

        let plan = layout_resume(&normalize(&body).unwrap(), &config).unwrap();
        assert!(plan.page_count > 1);
        let count = format!("/Count {}", plan.page_count);
        assert!(contains(&first.bytes, count.as_bytes()));
    }

    #[test]
    fn test_blank_space_at_page_end_adds_no_page() {
        let skills: Vec<String> = (0..24).map(|i| format!("Skill {i}")).collect();
        let body = json!({"skills": skills, "projects": [{}]});

        let doc = render_resume(&body, &make_config()).unwrap();
        assert!(contains(&doc.bytes, b"/Count 1"));
        assert!(!contains(&doc.bytes, b"/Count 2"));
    }

    #[test]
    fn test_render_rejects_non_object() {
        let err = render_resume(&json!("nope"), &make_config()).unwrap_err();
        assert_eq!(err.kind(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_render_bad_geometry_is_layout_error() {
        let mut config = make_config();
        config.margin_pt = 1000.0;
        let err = render_resume(&json!({}), &config).unwrap_err();
        assert_eq!(err.kind(), "LAYOUT_ERROR");
    }

    #[test]
    fn test_encoding_error_kind() {
        let err = PipelineError::from(EncodingError::Aborted);
        assert_eq!(err.kind(), "ENCODING_ERROR");
    }

    #[tokio::test]
    async fn test_render_blocking_matches_sync() {
        let body = json!({"name": "A", "skills": ["Go"]});
        let config = make_config();
        let sync = render_resume(&body, &config).unwrap();
        let blocking = render_resume_blocking(body, config).await.unwrap();
        assert_eq!(sync, blocking);
    }
}
