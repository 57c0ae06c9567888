//! Stream Assembler: applies draw operations to an encoder and finalizes exactly once.
//!
//! Operations are pushed one at a time. The document only exists after `finish`,
//! which consumes the assembler, so a second finalize cannot be expressed. If the
//! encoder fails, it is dropped together with its partial buffer; every later
//! push and the finish report `EncodingError::Aborted`.

use bytes::Bytes;
use tracing::warn;

use crate::layout::DrawOperation;
use crate::render::encoder::{DocumentEncoder, EncodingError};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const RESUME_DISPOSITION: &str = "attachment; filename=resume.pdf";

/// A finalized document ready for the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub bytes: Bytes,
    pub content_type: &'static str,
    pub content_disposition: &'static str,
}

impl RenderedDocument {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

pub struct StreamAssembler<E: DocumentEncoder> {
    /// `None` once the encoder has failed.
    encoder: Option<E>,
    applied: usize,
}

impl<E: DocumentEncoder> StreamAssembler<E> {
    pub fn new(encoder: E) -> Self {
        Self {
            encoder: Some(encoder),
            applied: 0,
        }
    }

    /// Number of operations applied so far.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Applies one operation to the encoder.
    pub fn push(&mut self, op: &DrawOperation) -> Result<(), EncodingError> {
        let encoder = self.encoder.as_mut().ok_or(EncodingError::Aborted)?;

        let result = match op {
            DrawOperation::SetFontSize { size } => encoder.set_font_size(*size),
            DrawOperation::WriteLine { text, align } => encoder.write_line(text, *align),
            DrawOperation::AdvanceCursor { amount } => encoder.advance(*amount),
            DrawOperation::PageBreak => encoder.page_break(),
        };

        match result {
            Ok(()) => {
                self.applied += 1;
                Ok(())
            }
            Err(e) => {
                warn!(
                    applied = self.applied,
                    "Stream assembler: encoder failed, discarding partial document: {e}"
                );
                self.encoder = None;
                Err(e)
            }
        }
    }

    /// Applies every operation in order.
    pub fn push_all<'a>(
        &mut self,
        ops: impl IntoIterator<Item = &'a DrawOperation>,
    ) -> Result<(), EncodingError> {
        ops.into_iter().try_for_each(|op| self.push(op))
    }

    /// Closes the stream and captures the finished bytes.
    pub fn finish(self) -> Result<RenderedDocument, EncodingError> {
        let encoder = self.encoder.ok_or(EncodingError::Aborted)?;
        let bytes = encoder.finalize()?;
        Ok(RenderedDocument {
            bytes: Bytes::from(bytes),
            content_type: PDF_CONTENT_TYPE,
            content_disposition: RESUME_DISPOSITION,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
