use thiserror::Error;

use crate::layout::Align;

#[derive(Debug, Error, PartialEq)]
pub enum EncodingError {
    #[error("font size must be finite and positive, got {0}")]
    InvalidFontSize(f32),

    #[error("advance must be finite and non-negative, got {0}")]
    InvalidAdvance(f32),

    #[error("line written before any font size was set")]
    NoFontSelected,

    #[error("document stream aborted after an earlier encoder failure")]
    Aborted,

    #[error("encoder failure: {0}")]
    Backend(String),
}

/// The document-encoding capability driven by the stream assembler.
///
/// An encoder starts its first page on construction and keeps its own write
/// position: `write_line` draws at that position and then moves down one line
/// height at the current font size. `finalize` closes the stream and yields the
/// complete document; it consumes the encoder, so it can run at most once.
pub trait DocumentEncoder {
    fn set_font_size(&mut self, size: f32) -> Result<(), EncodingError>;
    fn write_line(&mut self, text: &str, align: Align) -> Result<(), EncodingError>;
    fn advance(&mut self, amount: f32) -> Result<(), EncodingError>;
    fn page_break(&mut self) -> Result<(), EncodingError>;
    fn finalize(self) -> Result<Vec<u8>, EncodingError>
    where
        Self: Sized;
}
