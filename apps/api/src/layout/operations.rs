/// Horizontal placement of a written line within the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One primitive instruction for the document encoder.
///
/// Emitted by the layout engine, applied in order by the stream assembler.
/// `WriteLine` draws at the encoder's current position and then moves down one
/// line height at the current font size.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOperation {
    SetFontSize { size: f32 },
    WriteLine { text: String, align: Align },
    AdvanceCursor { amount: f32 },
    PageBreak,
}

impl DrawOperation {
    /// The text of a `WriteLine`, if this is one.
    pub fn line_text(&self) -> Option<&str> {
        match self {
            DrawOperation::WriteLine { text, .. } => Some(text),
            _ => None,
        }
    }
}
