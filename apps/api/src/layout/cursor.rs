//! Page cursor: the single source of truth for how much vertical space is left.
//!
//! # Pagination policy
//! - An advance that fits (`offset + amount <= page_height`) moves the cursor down.
//! - An advance that does not fit starts a new page: the page index increments,
//!   the offset restarts at 0 and the triggering advance is placed at the top of
//!   the new page.
//! - An advance larger than the whole page still triggers exactly one break; the
//!   new page starts at 0 plus the excess, clamped to the page height.
//!
//! - Blank space (`consume_space`) never starts a page; it stops at the bottom.
//!
//! Pagination is purely geometric. A section header may end up alone at the
//! bottom of a page.

use thiserror::Error;

/// Line height as a multiple of font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Slack allowed when comparing against the page height, absorbing f32 drift
/// so that exactly `page_height / line_height` lines fit on one page.
const FIT_TOLERANCE_PT: f32 = 0.01;

/// Returns the advance used for one printed line at `font_size`.
pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("page geometry is unusable: height {height}pt, width {width}pt")]
    InvalidGeometry { height: f32, width: f32 },

    #[error("advance must be finite and non-negative, got {0}")]
    InvalidAdvance(f32),
}

/// Outcome of a cursor request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub page_break_triggered: bool,
}

/// Vertical position within the current page.
///
/// Offsets are measured in points from the top of the content area.
/// Invariants: `offset ∈ [0, page_height]`; `page_index` starts at 0 and never decreases.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor {
    offset: f32,
    page_height: f32,
    page_width: f32,
    page_index: usize,
}

impl PageCursor {
    /// Creates a cursor at the top of the first page.
    pub fn new(page_height: f32, page_width: f32) -> Result<Self, LayoutError> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(page_height) || !usable(page_width) {
            return Err(LayoutError::InvalidGeometry {
                height: page_height,
                width: page_width,
            });
        }
        Ok(Self {
            offset: 0.0,
            page_height,
            page_width,
            page_index: 0,
        })
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Number of pages touched so far (always at least 1).
    pub fn page_count(&self) -> usize {
        self.page_index + 1
    }

    /// Moves the cursor down by `amount`, starting a new page if it does not fit.
    pub fn request_advance(&mut self, amount: f32) -> Result<Advance, LayoutError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(LayoutError::InvalidAdvance(amount));
        }

        if self.offset + amount <= self.page_height + FIT_TOLERANCE_PT {
            self.offset = (self.offset + amount).min(self.page_height);
            return Ok(Advance {
                page_break_triggered: false,
            });
        }

        self.page_index += 1;
        self.offset = if amount > self.page_height {
            (amount - self.page_height).min(self.page_height)
        } else {
            amount
        };
        Ok(Advance {
            page_break_triggered: true,
        })
    }

    /// Reserves one printed line at `font_size`.
    pub fn request_line(&mut self, font_size: f32) -> Result<Advance, LayoutError> {
        self.request_advance(line_height(font_size))
    }

    /// Moves down by up to `amount` of blank space without ever starting a page.
    ///
    /// Space that does not fit is dropped at the page bottom, so the next line
    /// request is the one that breaks. Returns the space actually consumed.
    pub fn consume_space(&mut self, amount: f32) -> Result<f32, LayoutError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(LayoutError::InvalidAdvance(amount));
        }
        let consumed = amount.min(self.page_height - self.offset).max(0.0);
        self.offset = (self.offset + consumed).min(self.page_height);
        Ok(consumed)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
