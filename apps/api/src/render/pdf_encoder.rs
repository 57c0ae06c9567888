//! PDF implementation of `DocumentEncoder` on top of `pdf-writer`.
//!
//! Object layout: 1 = catalog, 2 = page tree, 3 = Helvetica (WinAnsi), then one
//! content stream + page object per finished page. Content streams are left
//! uncompressed and no timestamps are written, so equal input gives equal bytes.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use crate::layout::cursor::line_height;
use crate::layout::font_metrics::{get_metrics, FontMetricTable, PageConfig};
use crate::layout::Align;
use crate::render::encoder::{DocumentEncoder, EncodingError};

const FONT_NAME: Name<'static> = Name(b"F1");

pub struct PdfEncoder {
    pdf: Pdf,
    config: PageConfig,
    metrics: &'static FontMetricTable,
    page_tree_id: Ref,
    font_id: Ref,
    next_ref: i32,
    /// Finished pages, in order.
    pages: Vec<Ref>,
    /// Operators for the page currently being written.
    content: Content,
    /// Distance in points from the top of the content area to the next line box.
    offset: f32,
    font_size: Option<f32>,
}

impl PdfEncoder {
    /// Opens a new document with its first (empty) page.
    pub fn begin(config: &PageConfig) -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            config: config.clone(),
            metrics: get_metrics(),
            page_tree_id,
            font_id,
            next_ref: 4,
            pages: Vec::new(),
            content: Content::new(),
            offset: 0.0,
            font_size: None,
        }
    }

    fn alloc_ref(&mut self) -> Ref {
        let id = Ref::new(self.next_ref);
        self.next_ref += 1;
        id
    }

    /// Left edge of a line of `text` at `font_size`.
    fn line_x(&self, text: &str, font_size: f32, align: Align) -> f32 {
        let margin = self.config.margin_pt;
        match align {
            Align::Left => margin,
            Align::Center => {
                let slack = self.config.content_width() - self.metrics.width_pt(text, font_size);
                margin + (slack / 2.0).max(0.0)
            }
        }
    }

    /// Writes the current content stream and its page object, then starts a fresh page.
    fn flush_page(&mut self) {
        let content = std::mem::replace(&mut self.content, Content::new());
        let page_id = self.alloc_ref();
        let content_id = self.alloc_ref();

        self.pdf.stream(content_id, &content.finish());

        let mut page = self.pdf.page(page_id);
        page.media_box(Rect::new(
            0.0,
            0.0,
            self.config.page_width_pt,
            self.config.page_height_pt,
        ));
        page.parent(self.page_tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(FONT_NAME, self.font_id);
        }
        page.finish();

        self.pages.push(page_id);
        self.offset = 0.0;
    }
}

impl DocumentEncoder for PdfEncoder {
    fn set_font_size(&mut self, size: f32) -> Result<(), EncodingError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(EncodingError::InvalidFontSize(size));
        }
        self.font_size = Some(size);
        Ok(())
    }

    fn write_line(&mut self, text: &str, align: Align) -> Result<(), EncodingError> {
        let font_size = self.font_size.ok_or(EncodingError::NoFontSelected)?;

        if !text.is_empty() {
            let x = self.line_x(text, font_size, align);
            // Baseline sits one font size below the top of the line box.
            let y = self.config.page_height_pt - self.config.margin_pt - self.offset - font_size;
            let encoded = to_winansi(text);
            self.content
                .begin_text()
                .set_font(FONT_NAME, font_size)
                .next_line(x, y)
                .show(Str(&encoded))
                .end_text();
        }

        self.offset += line_height(font_size);
        Ok(())
    }

    fn advance(&mut self, amount: f32) -> Result<(), EncodingError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(EncodingError::InvalidAdvance(amount));
        }
        self.offset += amount;
        Ok(())
    }

    fn page_break(&mut self) -> Result<(), EncodingError> {
        self.flush_page();
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<u8>, EncodingError> {
        self.flush_page();
        self.pdf
            .pages(self.page_tree_id)
            .kids(self.pages.iter().copied())
            .count(self.pages.len() as i32);
        Ok(self.pdf.finish())
    }
}

/// Maps text to WinAnsiEncoding bytes for the core Helvetica font.
///
/// Latin-1 passes through; common typographic punctuation maps to its WinAnsi
/// slot; control characters become spaces; anything else becomes `?`.
pub fn to_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            c if (c as u32) < 0x20 => b' ',
            c if (c as u32) < 0x7F => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
