//! Greedy word wrap against the content width.

use crate::layout::font_metrics::FontMetricTable;

/// Splits `text` into printed lines no wider than `max_width_pt` at `font_size`.
///
/// Explicit newlines always break. Runs of whitespace collapse to one space.
/// A single word wider than the line is kept whole on its own line.
/// Always returns at least one line; an empty paragraph yields `""`.
pub fn wrap_text(
    text: &str,
    font_size: f32,
    max_width_pt: f32,
    metrics: &FontMetricTable,
) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let space_w = metrics.space_width * font_size;
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in words {
            let word_w = metrics.width_pt(word, font_size);

            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_w + word_w > max_width_pt {
                // Current line is full; push it and start a new one with this word.
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }
        lines.push(current);
    }

    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
