//! Page geometry and the static Helvetica width table used for wrapping and centering.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Adobe core-14 Helvetica AFM. The PDF encoder draws with the same base font,
//! so measured widths match what the viewer renders.
//! The table covers ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use std::str::FromStr;

// ────────────────────────────────────────────────────────────────────────────
// Page format
// ────────────────────────────────────────────────────────────────────────────

/// Paper sizes the service can lay out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageFormat {
    /// US letter, 8.5" × 11".
    Letter,
    /// ISO A4, 210mm × 297mm.
    A4,
}

impl PageFormat {
    /// Paper size in PDF points (1/72"), as `(width, height)`.
    pub fn size_pt(self) -> (f32, f32) {
        match self {
            PageFormat::Letter => (612.0, 792.0),
            PageFormat::A4 => (595.28, 841.89),
        }
    }
}

impl FromStr for PageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" => Ok(PageFormat::Letter),
            "a4" => Ok(PageFormat::A4),
            other => Err(format!("unknown page format '{other}' (expected letter or a4)")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Layout parameters for every page of a generated document.
///
/// Content area = paper minus `margin_pt` on all four sides. The page cursor
/// measures offsets from the top of the content area.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub format: PageFormat,
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_pt: f32,
}

impl PageConfig {
    /// Usable text width in points.
    pub fn content_width(&self) -> f32 {
        self.page_width_pt - 2.0 * self.margin_pt
    }

    /// Usable text height in points; this is the cursor's page height.
    pub fn content_height(&self) -> f32 {
        self.page_height_pt - 2.0 * self.margin_pt
    }
}

/// Returns the default page config for the given paper size: 1" (72pt) margins.
pub fn default_page_config(format: PageFormat) -> PageConfig {
    let (page_width_pt, page_height_pt) = format.size_pt();
    PageConfig {
        format,
        page_width_pt,
        page_height_pt,
        margin_pt: 72.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table.
///
/// All widths are in em units at 1em (i.e., at the configured font size).
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space) through 0x7E (~).
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Rendered width of `s` in points at `font_size`.
    pub fn width_pt(&self, s: &str, font_size: f32) -> f32 {
        self.measure_str(s) * font_size
    }
}

/// Helvetica (core-14 PDF font).
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

/// Returns the metric table for the document font.
pub fn get_metrics() -> &'static FontMetricTable {
    &HELVETICA_TABLE
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics().measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_single_space() {
        let width = get_metrics().measure_str(" ");
        assert!(
            (width - 0.278).abs() < 1e-4,
            "space width should be 0.278, got {width}"
        );
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = get_metrics().measure_str("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust width should be ~2.056, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics();
        let width = metrics.measure_str("é");
        assert!(
            (width - metrics.average_char_width).abs() < 1e-4,
            "non-ASCII should use average_char_width"
        );
    }

    #[test]
    fn test_width_pt_scales_with_font_size() {
        let metrics = get_metrics();
        let at_10 = metrics.width_pt("Skills", 10.0);
        let at_20 = metrics.width_pt("Skills", 20.0);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-3);
    }

    #[test]
    fn test_default_page_config_letter() {
        let config = default_page_config(PageFormat::Letter);
        assert_eq!(config.format, PageFormat::Letter);
        assert_eq!(config.content_width(), 468.0);
        assert_eq!(config.content_height(), 648.0);
    }

    #[test]
    fn test_default_page_config_a4_is_taller_than_letter() {
        let a4 = default_page_config(PageFormat::A4);
        let letter = default_page_config(PageFormat::Letter);
        assert!(a4.content_height() > letter.content_height());
        assert!(a4.content_width() < letter.content_width());
    }

    #[test]
    fn test_page_format_from_str() {
        assert_eq!("letter".parse::<PageFormat>(), Ok(PageFormat::Letter));
        assert_eq!(" A4 ".parse::<PageFormat>(), Ok(PageFormat::A4));
        assert!("legal".parse::<PageFormat>().is_err());
    }
}
