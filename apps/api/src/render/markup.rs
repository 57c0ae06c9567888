//! Markup rendering: the browser-backed HTML → PDF path.
//!
//! The service does not ship a browser backend. A deployment that has one plugs
//! it in through `MarkupRenderer`; without one the `/api/pdf` route answers 501.
//!
//! `AppState` holds an `Option<Arc<dyn MarkupRenderer>>`.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::layout::PageFormat;

/// Options handed to the backend along with the markup.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub page_format: PageFormat,
    pub print_background: bool,
}

impl Default for RenderOptions {
    /// A4 with backgrounds printed.
    fn default() -> Self {
        Self {
            page_format: PageFormat::A4,
            print_background: true,
        }
    }
}

#[derive(Debug, Error)]
#[error("markup rendering failed: {0}")]
pub struct MarkupError(pub String);

#[async_trait]
pub trait MarkupRenderer: Send + Sync {
    async fn render(&self, markup: &str, options: &RenderOptions) -> Result<Bytes, MarkupError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_match_browser_path() {
        let options = RenderOptions::default();
        assert_eq!(options.page_format, PageFormat::A4);
        assert!(options.print_background);
    }
}
