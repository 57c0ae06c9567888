// Structured-resume layout: page cursor, line wrapping and the draw-operation plan.
// Pure CPU work with no I/O; callers run it inside tokio::task::spawn_blocking.

pub mod cursor;
pub mod engine;
pub mod font_metrics;
pub mod operations;
pub mod wrap;

// Re-export the public API consumed by the render pipeline and handlers.
pub use cursor::LayoutError;
pub use engine::{layout_resume, LayoutPlan};
pub use font_metrics::{default_page_config, PageConfig, PageFormat};
pub use operations::{Align, DrawOperation};
