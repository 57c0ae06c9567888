use std::sync::Arc;

use crate::auth::AuthGate;
use crate::config::Config;
use crate::layout::PageConfig;
use crate::render::markup::MarkupRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds configuration and collaborators only. Every generation request builds
/// its own cursor, plan and encoder; nothing here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable auth gate. Default: StaticTokenGate built from AUTH_TOKENS.
    pub auth: Arc<dyn AuthGate>,
    /// Browser-backed HTML renderer, if this deployment has one.
    pub markup: Option<Arc<dyn MarkupRenderer>>,
    /// Page geometry for the structured layout engine.
    pub page_config: PageConfig,
}
