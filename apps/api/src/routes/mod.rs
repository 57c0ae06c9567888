pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::require_auth;
use crate::render::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::banner_handler))
        .route("/health", get(health::health_handler))
        // Structured resume → PDF (bearer auth)
        .route(
            "/generate-pdf",
            post(handlers::handle_generate_pdf).route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_auth,
            )),
        )
        // Markup → PDF (public, needs a configured backend)
        .route("/api/pdf", post(handlers::handle_markup_pdf))
        .with_state(state)
}
