//! Auth gate: verifies a bearer credential before protected routes run.
//!
//! The gate is a yes/no decision with an `Identity` payload. On success the
//! identity is inserted into the request extensions for handlers to read.
//!
//! `AppState` holds an `Arc<dyn AuthGate>`; `StaticTokenGate` is the default,
//! built from the `AUTH_TOKENS` grants.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;
use crate::state::AppState;

/// Who the verified credential belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
}

#[async_trait]
pub trait AuthGate: Send + Sync {
    /// Returns the identity for a valid token, `None` otherwise.
    async fn verify(&self, token: &str) -> Option<Identity>;
}

/// Fixed token → subject table.
pub struct StaticTokenGate {
    grants: HashMap<String, String>,
}

impl StaticTokenGate {
    pub fn new(grants: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            grants: grants.into_iter().collect(),
        }
    }
}

#[async_trait]
impl AuthGate for StaticTokenGate {
    async fn verify(&self, token: &str) -> Option<Identity> {
        self.grants.get(token).map(|subject| Identity {
            subject: subject.clone(),
        })
    }
}

/// Middleware: rejects requests without a valid `Authorization` header.
///
/// Accepts `Bearer <token>` as well as a bare token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(bearer_token)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)?
        .to_string();

    let identity = state.auth.verify(&token).await.ok_or_else(|| {
        tracing::warn!("Rejected request with unknown bearer token");
        AppError::Unauthorized
    })?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

fn bearer_token(header: &str) -> &str {
    let header = header.trim();
    match header.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        None if header.eq_ignore_ascii_case("bearer") => "",
        _ => header,
    }
}
