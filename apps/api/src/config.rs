use anyhow::{anyhow, bail, Context, Result};

use crate::layout::PageFormat;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer grants as `(token, subject)` pairs.
    pub auth_tokens: Vec<(String, String)>,
    pub page_format: PageFormat,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            auth_tokens: parse_auth_tokens(&require_env("AUTH_TOKENS")?)?,
            page_format: std::env::var("PAGE_FORMAT")
                .unwrap_or_else(|_| "letter".to_string())
                .parse::<PageFormat>()
                .map_err(|e| anyhow!(e))
                .context("PAGE_FORMAT must be letter or a4")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Parses `token:subject,token:subject`. Whitespace around entries is ignored.
pub(crate) fn parse_auth_tokens(raw: &str) -> Result<Vec<(String, String)>> {
    let mut grants = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let Some((token, subject)) = entry.split_once(':') else {
            bail!("AUTH_TOKENS entry '{entry}' must look like token:subject");
        };
        let (token, subject) = (token.trim(), subject.trim());
        if token.is_empty() || subject.is_empty() {
            bail!("AUTH_TOKENS entry '{entry}' has an empty token or subject");
        }
        grants.push((token.to_string(), subject.to_string()));
    }
    if grants.is_empty() {
        bail!("AUTH_TOKENS must contain at least one token:subject grant");
    }
    Ok(grants)
}
