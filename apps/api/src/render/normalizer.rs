//! Document Model Normalizer: tolerant conversion of a request body into a `ResumeRecord`.
//!
//! Rules:
//! - The top-level value must be a JSON object; anything else is a `ValidationError`.
//! - Scalars: strings verbatim, numbers/bools as their JSON text, everything else `""`.
//! - Sequences: arrays map element-wise, anything else is empty. Non-object elements
//!   become all-empty entries so output positions match input positions.
//! - `skills` may also be one comma-separated string.
//! - Date keys accept `startDate` / `start_date` and `endDate` / `end_date`.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::resume::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeRecord};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// Normalizes an arbitrary JSON value into a fully-populated `ResumeRecord`.
pub fn normalize(input: &Value) -> Result<ResumeRecord, ValidationError> {
    let obj = input.as_object().ok_or_else(|| {
        ValidationError(format!(
            "resume body must be a JSON object, got {}",
            json_kind(input)
        ))
    })?;

    Ok(ResumeRecord {
        name: scalar(obj.get("name")),
        email: scalar(obj.get("email")),
        phone: scalar(obj.get("phone")),
        address: scalar(obj.get("address")),
        education: entries(obj.get("education"), |e| EducationEntry {
            institution: scalar(e.get("institution")),
            degree: scalar(e.get("degree")),
            start_date: scalar(either(e, "startDate", "start_date")),
            end_date: scalar(either(e, "endDate", "end_date")),
        }),
        experience: entries(obj.get("experience"), |e| ExperienceEntry {
            company: scalar(e.get("company")),
            role: scalar(e.get("role")),
            start_date: scalar(either(e, "startDate", "start_date")),
            end_date: scalar(either(e, "endDate", "end_date")),
            description: scalar(e.get("description")),
        }),
        skills: skills(obj.get("skills")),
        projects: entries(obj.get("projects"), |e| ProjectEntry {
            title: scalar(e.get("title")),
            description: scalar(e.get("description")),
            link: scalar(e.get("link")),
        }),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn scalar(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// First of two keys holding a non-null value.
fn either<'a>(obj: &'a Map<String, Value>, primary: &str, alias: &str) -> Option<&'a Value> {
    obj.get(primary)
        .filter(|v| !v.is_null())
        .or_else(|| obj.get(alias))
}

fn entries<T: Default>(value: Option<&Value>, build: impl Fn(&Map<String, Value>) -> T) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_object().map(&build).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    }
}

fn skills(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(|s| scalar(Some(s))).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
