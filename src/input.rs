//! Reading normalized records and candidate pairs from JSON files.

use serde_json::Value;
use std::path::Path;
use tokio::fs;

use crate::error::AppError;
use crate::matcher::{CandidatePair, PlayerRecord};

/// Parses a single record. The document must be a JSON object.
pub fn parse_record(content: &str, origin: &str) -> Result<PlayerRecord, AppError> {
    let value: Value = serde_json::from_str(content)?;
    if !value.is_object() {
        return Err(AppError::invalid_input(
            origin,
            format!("expected a JSON object, found {}", json_kind(&value)),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

/// Parses a JSON array of `{ "id"?, "left", "right" }` objects.
///
/// Record fields are lenient, but every entry must carry both sides.
pub fn parse_pairs(content: &str, origin: &str) -> Result<Vec<CandidatePair>, AppError> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(entries) = value else {
        return Err(AppError::invalid_input(
            origin,
            format!("expected a JSON array of pairs, found {}", json_kind(&value)),
        ));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            for side in ["left", "right"] {
                if !entry.get(side).is_some_and(Value::is_object) {
                    return Err(AppError::invalid_input(
                        origin,
                        format!("pair #{index} is missing an object for '{side}'"),
                    ));
                }
            }
            serde_json::from_value(entry).map_err(|e| {
                AppError::invalid_input(origin, format!("pair #{index}: {e}"))
            })
        })
        .collect()
}

pub async fn read_record(path: impl AsRef<Path>) -> Result<PlayerRecord, AppError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).await?;
    parse_record(&content, &path.display().to_string())
}

pub async fn read_pairs(path: impl AsRef<Path>) -> Result<Vec<CandidatePair>, AppError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).await?;
    let pairs = parse_pairs(&content, &path.display().to_string())?;
    tracing::info!("Read {} candidate pairs from {}", pairs.len(), path.display());
    Ok(pairs)
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
