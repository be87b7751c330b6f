// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Validation of raw OCR sidecar output
//!
//! Accepted layouts, optionally wrapped as `{"tokens": [...]}`:
//! - objects: `{"text": "..", "confidence": 0.9, "bbox": ...}`
//! - EasyOCR triples: `[bbox, "text", 0.9]`
//!
//! Anything else is a parse error; it is never read as "no tokens".

use serde_json::Value;

use super::engine::{BoundingRegion, OcrError, OcrToken};

/// Parse a sidecar response body into tokens
pub fn parse_tokens(value: &Value) -> Result<Vec<OcrToken>, OcrError> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(map) => {
            if let Some(message) = map.get("error").and_then(Value::as_str) {
                return Err(OcrError::Collaborator(message.to_string()));
            }
            match map.get("tokens") {
                Some(Value::Array(entries)) => entries,
                Some(_) => return Err(OcrError::Parse("'tokens' is not a list".to_string())),
                None => return Err(OcrError::Parse("missing 'tokens' list".to_string())),
            }
        }
        other => {
            return Err(OcrError::Parse(format!(
                "expected a token list, got {}",
                type_name(other)
            )))
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(entry).map_err(|e| at_index(index, e)))
        .collect()
}

fn parse_entry(entry: &Value) -> Result<OcrToken, OcrError> {
    match entry {
        Value::Object(map) => {
            let text = map
                .get("text")
                .and_then(Value::as_str)
                .ok_or_else(|| OcrError::Parse("missing string 'text'".to_string()))?;
            let confidence = map
                .get("confidence")
                .ok_or_else(|| OcrError::Parse("missing 'confidence'".to_string()))?;
            let region = map
                .get("bbox")
                .or_else(|| map.get("bounding_region"))
                .cloned()
                .unwrap_or(Value::Null);

            Ok(OcrToken {
                text: text.to_string(),
                bounding_region: BoundingRegion(region),
                confidence: parse_confidence(confidence)?,
            })
        }
        Value::Array(parts) if parts.len() == 3 => {
            let text = parts[1]
                .as_str()
                .ok_or_else(|| OcrError::Parse("second element must be the text".to_string()))?;

            Ok(OcrToken {
                text: text.to_string(),
                bounding_region: BoundingRegion(parts[0].clone()),
                confidence: parse_confidence(&parts[2])?,
            })
        }
        Value::Array(parts) => Err(OcrError::Parse(format!(
            "expected [bbox, text, confidence], got {} elements",
            parts.len()
        ))),
        other => Err(OcrError::Parse(format!(
            "expected a token, got {}",
            type_name(other)
        ))),
    }
}

fn parse_confidence(value: &Value) -> Result<f64, OcrError> {
    let confidence = value
        .as_f64()
        .ok_or_else(|| OcrError::Parse(format!("confidence {} is not a number", value)))?;

    if !(0.0..=1.0).contains(&confidence) {
        return Err(OcrError::Parse(format!(
            "confidence {} is outside [0, 1]",
            confidence
        )));
    }

    Ok(confidence)
}

fn at_index(index: usize, error: OcrError) -> OcrError {
    match error {
        OcrError::Parse(message) => OcrError::Parse(format!("token {}: {}", index, message)),
        other => other,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
