// src/contract.rs
//! Analysis contract: the required shape of the model's JSON output.
//!
//! The model is prompted for an exact set of keys; `validate` enforces them
//! structurally before anything reaches the caller. Validation is pure and
//! reports the first failing field path with expected vs actual type, so a
//! contract violation is diagnosable straight from the error body.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Validated structured output describing a food label's health assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Brief overall rating, e.g. "Highly Processed".
    pub verdict: String,
    /// The logic behind the verdict.
    pub reasoning: String,
    /// Nutritional pros and cons, validated element-wise.
    pub tradeoffs: Vec<Tradeoff>,
    pub sugar_info: SugarInfo,
    pub suitability: Suitability,
    /// Optional; when present it must be a number in [0.0, 1.0].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    /// Missing data or blurred-OCR caveats.
    pub uncertainty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tradeoff {
    pub benefit: String,
    pub concern: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SugarInfo {
    /// Expected to be High, Medium or Low; not enforced as an enum.
    pub level: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suitability {
    pub best_for: Vec<String>,
    pub caution_for: Vec<String>,
}

/// First structural failure found while walking a candidate value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid `{path}`: expected {expected}, found {found}")]
pub struct ValidationError {
    /// Dotted field path, e.g. `tradeoffs[0].concern`.
    pub path: String,
    pub expected: &'static str,
    pub found: String,
}

impl ValidationError {
    fn new(path: impl Into<String>, expected: &'static str, value: Option<&Value>) -> Self {
        Self {
            path: path.into(),
            expected,
            found: value.map(json_type).unwrap_or("missing").to_string(),
        }
    }
}

/// Structurally verify a parsed model response against the contract.
///
/// On success the candidate comes back typed and otherwise unchanged;
/// validating the serialized result again yields the same value.
pub fn validate(candidate: &Value) -> Result<AnalysisResult, ValidationError> {
    let root = match candidate {
        Value::Object(m) => m,
        other => return Err(ValidationError::new("$", "object", Some(other))),
    };

    let verdict = string_field(root, "", "verdict")?;
    let reasoning = string_field(root, "", "reasoning")?;

    let entries = array_field(root, "", "tradeoffs")?;
    let mut tradeoffs = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let path = format!("tradeoffs[{i}]");
        let obj = object_value(entry, &path)?;
        tradeoffs.push(Tradeoff {
            benefit: string_field(obj, &path, "benefit")?,
            concern: string_field(obj, &path, "concern")?,
        });
    }

    let sugar = object_field(root, "", "sugar_info")?;
    let sugar_info = SugarInfo {
        level: string_field(sugar, "sugar_info", "level")?,
        explanation: string_field(sugar, "sugar_info", "explanation")?,
    };

    let suit = object_field(root, "", "suitability")?;
    let suitability = Suitability {
        best_for: string_array_field(suit, "suitability", "best_for")?,
        caution_for: string_array_field(suit, "suitability", "caution_for")?,
    };

    let confidence_score = match root.get("confidence_score") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => {
            let score = n.as_f64().unwrap_or(f64::NAN);
            if !(0.0..=1.0).contains(&score) {
                return Err(ValidationError {
                    path: "confidence_score".to_string(),
                    expected: "number in [0.0, 1.0]",
                    found: n.to_string(),
                });
            }
            Some(score)
        }
        Some(other) => {
            return Err(ValidationError::new("confidence_score", "number", Some(other)));
        }
    };

    let uncertainty = string_field(root, "", "uncertainty")?;

    Ok(AnalysisResult {
        verdict,
        reasoning,
        tradeoffs,
        sugar_info,
        suitability,
        confidence_score,
        uncertainty,
    })
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn string_field(obj: &Map<String, Value>, prefix: &str, key: &str) -> Result<String, ValidationError> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        other => Err(ValidationError::new(join(prefix, key), "string", other)),
    }
}

fn array_field<'a>(
    obj: &'a Map<String, Value>,
    prefix: &str,
    key: &str,
) -> Result<&'a Vec<Value>, ValidationError> {
    match obj.get(key) {
        Some(Value::Array(a)) => Ok(a),
        other => Err(ValidationError::new(join(prefix, key), "array", other)),
    }
}

fn object_field<'a>(
    obj: &'a Map<String, Value>,
    prefix: &str,
    key: &str,
) -> Result<&'a Map<String, Value>, ValidationError> {
    match obj.get(key) {
        Some(Value::Object(m)) => Ok(m),
        other => Err(ValidationError::new(join(prefix, key), "object", other)),
    }
}

fn object_value<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    match value {
        Value::Object(m) => Ok(m),
        other => Err(ValidationError::new(path, "object", Some(other))),
    }
}

fn string_array_field(
    obj: &Map<String, Value>,
    prefix: &str,
    key: &str,
) -> Result<Vec<String>, ValidationError> {
    let arr = array_field(obj, prefix, key)?;
    let path = join(prefix, key);
    let mut out = Vec::with_capacity(arr.len());
    for (i, v) in arr.iter().enumerate() {
        match v {
            Value::String(s) => out.push(s.clone()),
            other => return Err(ValidationError::new(format!("{path}[{i}]"), "string", Some(other))),
        }
    }
    Ok(out)
}
