//! Request validation from per-field rules.

use crate::error::AppError;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

/// JSON type a field must have when present and not null.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Object,
}

impl FieldKind {
    fn matches(self, v: &Value) -> bool {
        match self {
            FieldKind::String => v.is_string(),
            FieldKind::Integer => v.as_i64().is_some_and(|n| i32::try_from(n).is_ok()),
            FieldKind::Object => v.is_object(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::Integer => "a 32-bit integer",
            FieldKind::Object => "an object",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ValidationRule {
    pub required: bool,
    pub kind: Option<FieldKind>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<&'static str>,
    /// Human description of `pattern`, used in the error message.
    pub pattern_hint: Option<&'static str>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
}

impl ValidationRule {
    pub const NONE: ValidationRule = ValidationRule {
        required: false,
        kind: None,
        min_length: None,
        max_length: None,
        pattern: None,
        pattern_hint: None,
        minimum: None,
        maximum: None,
    };
}

/// A rule bound to a top-level body field.
#[derive(Clone, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: ValidationRule,
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against per-field rules. All required fields must be present and non-null.
    pub fn validate(body: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), AppError> {
        for FieldRule { field, rule } in rules {
            let val = body.get(*field);
            if rule.required && (val.is_none() || val == Some(&Value::Null)) {
                return Err(AppError::validation(*field, format!("{} is required", field)));
            }
            if let Some(v) = val {
                validate_field(field, v, rule)?;
            }
        }
        Ok(())
    }

    /// Require a JSON object body and validate it.
    pub fn validate_object(body: Value, rules: &[FieldRule]) -> Result<Map<String, Value>, AppError> {
        match body {
            Value::Object(map) => {
                Self::validate(&map, rules)?;
                Ok(map)
            }
            _ => Err(AppError::BadRequest("body must be a JSON object".into())),
        }
    }
}

fn validate_field(col: &str, v: &Value, rule: &ValidationRule) -> Result<(), AppError> {
    if v.is_null() {
        return Ok(());
    }
    if let Some(kind) = rule.kind {
        if !kind.matches(v) {
            return Err(AppError::validation(col, format!("{} must be {}", col, kind.describe())));
        }
    }
    if let Some(s) = v.as_str() {
        let len = s.chars().count();
        if let Some(max) = rule.max_length {
            if len > max {
                return Err(AppError::validation(
                    col,
                    format!("{} must be at most {} characters", col, max),
                ));
            }
        }
        if let Some(min) = rule.min_length {
            if len < min {
                return Err(AppError::validation(
                    col,
                    format!("{} must be at least {} characters", col, min),
                ));
            }
        }
        if let Some(pattern) = rule.pattern {
            let re = compiled(pattern)
                .map_err(|_| AppError::validation(col, format!("invalid pattern for {}", col)))?;
            if !re.is_match(s) {
                let hint = rule.pattern_hint.unwrap_or("match the required pattern");
                return Err(AppError::validation(col, format!("{} must {}", col, hint)));
            }
        }
    }
    if let Some(n) = v.as_i64() {
        if let Some(min) = rule.minimum {
            if n < min {
                return Err(AppError::validation(col, format!("{} must be at least {}", col, min)));
            }
        }
        if let Some(max) = rule.maximum {
            if n > max {
                return Err(AppError::validation(col, format!("{} must be at most {}", col, max)));
            }
        }
    }
    Ok(())
}

/// Compiled rule patterns, keyed by their source.
static PATTERNS: OnceLock<Mutex<HashMap<&'static str, Regex>>> = OnceLock::new();

fn compiled(pattern: &'static str) -> Result<Regex, regex::Error> {
    let mut cache = PATTERNS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(re) = cache.get(pattern) {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    cache.insert(pattern, re.clone());
    Ok(re)
}
