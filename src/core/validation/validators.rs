//! Reusable field validators
//!
//! Each validator checks one property of a JSON field value and reports a
//! human-readable message on failure. Validators that do not apply to the
//! value's type let it pass; the type validators (`string`, `number`, ...)
//! are what pin the type down.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Validator: value must be a string.
pub fn string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_string() {
            Ok(())
        } else {
            Err(format!("'{}' must be a string", field))
        }
    }
}

/// Validator: value must be a number.
pub fn number() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_number() {
            Ok(())
        } else {
            Err(format!("'{}' must be a number", field))
        }
    }
}

/// Validator: value must be a boolean.
pub fn boolean() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_boolean() {
            Ok(())
        } else {
            Err(format!("'{}' must be a boolean", field))
        }
    }
}

/// Validator: value must be an object.
pub fn object() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_object() {
            Ok(())
        } else {
            Err(format!("'{}' must be an object", field))
        }
    }
}

/// Validator: value must be an array of strings.
pub fn string_array() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_array() {
        Some(items) if items.iter().all(Value::is_string) => Ok(()),
        _ => Err(format!("'{}' must be an array of strings", field)),
    }
}

/// Validator: string length must be within range.
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            let len = s.len();
            if len < min {
                Err(format!(
                    "'{}' must be at least {} characters (got {})",
                    field, min, len
                ))
            } else if len > max {
                Err(format!(
                    "'{}' must not exceed {} characters (got {})",
                    field, max, len
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: number must not fall below a minimum.
pub fn min_value(min: f64) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(num) = value.as_f64() {
            if num < min {
                Err(format!(
                    "'{}' must be at least {} (got {})",
                    field, min, num
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: value must be in allowed list.
pub fn in_list(
    allowed: &'static [&'static str],
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !allowed.contains(&s) {
                Err(format!(
                    "'{}' must be one of {:?} (got '{}')",
                    field, allowed, s
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: string must look like an email address.
pub fn email() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
            let regex = EMAIL_REGEX.get_or_init(|| {
                Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
            });
            if regex.is_match(s) {
                Ok(())
            } else {
                Err(format!("'{}' must be a valid email address", field))
            }
        } else {
            Ok(())
        }
    }
}
