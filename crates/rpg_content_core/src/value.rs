//! Typing of raw command-line values before they are written into a document.

use serde_json::{Map, Number, Value};

use crate::core_api::ContentError;

/// `true`/`false`/`null` (any case), integers, decimals and JSON literals
/// starting with `{`, `[` or `"` are typed; anything else stays a string,
/// untrimmed.
pub fn parse_cli_value(raw: &str) -> Result<Value, ContentError> {
    let value = raw.trim();

    if value.eq_ignore_ascii_case("true") {
        return Ok(Value::Bool(true));
    }
    if value.eq_ignore_ascii_case("false") {
        return Ok(Value::Bool(false));
    }
    if value.eq_ignore_ascii_case("null") {
        return Ok(Value::Null);
    }

    if is_integer_literal(value) {
        if let Ok(n) = value.parse::<i64>() {
            return Ok(Value::from(n));
        }
        if let Ok(n) = value.parse::<u64>() {
            return Ok(Value::from(n));
        }
    }
    if is_decimal_literal(value) {
        if let Some(n) = value.parse::<f64>().ok().and_then(Number::from_f64) {
            return Ok(Value::Number(n));
        }
    }

    if value.starts_with(['{', '[', '"']) {
        return serde_json::from_str(value)
            .map_err(|e| ContentError::invalid_value(value, format!("Invalid JSON: {e}")));
    }

    Ok(Value::String(raw.to_string()))
}

fn digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_integer_literal(s: &str) -> bool {
    digits(s.strip_prefix('-').unwrap_or(s))
}

fn is_decimal_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    unsigned
        .split_once('.')
        .is_some_and(|(whole, frac)| digits(whole) && digits(frac))
}

/// Parses repeated `key=value` arguments; the value goes through
/// [`parse_cli_value`]. Later keys overwrite earlier ones.
pub fn parse_param_pairs<S: AsRef<str>>(raw_params: &[S]) -> Result<Map<String, Value>, ContentError> {
    let mut params = Map::new();
    for raw in raw_params {
        let raw = raw.as_ref();
        let Some((key, raw_value)) = raw.split_once('=') else {
            return Err(ContentError::invalid_param(raw, "Expected key=value"));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ContentError::invalid_param(raw, "Key cannot be empty"));
        }
        params.insert(key.to_string(), parse_cli_value(raw_value)?);
    }
    Ok(params)
}
