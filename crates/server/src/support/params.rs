#![forbid(unsafe_code)]

use serde_json::Value;

/// Invalid-params failure; rendered as a `-32602` JSON-RPC error.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParamError(pub(crate) String);

impl ParamError {
    fn missing(key: &str) -> Self {
        Self(format!("missing required param: {key}"))
    }

    fn wrong_type(key: &str, expected: &str) -> Self {
        Self(format!("param {key} must be {expected}"))
    }
}

fn lookup<'a>(params: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    params
        .and_then(|v| v.get(key))
        .filter(|v| !v.is_null())
}

pub(crate) fn require_str<'a>(params: Option<&'a Value>, key: &str) -> Result<&'a str, ParamError> {
    match lookup(params, key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ParamError::wrong_type(key, "a string")),
        None => Err(ParamError::missing(key)),
    }
}

pub(crate) fn optional_str<'a>(
    params: Option<&'a Value>,
    key: &str,
) -> Result<Option<&'a str>, ParamError> {
    match lookup(params, key) {
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ParamError::wrong_type(key, "a string")),
        None => Ok(None),
    }
}

pub(crate) fn require_i64(params: Option<&Value>, key: &str) -> Result<i64, ParamError> {
    match lookup(params, key) {
        Some(v) => v
            .as_i64()
            .ok_or_else(|| ParamError::wrong_type(key, "an integer")),
        None => Err(ParamError::missing(key)),
    }
}

pub(crate) fn optional_bool(params: Option<&Value>, key: &str) -> Result<Option<bool>, ParamError> {
    match lookup(params, key) {
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ParamError::wrong_type(key, "a boolean")),
        None => Ok(None),
    }
}
