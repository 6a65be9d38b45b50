use reqwest::Method;

use super::types::{PositiveU64, PositiveUsize};
use crate::error::ValidationError;

pub(crate) fn parse_header(s: &str) -> Result<(String, String), ValidationError> {
    match s.split_once(':') {
        Some((key, value)) => Ok((key.trim().to_owned(), value.trim().to_owned())),
        None => Err(ValidationError::InvalidHeaderFormat {
            value: s.to_owned(),
        }),
    }
}

pub(super) fn parse_positive_u64(s: &str) -> Result<PositiveU64, ValidationError> {
    s.parse::<PositiveU64>()
}

pub(super) fn parse_positive_usize(s: &str) -> Result<PositiveUsize, ValidationError> {
    s.parse::<PositiveUsize>()
}

pub(crate) fn parse_bool_env(s: &str) -> Result<bool, ValidationError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        }),
    }
}

/// Accepts any HTTP method token; standard methods are matched case-insensitively.
pub(crate) fn parse_method(s: &str) -> Result<Method, ValidationError> {
    let normalized = s.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return Err(ValidationError::InvalidMethod {
            value: s.to_owned(),
        });
    }
    Method::from_bytes(normalized.as_bytes()).map_err(|_err| ValidationError::InvalidMethod {
        value: s.to_owned(),
    })
}
