//! Field validation for creation payloads.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field-level validation failure, produced before any persistence attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: String,
    /// Human-readable reason, suitable for display next to the field.
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &str, reason: &str) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Validation capability shared by all creation payloads.
pub trait Validate {
    /// Check required fields and formats.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Require a non-empty text field.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "required field is empty"));
    }
    Ok(())
}

/// Require an ISO `YYYY-MM-DD` date.
pub(crate) fn require_date(field: &str, value: &str) -> Result<(), ValidationError> {
    require_text(field, value)?;
    parse_date(field, value)
}

/// Validate an optional date when present. Empty strings count as absent.
pub(crate) fn optional_date(field: &str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_date(field, v),
        _ => Ok(()),
    }
}

/// Require a time of day, `HH:MM` or `HH:MM:SS`.
pub(crate) fn require_time(field: &str, value: &str) -> Result<(), ValidationError> {
    require_text(field, value)?;
    let valid = NaiveTime::parse_from_str(value, "%H:%M").is_ok()
        || NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok();
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new(field, "expected time as HH:MM"))
    }
}

fn parse_date(field: &str, value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new(field, "expected date as YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_blank() {
        assert!(require_text("nombre", "Ana").is_ok());

        let err = require_text("nombre", "   ").unwrap_err();
        assert_eq!(err.field, "nombre");
    }

    #[test]
    fn test_require_date_formats() {
        assert!(require_date("fecha", "1990-05-01").is_ok());
        assert!(require_date("fecha", "01/05/1990").is_err());
        assert!(require_date("fecha", "1990-13-01").is_err());
        assert!(require_date("fecha", "").is_err());
    }

    #[test]
    fn test_optional_date_skips_absent() {
        assert!(optional_date("fecha_fin", None).is_ok());
        assert!(optional_date("fecha_fin", Some("")).is_ok());
        assert!(optional_date("fecha_fin", Some("2024-01-31")).is_ok());
        assert!(optional_date("fecha_fin", Some("soon")).is_err());
    }

    #[test]
    fn test_require_time_formats() {
        assert!(require_time("hora", "09:30").is_ok());
        assert!(require_time("hora", "09:30:00").is_ok());
        assert!(require_time("hora", "25:00").is_err());
        assert!(require_time("hora", "9am").is_err());
    }
}
