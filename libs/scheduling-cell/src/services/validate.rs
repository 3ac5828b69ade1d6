//! Boundary validation for request fields.
//!
//! Reference identifiers are validated strictly: malformed ids are rejected
//! rather than repaired, so upstream data-quality problems surface here
//! instead of propagating.

use std::sync::OnceLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;

use crate::models::SchedulingError;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const PURPOSE_MIN: usize = 2;
const PURPOSE_MAX: usize = 255;
const DESCRIPTION_MAX: usize = 500;

fn reference_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]{3}-\d{4}-\d{4}$").unwrap())
}

/// Check a `PREFIX-YYYY-NNNN` reference id such as `DOC-2025-1234`.
pub fn reference_id(field: &str, prefix: &str, value: &str) -> Result<(), SchedulingError> {
    let prefixed = value.starts_with(prefix) && value.as_bytes().get(prefix.len()) == Some(&b'-');
    if !prefixed || !reference_id_pattern().is_match(value) {
        return Err(SchedulingError::Validation(format!(
            "{} must be in format {}-YYYY-NNNN (e.g., {}-2025-1234)",
            field, prefix, prefix
        )));
    }
    Ok(())
}

/// Trim a display name and enforce the 2-100 character bound.
pub fn display_name(field: &str, value: &str) -> Result<String, SchedulingError> {
    let trimmed = value.trim();
    if trimmed.chars().count() < NAME_MIN || trimmed.chars().count() > NAME_MAX {
        return Err(SchedulingError::Validation(format!(
            "{} must be between {} and {} characters",
            field, NAME_MIN, NAME_MAX
        )));
    }
    Ok(trimmed.to_string())
}

pub fn purpose_of_visit(value: &str) -> Result<(), SchedulingError> {
    let len = value.chars().count();
    if len < PURPOSE_MIN || len > PURPOSE_MAX {
        return Err(SchedulingError::Validation(format!(
            "purpose_of_visit must be between {} and {} characters",
            PURPOSE_MIN, PURPOSE_MAX
        )));
    }
    Ok(())
}

pub fn description(value: Option<&str>) -> Result<(), SchedulingError> {
    if let Some(text) = value {
        if text.chars().count() > DESCRIPTION_MAX {
            return Err(SchedulingError::Validation(format!(
                "description cannot exceed {} characters",
                DESCRIPTION_MAX
            )));
        }
    }
    Ok(())
}

pub fn not_in_past(date: NaiveDate) -> Result<(), SchedulingError> {
    if date < Utc::now().date_naive() {
        return Err(SchedulingError::Validation(
            "Appointment date cannot be in the past".to_string(),
        ));
    }
    Ok(())
}
