use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::errors::ValidationError;

pub const MIN_RELEASE_YEAR: i32 = 1888;
pub const MIN_SCORE: f64 = 0.5;
pub const MAX_SCORE: f64 = 5.0;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

pub struct ValidationService;

impl ValidationService {
    /// Required free-text field, non-empty once trimmed
    pub fn validate_required_text(field: &str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::field(field, "must not be empty"));
        }
        if value.chars().any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t') {
            return Err(ValidationError::field(field, "must not contain control characters"));
        }
        Ok(())
    }

    pub fn validate_release_year(year: i32) -> Result<(), ValidationError> {
        let current_year = Utc::now().year();
        if !(MIN_RELEASE_YEAR..=current_year).contains(&year) {
            return Err(ValidationError::field(
                "releaseYear",
                format!(
                    "must be between {} and {}",
                    MIN_RELEASE_YEAR, current_year
                ),
            ));
        }
        Ok(())
    }

    pub fn validate_score(score: f64) -> Result<(), ValidationError> {
        if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(ValidationError::field(
                "score",
                format!("must be between {} and {}", MIN_SCORE, MAX_SCORE),
            ));
        }
        Ok(())
    }

    /// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, keeping only the date.
    pub fn parse_birth_date(value: &str) -> Result<NaiveDate, ValidationError> {
        let value = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(value)
            .map(|timestamp| timestamp.date_naive())
            .map_err(|_| {
                ValidationError::field("birthDate", "must be a valid ISO 8601 date string")
            })
    }
}
