//! Input validation and security helpers
//!
//! - Budget / deadline / rating parsing for the order and review flows
//! - Input sanitization (trim, length cap, control characters)
//! - Spam heuristic for free text
//! - Constant-time token comparison for the webhook path

use thiserror::Error;

use crate::core::config;

/// Validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Budget must be a positive decimal
    #[error("Invalid budget: {0}")]
    InvalidBudget(String),

    /// Deadline must be a positive whole number of days
    #[error("Invalid deadline: {0}")]
    InvalidDeadline(String),

    /// Rating must be within 1..=5
    #[error("Invalid rating: {0}")]
    InvalidRating(String),
}

/// Markers that look like advertising or mass-mention spam.
const SPAM_INDICATORS: &[&str] = &[
    "http://",
    "https://",
    "www.",
    "@everyone",
    "@here",
    "FREE",
    "WIN",
    "WINNER",
    "🎉🎉🎉",
    "💰💰💰",
];

/// Parses a budget such as `1500`, `99.5` or `99,5`.
///
/// # Examples
/// ```
/// use freelancetm::core::validation::validate_budget;
///
/// assert_eq!(validate_budget("99,5"), Ok(99.5));
/// assert!(validate_budget("0").is_err());
/// assert!(validate_budget("abc").is_err());
/// ```
pub fn validate_budget(text: &str) -> Result<f64, ValidationError> {
    let normalized = text.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(budget) if budget.is_finite() && budget > 0.0 => Ok(budget),
        _ => Err(ValidationError::InvalidBudget(text.to_string())),
    }
}

/// Parses a deadline in whole days.
pub fn validate_deadline(text: &str) -> Result<u32, ValidationError> {
    match text.trim().parse::<u32>() {
        Ok(days) if days > 0 => Ok(days),
        _ => Err(ValidationError::InvalidDeadline(text.to_string())),
    }
}

pub fn validate_rating(value: &str) -> Result<u8, ValidationError> {
    match value.trim().parse::<u8>() {
        Ok(rating) if (1..=5).contains(&rating) => Ok(rating),
        _ => Err(ValidationError::InvalidRating(value.to_string())),
    }
}

/// Trims, caps at `max_length` characters and drops control characters
/// other than newline, carriage return and tab.
pub fn sanitize_input(text: &str, max_length: usize) -> String {
    text.trim()
        .chars()
        .take(max_length)
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

/// Two or more spam markers, or an overly long message.
pub fn is_spam_message(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    if text.chars().count() > config::text::SPAM_LENGTH {
        return true;
    }
    SPAM_INDICATORS.iter().filter(|marker| text.contains(*marker)).count() >= 2
}

/// Compares two secrets without short-circuiting on the first differing byte.
pub fn tokens_match(expected: &str, provided: &str) -> bool {
    let a = expected.as_bytes();
    let b = provided.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
