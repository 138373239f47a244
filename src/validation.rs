//! Strict-mode input validation.
//!
//! The engines themselves are permissive: they swap inverted windows,
//! clamp bad rates, and treat unresolvable ends as open. Hosts and tests
//! that prefer to fail loudly run these checks first. Detects:
//! - Duplicate item IDs
//! - Negative or non-finite processing durations
//! - Items with no resolvable effective end
//!
//! All problems are collected rather than stopping at the first.

use std::collections::HashSet;

use crate::models::WorkItem;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind:?}: {message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two items share the same ID.
    DuplicateId,
    /// A window's end precedes its start.
    InvertedWindow,
    /// A processing duration is negative or not a number.
    NegativeDuration,
    /// A playback rate is zero, negative, or not a number.
    InvalidRate,
    /// An item has no end, due date, or processing duration to resolve.
    UnresolvedEnd,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a loaded item set.
///
/// Checks:
/// 1. No duplicate item IDs
/// 2. Processing durations, when given, are finite and non-negative
/// 3. Every item resolves an effective end
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_items(items: &[WorkItem]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for item in items {
        if !ids.insert(item.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate item ID: {}", item.id()),
            ));
        }

        if let Some(days) = item.processing_days() {
            if !days.is_finite() || days < 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeDuration,
                    format!("Item '{}' has invalid processing duration {days}", item.id()),
                ));
            }
        }

        if item.is_open() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnresolvedEnd,
                format!("Item '{}' has no resolvable end", item.id()),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a playback rate (days per tick).
pub fn validate_rate(rate: f64) -> Result<(), ValidationError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationErrorKind::InvalidRate,
            format!("Rate must be positive, got {rate}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DAY_MS;

    fn sample_items() -> Vec<WorkItem> {
        vec![
            WorkItem::new("B1", "WP1", 0, 5 * DAY_MS),
            WorkItem::new("B2", "WP1", DAY_MS, 0).with_due(3 * DAY_MS),
            WorkItem::new("B3", "WP2", 0, 0).with_processing_days(4.0),
        ]
    }

    #[test]
    fn test_valid_items() {
        assert!(validate_items(&sample_items()).is_ok());
        assert!(validate_items(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_item_id() {
        let mut items = sample_items();
        items.push(WorkItem::new("B1", "WP3", 0, DAY_MS));

        let errors = validate_items(&items).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("B1")));
    }

    #[test]
    fn test_negative_processing_duration() {
        let items = vec![WorkItem::new("B1", "WP1", 0, 10).with_processing_days(-1.0)];

        let errors = validate_items(&items).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeDuration);
    }

    #[test]
    fn test_unresolved_end() {
        let items = vec![WorkItem::new("B1", "WP1", 10, 10)];

        let errors = validate_items(&items).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnresolvedEnd));
    }

    #[test]
    fn test_multiple_errors() {
        let items = vec![
            WorkItem::new("B1", "WP1", 0, 0).with_processing_days(f64::NAN),
            WorkItem::new("B1", "WP1", 0, 10),
        ];

        let errors = validate_items(&items).unwrap_err();
        // NaN duration, unresolved end, duplicate ID
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate(2.0).is_ok());
        assert_eq!(
            validate_rate(0.0).unwrap_err().kind,
            ValidationErrorKind::InvalidRate
        );
        assert!(validate_rate(-1.0).is_err());
        assert!(validate_rate(f64::NAN).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = validate_rate(-2.0).unwrap_err();
        assert_eq!(err.to_string(), "InvalidRate: Rate must be positive, got -2");
    }
}
