//! Input validation for event lists.
//!
//! Checks the structural integrity of events before partitioning.
//! Detects:
//! - Zero or negative length intervals (`start >= end`)
//! - Empty labels
//!
//! Repeated labels are allowed (a line-up may run the same show twice) and
//! only logged at `warn` level.
//!
//! Validation fails closed: callers reject the whole input when any
//! error is reported instead of dropping the offending events.

use crate::models::Event;
use std::collections::HashSet;
use tracing::warn;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Position of the offending event in the input.
    pub index: usize,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The event does not end after it starts.
    InvalidInterval,
    /// The event has an empty or whitespace-only label.
    EmptyLabel,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, index: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            message: message.into(),
        }
    }
}

/// Validates a list of events.
///
/// Checks:
/// 1. Every event satisfies `start < end`
/// 2. Every label is non-empty
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_events(events: &[Event]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut labels = HashSet::new();

    for (i, event) in events.iter().enumerate() {
        if !event.is_well_formed() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                i,
                format!(
                    "Event '{}' ends at {} but starts at {}",
                    event.label, event.end, event.start
                ),
            ));
        }

        if event.label.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyLabel,
                i,
                format!("Event #{} has an empty label", i + 1),
            ));
        } else if !labels.insert(event.label.as_str()) {
            warn!(index = i, label = %event.label, "repeated event label");
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
