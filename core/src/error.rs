//! Validation errors for todo input.
//!
//! # Design
//! The `Display` text of every `ValidationError` variant is the exact message
//! sent back to HTTP clients, so the server forwards it without rewording.
//! `ValidationErrors` carries several violations at once for the update
//! pipeline, which reports everything wrong with a body instead of stopping at
//! the first problem.

/// A single rejected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid Todo Status")]
    InvalidStatus,

    #[error("Invalid Todo Priority")]
    InvalidPriority,

    #[error("Invalid Todo Category")]
    InvalidCategory,

    #[error("Invalid Due Date")]
    InvalidDueDate,

    /// An update body named none of the mutable fields.
    #[error("No Todo Fields Supplied")]
    NoFields,
}

/// One or more violations, kept in validation order. Never empty.
///
/// Displays one message per line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_lines(&self.0))]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Returns `None` when `errors` is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    #[cfg(test)]
    pub(crate) fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
