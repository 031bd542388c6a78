//! Error types shared across the crate.
//!
//! Domain errors are plain enums the UI can match on. Anything that touches the
//! terminal or the filesystem goes through `anyhow` instead.

use crate::model::{Field, UserId};

/// Result alias for application-level (terminal, config, logging) operations.
pub type Result<T> = anyhow::Result<T>;

/// Message shown when a candidate collides with an existing record.
pub const DUPLICATE_MESSAGE: &str = "This name or email already exists.";

/// Rejection of a candidate record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required fields were blank. Listed in form order.
    #[error("{}", required_summary(.fields))]
    RequiredFieldMissing { fields: Vec<Field> },
    /// Name or email already used by another record.
    #[error("This name or email already exists.")]
    Duplicate,
}

impl ValidationError {
    /// Whether `field` is one of the missing fields.
    pub fn is_missing(&self, field: Field) -> bool {
        match self {
            Self::RequiredFieldMissing { fields } => fields.contains(&field),
            Self::Duplicate => false,
        }
    }
}

fn required_summary(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.required_message())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Misuse of the single inline edit session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("user {0} is already being edited")]
    AlreadyEditing(UserId),
    #[error("no user with id {0}")]
    UnknownUser(UserId),
    #[error("no edit in progress")]
    NotEditing,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
