//! Candidate validation: required fields and name/email uniqueness.

use crate::error::ValidationError;
use crate::model::{Field, FormValues, UserDraft, UserRecord};

/// Check that name, email and role are present and build a draft from them.
///
/// Text fields that are empty after trimming count as missing. Every missing
/// field is reported so the form can flag each one.
pub fn require_fields(values: &FormValues) -> Result<UserDraft, ValidationError> {
    let mut missing = Vec::new();
    if values.name.trim().is_empty() {
        missing.push(Field::Name);
    }
    if values.email.trim().is_empty() {
        missing.push(Field::Email);
    }
    let Some(role) = values.role else {
        missing.push(Field::Role);
        return Err(ValidationError::RequiredFieldMissing { fields: missing });
    };
    if !missing.is_empty() {
        return Err(ValidationError::RequiredFieldMissing { fields: missing });
    }
    Ok(UserDraft::new(values.name.clone(), values.email.clone(), role))
}

/// Reject a candidate whose name or email matches any existing record.
pub fn validate(candidate: &UserDraft, existing: &[UserRecord]) -> Result<(), ValidationError> {
    let clash = existing
        .iter()
        .any(|u| u.name == candidate.name || u.email == candidate.email);
    if clash { Err(ValidationError::Duplicate) } else { Ok(()) }
}

/// Like [`validate`], but ignores the record being edited itself.
pub fn validate_edit(record: &UserRecord, existing: &[UserRecord]) -> Result<(), ValidationError> {
    let clash = existing
        .iter()
        .filter(|u| u.id != record.id)
        .any(|u| u.name == record.name || u.email == record.email);
    if clash { Err(ValidationError::Duplicate) } else { Ok(()) }
}
