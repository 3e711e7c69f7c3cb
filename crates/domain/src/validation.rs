// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum length of an entity name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of an entity description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Maximum length of a username, in characters.
pub const MAX_USERNAME_LEN: usize = 50;

/// Validates a required text field.
///
/// # Errors
///
/// Returns an error if the value is empty (after trimming) or longer
/// than `max` characters.
pub fn validate_text(field: &'static str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField { field });
    }

    let actual: usize = value.chars().count();
    if actual > max {
        return Err(DomainError::FieldTooLong { field, max, actual });
    }

    Ok(())
}

/// Validates an optional override field of an edit.
///
/// An absent field is always valid. A present field must satisfy the
/// same rules as on creation; an edit cannot clear a field.
///
/// # Errors
///
/// Returns an error if the field is present but empty or too long.
pub fn validate_override(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), DomainError> {
    value.map_or(Ok(()), |v| validate_text(field, v, max))
}
