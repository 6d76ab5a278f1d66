//! Input validation helpers
//!
//! Centralized text length constants plus a bridge from `validator` derive
//! output to [`AppError`]. Request DTOs carry declarative rules; handlers
//! call [`validate_body`] before touching the database.

use validator::Validate;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu item, inventory item, customer, staff display name
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, feedback comments
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, time slot labels, units
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Run declarative validation on a request body.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(AppError::from)
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that every table number is inside the physical universe.
pub fn validate_table_numbers(tables: &[i32]) -> Result<(), AppError> {
    for n in tables {
        if !shared::TABLE_UNIVERSE.contains(n) {
            return Err(AppError::validation(format!(
                "Table {n} does not exist (tables are 1-8)"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Paneer", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_table_numbers() {
        assert!(validate_table_numbers(&[1, 8]).is_ok());
        assert!(validate_table_numbers(&[0]).is_err());
        assert!(validate_table_numbers(&[9]).is_err());
    }
}
