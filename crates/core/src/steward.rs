//! Steward account rules: departments, account statuses, profile field
//! validation, and employee ID generation.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Account status constants
// ---------------------------------------------------------------------------

/// Only Active stewards may authenticate or receive assignments.
pub const STATUS_ACTIVE: &str = "Active";
pub const STATUS_INACTIVE: &str = "Inactive";
pub const STATUS_SUSPENDED: &str = "Suspended";

/// All valid steward account statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_ACTIVE, STATUS_INACTIVE, STATUS_SUSPENDED];

// ---------------------------------------------------------------------------
// Departments
// ---------------------------------------------------------------------------

/// The fixed set of field-operations departments.
pub const VALID_DEPARTMENTS: &[&str] = &[
    "Water Quality",
    "Distribution",
    "Customer Service",
    "Maintenance",
    "Field Operations",
];

/// Default department when none is supplied.
pub const DEFAULT_DEPARTMENT: &str = "Field Operations";

// ---------------------------------------------------------------------------
// Field ceilings
// ---------------------------------------------------------------------------

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MAX_EMPLOYEE_ID_LEN: usize = 20;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_ADDRESS_LEN: usize = 200;
pub const MAX_POSITION_LEN: usize = 100;

/// Minimum steward password length (applies to chosen passwords; generated
/// temporary passwords are longer).
pub const MIN_PASSWORD_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Format validation
// ---------------------------------------------------------------------------

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone regex is valid"));

/// Validate that a status string is one of the known account statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid steward status '{}'. Must be one of: {:?}",
            status, VALID_STATUSES
        )))
    }
}

/// Validate that a department is a member of the fixed five-value set.
pub fn validate_department(department: &str) -> Result<(), CoreError> {
    if VALID_DEPARTMENTS.contains(&department) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid department '{}'. Must be one of: {:?}",
            department, VALID_DEPARTMENTS
        )))
    }
}

/// Validate a phone number: optional `+`, first digit 1-9, up to 16 digits.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if phone.len() > MAX_PHONE_LEN {
        return Err(CoreError::Validation(format!(
            "phone cannot exceed {MAX_PHONE_LEN} characters"
        )));
    }
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Invalid phone number format. Must start with 1-9 and contain only digits \
             (optionally with + prefix)"
                .into(),
        ))
    }
}

/// Validate an email address shape (not deliverability).
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.len() > MAX_EMAIL_LEN {
        return Err(CoreError::Validation(format!(
            "email cannot exceed {MAX_EMAIL_LEN} characters"
        )));
    }
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation("Invalid email format".into()))
    }
}

/// Validate a bounded required text field, naming the field in the error.
pub fn validate_text_field(name: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{name} is required")));
    }
    if value.len() > max_len {
        return Err(CoreError::Validation(format!(
            "{name} cannot exceed {max_len} characters"
        )));
    }
    Ok(())
}

/// Validate a complete steward profile draft. Field errors name the field.
pub fn validate_profile(
    name: &str,
    email: &str,
    phone: &str,
    address: &str,
    department: &str,
    position: &str,
) -> Result<(), CoreError> {
    validate_text_field("name", name, MAX_NAME_LEN)?;
    validate_text_field("email", email, MAX_EMAIL_LEN)?;
    validate_email(email)?;
    validate_text_field("phone", phone, MAX_PHONE_LEN)?;
    validate_phone(phone)?;
    validate_text_field("address", address, MAX_ADDRESS_LEN)?;
    validate_department(department)?;
    validate_text_field("position", position, MAX_POSITION_LEN)
}

// ---------------------------------------------------------------------------
// Employee IDs
// ---------------------------------------------------------------------------

/// Maximum insert attempts with count-derived employee IDs before falling
/// back to a timestamp-derived ID.
pub const EMPLOYEE_ID_MAX_ATTEMPTS: u32 = 5;

/// Count-derived candidate employee ID: `STW0001`, `STW0002`, ...
///
/// `attempt` offsets the candidate so each retry after a unique-constraint
/// conflict produces a different ID.
pub fn employee_id_candidate(current_count: i64, attempt: u32) -> String {
    format!("STW{:04}", current_count + 1 + i64::from(attempt))
}

/// Timestamp-derived fallback employee ID used after all count-derived
/// candidates collide.
pub fn employee_id_fallback() -> String {
    let millis = chrono::Utc::now().timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(4)..];
    format!("STW{tail}")
}

/// Display label for a steward on a note trail: name, falling back to the
/// employee ID when the name is blank.
pub fn display_label(name: &str, employee_id: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        employee_id.to_string()
    } else {
        trimmed.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn departments_include_default() {
        assert!(VALID_DEPARTMENTS.contains(&DEFAULT_DEPARTMENT));
        assert!(validate_department("Water Quality").is_ok());
        assert!(validate_department("Sanitation").is_err());
    }

    #[test]
    fn phone_formats() {
        assert!(validate_phone("+2348131944801").is_ok());
        assert!(validate_phone("8131944801").is_ok());
        assert!(validate_phone("0801234567").is_err(), "leading zero");
        assert!(validate_phone("+1 555 0100").is_err(), "spaces");
        assert!(validate_phone("phone").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn malformed_phone_names_the_field_constraint() {
        let err = validate_profile(
            "Ada",
            "ada@example.com",
            "not-a-phone",
            "5 Main St",
            "Field Operations",
            "Inspector",
        )
        .unwrap_err();
        assert!(err.to_string().contains("phone number"));
    }

    #[test]
    fn email_formats() {
        assert!(validate_email("steward@example.com").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());
        assert!(validate_email("missing-at.example.com").is_err());
        assert!(validate_email("spaces in@example.com").is_err());
    }

    #[test]
    fn length_ceilings_are_enforced() {
        let long_name = "a".repeat(MAX_NAME_LEN + 1);
        let err = validate_text_field("name", &long_name, MAX_NAME_LEN).unwrap_err();
        assert!(err.to_string().contains("name cannot exceed 100"));

        let long_address = "a".repeat(MAX_ADDRESS_LEN + 1);
        assert!(validate_text_field("address", &long_address, MAX_ADDRESS_LEN).is_err());
    }

    #[test]
    fn employee_id_candidates_are_sequential_and_padded() {
        assert_eq!(employee_id_candidate(0, 0), "STW0001");
        assert_eq!(employee_id_candidate(41, 0), "STW0042");
        assert_eq!(employee_id_candidate(41, 3), "STW0045");
        assert_eq!(employee_id_candidate(9998, 0), "STW9999");
    }

    #[test]
    fn employee_id_fallback_shape() {
        let id = employee_id_fallback();
        assert!(id.starts_with("STW"));
        assert_eq!(id.len(), 7);
        assert!(id[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn display_label_falls_back_to_employee_id() {
        assert_eq!(display_label("Ada Obi", "STW0001"), "Ada Obi");
        assert_eq!(display_label("   ", "STW0001"), "STW0001");
    }
}
