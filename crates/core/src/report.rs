//! Report lifecycle rules: statuses, categories, severities, draft
//! validation, and tracking number generation.
//!
//! The status machine is deliberately permissive for assignee updates: any
//! of the four known statuses may be set, including moving a resolved or
//! closed report back to pending (steward correction workflow). The only
//! hard transition rule is that assignment requires the report to currently
//! be `pending`, which the persistence layer enforces with a conditional
//! update.

use rand::Rng;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for every newly submitted report.
pub const STATUS_PENDING: &str = "pending";
/// An active steward has been assigned and is investigating.
pub const STATUS_IN_PROGRESS: &str = "in-progress";
/// The underlying issue has been fixed.
pub const STATUS_RESOLVED: &str = "resolved";
/// The report has been closed (resolved and verified, or won't-fix).
pub const STATUS_CLOSED: &str = "closed";

/// All valid report statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_IN_PROGRESS,
    STATUS_RESOLVED,
    STATUS_CLOSED,
];

// ---------------------------------------------------------------------------
// Classification constants
// ---------------------------------------------------------------------------

/// Default category when the submitter does not pick one.
pub const CATEGORY_WATER: &str = "water";

/// All valid issue categories.
pub const VALID_CATEGORIES: &[&str] = &["water", "roads", "lighting", "waste"];

/// All valid severities.
pub const VALID_SEVERITIES: &[&str] = &["low", "medium", "high"];

/// Default severity for steward-created reports that omit it.
pub const SEVERITY_MEDIUM: &str = "medium";

/// High severity, surfaced separately in dashboard aggregates.
pub const SEVERITY_HIGH: &str = "high";

// ---------------------------------------------------------------------------
// Tracking numbers
// ---------------------------------------------------------------------------

/// Prefix of every public tracking number.
pub const TRACKING_PREFIX: &str = "WL";

/// Length of the random suffix appended to the timestamp.
pub const TRACKING_SUFFIX_LEN: usize = 5;

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a citizen-facing tracking number: `WL` + unix millis + a
/// 5-character uppercase base36 suffix, e.g. `WL1724830000000K3F9Z`.
///
/// Uniqueness is ultimately guaranteed by the database's unique constraint;
/// callers retry with a fresh number on a collision.
pub fn generate_tracking_number() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::rng();
    let suffix: String = (0..TRACKING_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{TRACKING_PREFIX}{millis}{suffix}")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid report status '{}'. Must be one of: {:?}",
            status, VALID_STATUSES
        )))
    }
}

/// Validate that a category string is one of the known categories.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid category '{}'. Must be one of: {:?}",
            category, VALID_CATEGORIES
        )))
    }
}

/// Validate that a severity string is one of the known severities.
pub fn validate_severity(severity: &str) -> Result<(), CoreError> {
    if VALID_SEVERITIES.contains(&severity) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid severity '{}'. Must be one of: {:?}",
            severity, VALID_SEVERITIES
        )))
    }
}

/// Require a non-empty (after trimming) submission field, naming the field
/// in the error so the presentation layer can surface it.
pub fn require_field(name: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{name} is required")))
    } else {
        Ok(())
    }
}

/// Fields required for a citizen submission, validated in order.
pub fn validate_citizen_draft(
    issue_type: &str,
    location: &str,
    description: &str,
    severity: &str,
    reporter_name: &str,
    reporter_phone: &str,
    reporter_email: &str,
) -> Result<(), CoreError> {
    require_field("issueType", issue_type)?;
    require_field("location", location)?;
    require_field("description", description)?;
    require_field("severity", severity)?;
    require_field("reporterName", reporter_name)?;
    require_field("phoneNumber", reporter_phone)?;
    require_field("email", reporter_email)?;
    validate_severity(severity)
}

/// Fields required for a steward-created report (reporter identity derives
/// from the steward, so contact fields are not required).
pub fn validate_steward_draft(
    issue_type: &str,
    location: &str,
    description: &str,
) -> Result<(), CoreError> {
    require_field("issueType", issue_type)?;
    require_field("location", location)?;
    require_field("description", description)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CoreError;

    #[test]
    fn all_statuses_are_valid() {
        for s in VALID_STATUSES {
            assert!(validate_status(s).is_ok(), "status '{s}' should be valid");
        }
    }

    #[test]
    fn unknown_status_is_invalid() {
        assert_matches!(validate_status("escalated"), Err(CoreError::Validation(_)));
        assert_matches!(validate_status(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn regression_out_of_terminal_states_is_permitted() {
        // Membership is the only rule: a steward may move a resolved or
        // closed report back to pending.
        assert!(validate_status(STATUS_PENDING).is_ok());
        assert!(validate_status(STATUS_RESOLVED).is_ok());
        assert!(validate_status(STATUS_CLOSED).is_ok());
    }

    #[test]
    fn tracking_number_has_prefix_and_suffix() {
        let t = generate_tracking_number();
        assert!(t.starts_with(TRACKING_PREFIX));
        // WL + at least 13 digits of unix millis + 5 suffix chars.
        assert!(t.len() >= TRACKING_PREFIX.len() + 13 + TRACKING_SUFFIX_LEN);
        let suffix = &t[t.len() - TRACKING_SUFFIX_LEN..];
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        let middle = &t[TRACKING_PREFIX.len()..t.len() - TRACKING_SUFFIX_LEN];
        assert!(middle.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn tracking_numbers_differ() {
        // The random suffix makes same-millisecond collisions unlikely; the
        // database unique constraint catches the rest.
        let a = generate_tracking_number();
        let b = generate_tracking_number();
        assert_ne!(a, b);
    }

    #[test]
    fn citizen_draft_requires_all_fields() {
        let ok = validate_citizen_draft(
            "leak",
            "5 Main St",
            "burst pipe",
            "high",
            "Ada",
            "+2348131944801",
            "ada@example.com",
        );
        assert!(ok.is_ok());

        let err = validate_citizen_draft(
            "leak",
            "  ",
            "burst pipe",
            "high",
            "Ada",
            "+2348131944801",
            "ada@example.com",
        )
        .unwrap_err();
        assert!(err.to_string().contains("location is required"));
    }

    #[test]
    fn citizen_draft_rejects_unknown_severity() {
        let err = validate_citizen_draft(
            "leak",
            "5 Main St",
            "burst pipe",
            "catastrophic",
            "Ada",
            "+2348131944801",
            "ada@example.com",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid severity"));
    }

    #[test]
    fn steward_draft_skips_reporter_fields() {
        assert!(validate_steward_draft("leak", "5 Main St", "burst pipe").is_ok());
        assert!(validate_steward_draft("", "5 Main St", "burst pipe").is_err());
    }
}
