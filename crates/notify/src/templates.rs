//! HTML bodies for outbound notifications.
//!
//! Each template returns `(subject, html_body)`. Keep these plain: inline
//! styles only, no external assets, so they render in any client.

/// Confirmation sent to the reporter right after submission.
pub fn submission_confirmation(reporter_name: &str, tracking_number: &str) -> (String, String) {
    let subject = format!("Report received - {tracking_number}");
    let body = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px;\">\
         <h2>Thank you, {reporter_name}</h2>\
         <p>Your water issue report has been received and is pending review.</p>\
         <p>Your tracking number is <strong>{tracking_number}</strong>. \
         Use it to check the status of your report at any time.</p>\
         </div>"
    );
    (subject, body)
}

/// Sent to the reporter when their report is assigned to a steward.
pub fn citizen_assignment(
    reporter_name: &str,
    tracking_number: &str,
    steward_name: &str,
) -> (String, String) {
    let subject = format!("Your report {tracking_number} is being worked on");
    let body = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px;\">\
         <h2>Hello, {reporter_name}</h2>\
         <p>Your report <strong>{tracking_number}</strong> has been assigned to \
         {steward_name} and is now in progress.</p>\
         <p>You will receive another update when its status changes.</p>\
         </div>"
    );
    (subject, body)
}

/// Sent to the steward who received the assignment.
pub fn steward_assignment(
    steward_name: &str,
    tracking_number: &str,
    issue_type: &str,
    location: &str,
    severity: &str,
) -> (String, String) {
    let subject = format!("New assignment: {tracking_number}");
    let body = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px;\">\
         <h2>Hello, {steward_name}</h2>\
         <p>A report has been assigned to you.</p>\
         <ul>\
         <li>Tracking number: <strong>{tracking_number}</strong></li>\
         <li>Issue: {issue_type}</li>\
         <li>Location: {location}</li>\
         <li>Severity: {severity}</li>\
         </ul>\
         <p>Please review it in your dashboard.</p>\
         </div>"
    );
    (subject, body)
}

/// Sent to the reporter when the report status changes. A steward note
/// and evidence photo accompanying the change are included when present.
pub fn status_change(
    reporter_name: &str,
    tracking_number: &str,
    new_status: &str,
    note: Option<&str>,
    evidence_url: Option<&str>,
) -> (String, String) {
    let subject = format!("Report {tracking_number} update: {new_status}");
    let note_block = match note.filter(|n| !n.trim().is_empty()) {
        Some(n) => format!("<p>Note from the assigned steward: {n}</p>"),
        None => String::new(),
    };
    let evidence_block = match evidence_url {
        Some(url) => format!("<p><a href=\"{url}\">View the attached photo</a></p>"),
        None => String::new(),
    };
    let body = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px;\">\
         <h2>Hello, {reporter_name}</h2>\
         <p>The status of your report <strong>{tracking_number}</strong> \
         is now <strong>{new_status}</strong>.</p>\
         {note_block}\
         {evidence_block}\
         </div>"
    );
    (subject, body)
}

/// Credentials email for a newly provisioned steward. Contains the
/// temporary password, so it is only ever sent to the steward's own
/// address.
pub fn steward_credentials(
    steward_name: &str,
    employee_id: &str,
    temp_password: &str,
) -> (String, String) {
    let subject = "Your steward account is ready".to_string();
    let body = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px;\">\
         <h2>Welcome, {steward_name}</h2>\
         <p>A steward account has been created for you.</p>\
         <ul>\
         <li>Employee ID: <strong>{employee_id}</strong></li>\
         <li>Temporary password: <strong>{temp_password}</strong></li>\
         </ul>\
         <p>Sign in with these credentials and change your password as soon \
         as possible.</p>\
         </div>"
    );
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_carries_tracking_number() {
        let (subject, body) = submission_confirmation("Ada", "WL1699999999999ABCDE");
        assert!(subject.contains("WL1699999999999ABCDE"));
        assert!(body.contains("WL1699999999999ABCDE"));
        assert!(body.contains("Ada"));
    }

    #[test]
    fn assignment_names_both_parties() {
        let (_, body) = citizen_assignment("Ada", "WL1X", "Grace");
        assert!(body.contains("Ada"));
        assert!(body.contains("Grace"));
    }

    #[test]
    fn steward_assignment_lists_report_details() {
        let (subject, body) = steward_assignment("Grace", "WL1X", "leak", "5 Main St", "high");
        assert!(subject.contains("WL1X"));
        assert!(body.contains("leak"));
        assert!(body.contains("5 Main St"));
        assert!(body.contains("high"));
    }

    #[test]
    fn status_change_includes_note_and_evidence_when_present() {
        let (_, with_extras) = status_change(
            "Ada",
            "WL1X",
            "resolved",
            Some("pipe replaced"),
            Some("http://localhost:3000/uploads/a.png"),
        );
        assert!(with_extras.contains("pipe replaced"));
        assert!(with_extras.contains("/uploads/a.png"));

        let (_, bare) = status_change("Ada", "WL1X", "resolved", None, None);
        assert!(!bare.contains("Note from"));
        assert!(!bare.contains("href"));
    }

    #[test]
    fn credentials_include_temp_password() {
        let (_, body) = steward_credentials("Grace", "STW0007", "s3cretPass!@");
        assert!(body.contains("STW0007"));
        assert!(body.contains("s3cretPass!@"));
    }
}
