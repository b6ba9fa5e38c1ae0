//! Test-result notification composition and dispatch.
//!
//! Composition is pure; dispatch is best-effort. A process whose status
//! change has been persisted stays changed even when the mail relay is
//! down - the failure is logged and swallowed.

use tracing::warn;

use crate::domains::appointment::Appointment;
use crate::domains::donor::Donor;
use crate::kernel::BaseMailer;

const SUBJECT: &str = "Your blood test results";

/// A composed notification, ready for the mailer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResultEmail {
    pub subject: String,
    pub body: String,
}

/// Build the fixed-template results message.
///
/// Donation history can predate appointment tracking, so a missing
/// appointment falls back to placeholder text instead of failing. Same for
/// a donor whose blood group was never determined.
pub fn compose_test_result_email(
    donor: &Donor,
    appointment: Option<&Appointment>,
    is_safe: bool,
    failure_notes: Option<&str>,
) -> TestResultEmail {
    let (donation_date, location) = match appointment {
        Some(a) => (
            a.scheduled_at.format("%d/%m/%Y").to_string(),
            a.location.clone(),
        ),
        None => ("an unknown date".to_string(), "an unknown location".to_string()),
    };

    let blood_group = donor.blood_group.as_deref().unwrap_or("undetermined");

    let result_text = if is_safe {
        format!(
            "Blood panel result: group {}, negative for HIV, hepatitis B, hepatitis C, and syphilis.",
            blood_group
        )
    } else {
        format!(
            "Blood panel result: your donation did not meet safety standards. Reason: {}. \
             Please contact a medical facility for a detailed consultation.",
            failure_notes.unwrap_or("not specified")
        )
    };

    let body = format!(
        "Dear {},\n\n\
         Thank you for taking part in the blood donation on {} at {}.\n\n\
         {}\n\n\
         We hope you will join us again in a future donation drive.",
        donor.full_name, donation_date, location, result_text
    );

    TestResultEmail {
        subject: SUBJECT.to_string(),
        body,
    }
}

/// Compose and send the results mail; never fails the caller.
pub async fn dispatch_test_result_email(
    mailer: &dyn BaseMailer,
    donor: &Donor,
    appointment: Option<&Appointment>,
    is_safe: bool,
    failure_notes: Option<&str>,
) {
    let email = compose_test_result_email(donor, appointment, is_safe, failure_notes);
    if let Err(e) = mailer.send(&donor.email, &email.subject, &email.body).await {
        warn!(
            "Failed to dispatch test result email to {}: {}",
            donor.email, e
        );
    }
}
