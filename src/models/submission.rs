//! Inbound contact-form event and the verdict returned to the host.

use serde::{Deserialize, Serialize};

/// The contact a message is addressed to.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRef {
    pub email: String,
}

/// A contact form submission awaiting validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactSubmission {
    pub from_email: String,
    pub contact: ContactRef,
}

/// Outcome of validating one submission.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubmissionVerdict {
    pub blocked: bool,
    pub matched_rule_ids: Vec<i64>,
    /// Empty when delivery may proceed, otherwise one message for the sender.
    pub errors: Vec<String>,
}

impl SubmissionVerdict {
    pub fn accepted() -> Self {
        Self::default()
    }
}

/// Text shown to a blocked sender.
pub fn rejection_message(contact_email: &str) -> String {
    format!(
        "Your email address is blocked from sending messages through contact form. \
         Please send email to {contact_email} instead"
    )
}
