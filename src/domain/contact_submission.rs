use super::{ContactReason, EmailAddress};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: EmailAddress,
    pub reason: ContactReason,
    pub message: String,
}

impl ContactSubmission {
    pub fn subject(&self) -> String {
        format!("Contact Form - {}", self.reason.label())
    }

    pub fn destination(&self) -> &'static str {
        self.reason.destination()
    }
}
