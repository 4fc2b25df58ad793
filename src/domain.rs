mod contact_reason;
mod contact_submission;
mod email_address;
mod form_status;
mod submission_outcome;

pub use contact_reason::ContactReason;
pub use contact_submission::ContactSubmission;
pub use email_address::EmailAddress;
pub use form_status::FormStatus;
pub use submission_outcome::SubmissionOutcome;
