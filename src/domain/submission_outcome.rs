/// What the remote side made of a submission that got a readable answer.
///
/// Transport failures and unreadable bodies are not outcomes, see
/// [`crate::SubmissionError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted { message: Option<String> },
    Rejected { reason: Option<String> },
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted { .. })
    }
}
