use std::sync::{Mutex, MutexGuard};

use crate::{
    domain::{EmailAddress, FormStatus, SubmissionOutcome},
    forms::{lock, FormError, FormState, InFlight},
    notifications::Notifications,
    waitlist_client::WaitlistClient,
    SubmissionError,
};

const FAILURE_TITLE: &str = "Failed to join waitlist";

#[derive(Debug, Default)]
struct WaitlistFormState {
    email: String,
    status: FormStatus,
}

impl FormState for WaitlistFormState {
    fn status_mut(&mut self) -> &mut FormStatus {
        &mut self.status
    }
}

/// Email capture form feeding the product backend.
#[derive(Debug)]
pub struct WaitlistForm {
    client: WaitlistClient,
    notifications: Notifications,
    state: Mutex<WaitlistFormState>,
}

impl WaitlistForm {
    pub fn new(client: WaitlistClient, notifications: Notifications) -> Self {
        Self {
            client,
            notifications,
            state: Mutex::new(WaitlistFormState::default()),
        }
    }

    pub fn email(&self) -> String {
        self.state().email.clone()
    }

    pub fn status(&self) -> FormStatus {
        self.state().status
    }

    pub fn is_submit_enabled(&self) -> bool {
        !self.status().is_loading()
    }

    /// Editing after a settled submission puts the form back to `Idle`.
    /// The input is disabled while loading, so edits are ignored then.
    pub fn set_email(&self, email: impl Into<String>) {
        let mut state = self.state();
        if state.status.is_loading() {
            tracing::debug!("Ignoring an edit while the waitlist form is loading");
            return;
        }
        state.email = email.into();
        state.status = FormStatus::Idle;
    }

    /// Submit the current email and return the status the form settled on.
    ///
    /// Refused without a request while another submission is loading, or
    /// when the email would not pass an email input's own validation.
    #[tracing::instrument(name = "Submitting the waitlist form", skip(self))]
    pub async fn submit(&self) -> Result<FormStatus, FormError> {
        let email = {
            let mut state = self.state();
            if state.status.is_loading() {
                return Err(FormError::AlreadySubmitting);
            }
            let email = EmailAddress::parse(state.email.clone()).map_err(FormError::InvalidField)?;
            state.status = FormStatus::Loading;
            email
        };

        let toast = self.notifications.loading(
            "Adding you to the waitlist...",
            "Please wait while we process your request",
        );
        let in_flight = InFlight::new(&self.state, &self.notifications, toast, FAILURE_TITLE);

        let status = match self.client.join(&email).await {
            Ok(SubmissionOutcome::Accepted { message }) => {
                self.notifications.success(
                    toast,
                    "You're on the list!",
                    message.as_deref().unwrap_or("We'll notify you when we launch."),
                );
                FormStatus::Success
            }
            Ok(SubmissionOutcome::Rejected { reason }) => {
                self.notifications.error(
                    toast,
                    FAILURE_TITLE,
                    reason.as_deref().unwrap_or("Something went wrong. Please try again."),
                );
                FormStatus::Error
            }
            Err(SubmissionError::InvalidResponse(_)) => {
                self.notifications.error(
                    toast,
                    "Invalid server response",
                    "The server returned an unexpected response. Please try again.",
                );
                FormStatus::Error
            }
            Err(e @ SubmissionError::Connection(_)) => {
                tracing::warn!(error.cause_chain = ?e, "Waitlist submission did not complete");
                self.notifications.error(
                    toast,
                    "Connection error",
                    "Unable to connect to the server. Please try again later.",
                );
                FormStatus::Error
            }
        };

        {
            let mut state = self.state();
            state.status = status;
            if status == FormStatus::Success {
                state.email.clear();
            }
        }
        in_flight.finish();
        Ok(status)
    }

    fn state(&self) -> MutexGuard<'_, WaitlistFormState> {
        lock(&self.state)
    }
}
