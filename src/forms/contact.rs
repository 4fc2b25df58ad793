use std::sync::{Mutex, MutexGuard};

use crate::{
    domain::{ContactReason, ContactSubmission, EmailAddress, FormStatus, SubmissionOutcome},
    forms::{lock, FormError, FormState, InFlight},
    notifications::Notifications,
    relay_client::RelayClient,
};

const FAILURE_TITLE: &str = "Failed to send message";
const FAILURE_FALLBACK: &str = "Please try again later or email us directly.";

/// What the user has typed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub reason: Option<ContactReason>,
    pub message: String,
}

#[derive(Debug, Default)]
struct ContactFormState {
    fields: ContactFields,
    status: FormStatus,
}

impl FormState for ContactFormState {
    fn status_mut(&mut self) -> &mut FormStatus {
        &mut self.status
    }
}

/// Contact form submitted straight to the form relay.
#[derive(Debug)]
pub struct ContactForm {
    client: RelayClient,
    notifications: Notifications,
    state: Mutex<ContactFormState>,
}

impl ContactForm {
    pub fn new(client: RelayClient, notifications: Notifications) -> Self {
        Self {
            client,
            notifications,
            state: Mutex::new(ContactFormState::default()),
        }
    }

    pub fn fields(&self) -> ContactFields {
        self.state().fields.clone()
    }

    pub fn status(&self) -> FormStatus {
        self.state().status
    }

    pub fn is_submit_enabled(&self) -> bool {
        !self.status().is_loading()
    }

    /// Inbox the message will be sent to for the reason picked so far.
    pub fn destination(&self) -> &'static str {
        self.state().fields.reason.unwrap_or_default().destination()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.edit(|fields| fields.name = name.into())
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.edit(|fields| fields.email = email.into())
    }

    pub fn set_reason(&self, reason: ContactReason) {
        self.edit(|fields| fields.reason = Some(reason))
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.edit(|fields| fields.message = message.into())
    }

    /// Send the message and return the status the form settled on.
    ///
    /// Any failure, whether the relay refused, answered garbage or could not
    /// be reached, ends in `Error` with a single failure notification.
    #[tracing::instrument(name = "Submitting the contact form", skip(self))]
    pub async fn submit(&self) -> Result<FormStatus, FormError> {
        let submission = {
            let mut state = self.state();
            if state.status.is_loading() {
                return Err(FormError::AlreadySubmitting);
            }
            let fields = &state.fields;
            if [&fields.name, &fields.email, &fields.message].iter().any(|f| f.is_empty()) {
                return Err(FormError::InvalidField("Please fill in every field".into()));
            }
            let email = EmailAddress::parse(fields.email.clone()).map_err(FormError::InvalidField)?;
            let submission = ContactSubmission {
                name: fields.name.clone(),
                email,
                reason: fields.reason.unwrap_or_default(),
                message: fields.message.clone(),
            };
            state.status = FormStatus::Loading;
            submission
        };

        let toast = self.notifications.loading(
            "Sending your message...",
            "Please wait while we process your request",
        );
        let in_flight = InFlight::new(&self.state, &self.notifications, toast, FAILURE_TITLE);

        let status = match self.client.send(&submission).await {
            Ok(SubmissionOutcome::Accepted { .. }) => {
                self.notifications.success(
                    toast,
                    "Message sent!",
                    "We'll get back to you as soon as possible.",
                );
                FormStatus::Success
            }
            Ok(SubmissionOutcome::Rejected { reason }) => {
                self.notifications.error(
                    toast,
                    FAILURE_TITLE,
                    reason.as_deref().unwrap_or("Failed to send message"),
                );
                FormStatus::Error
            }
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Contact message was not delivered");
                self.notifications.error(toast, FAILURE_TITLE, FAILURE_FALLBACK);
                FormStatus::Error
            }
        };

        {
            let mut state = self.state();
            state.status = status;
            if status == FormStatus::Success {
                state.fields = ContactFields::default();
            }
        }
        in_flight.finish();
        Ok(status)
    }

    /// Inputs are disabled while loading, so edits are ignored then.
    fn edit(&self, change: impl FnOnce(&mut ContactFields)) {
        let mut state = self.state();
        if state.status.is_loading() {
            tracing::debug!("Ignoring an edit while the contact form is loading");
            return;
        }
        change(&mut state.fields);
        state.status = FormStatus::Idle;
    }

    fn state(&self) -> MutexGuard<'_, ContactFormState> {
        lock(&self.state)
    }
}
