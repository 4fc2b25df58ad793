use reqwest::{multipart::Form, Client};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;

use crate::{
    domain::{ContactSubmission, SubmissionOutcome},
    waitlist_client::string_field,
    SubmissionError,
};

/// Hosted form relay that turns a submission into an email.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http_client: Client,
    endpoint: String,
    access_key: Secret<String>,
}

impl RelayClient {
    pub fn new(endpoint: String, access_key: Secret<String>) -> Self {
        Self {
            http_client: Client::new(),
            endpoint,
            access_key,
        }
    }

    #[tracing::instrument(
        name = "Sending a contact message to the relay",
        skip(self, submission),
        fields(
            sender_email = %submission.email,
            reason = submission.reason.as_str(),
            destination = submission.destination()
        )
    )]
    pub async fn send(&self, submission: &ContactSubmission) -> Result<SubmissionOutcome, SubmissionError> {
        let form = Form::new()
            .text("access_key", self.access_key.expose_secret().clone())
            .text("subject", submission.subject())
            .text("to", submission.destination())
            .text("name", submission.name.clone())
            .text("email", submission.email.as_ref().to_owned())
            .text("reason", submission.reason.label())
            .text("message", submission.message.clone());

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let body = response.bytes().await?;
        let reply: Value = serde_json::from_slice(&body).map_err(SubmissionError::InvalidResponse)?;

        let outcome = if reply.get("success").and_then(Value::as_bool) == Some(true) {
            SubmissionOutcome::Accepted {
                message: string_field(&reply, &["message"]),
            }
        } else {
            SubmissionOutcome::Rejected {
                reason: string_field(&reply, &["message", "error"]),
            }
        };
        tracing::info!(accepted = outcome.is_accepted(), "Relay answered");
        Ok(outcome)
    }
}
