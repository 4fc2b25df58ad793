use reqwest::{header::CONTENT_TYPE, Client, Response};
use serde_json::Value;

use crate::{domain::{SubmissionOutcome, EmailAddress}, SubmissionError};

/// Talks to the product backend's `/api/waitlist` endpoint.
#[derive(Debug, Clone)]
pub struct WaitlistClient {
    http_client: Client,
    endpoint: String,
}

#[derive(serde::Serialize)]
struct JoinWaitlistRequest<'a> {
    email: &'a str,
}

impl WaitlistClient {
    pub fn new(base_url: String) -> Self {
        let endpoint = format!("{}/api/waitlist", base_url.trim_end_matches('/'));
        Self {
            http_client: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the backend to add `email` to the waitlist.
    ///
    /// The body is parsed before the status is looked at: a body that is not
    /// JSON is an [`SubmissionError::InvalidResponse`] whatever the status.
    #[tracing::instrument(name = "Joining the waitlist", skip(self, email), fields(email = %email))]
    pub async fn join(&self, email: &EmailAddress) -> Result<SubmissionOutcome, SubmissionError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&JoinWaitlistRequest { email: email.as_ref() })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let reply: Value = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(status = %status, "Backend replied with a body that is not JSON");
            SubmissionError::InvalidResponse(e)
        })?;

        let outcome = if status.is_success() {
            SubmissionOutcome::Accepted {
                message: string_field(&reply, &["message"]),
            }
        } else {
            // The backend reports `detail`, the legacy proxy reports `error`.
            SubmissionOutcome::Rejected {
                reason: string_field(&reply, &["detail", "error"]),
            }
        };
        tracing::info!(status = %status, accepted = outcome.is_accepted(), "Backend answered");
        Ok(outcome)
    }

    /// Send an already serialized JSON body to the backend untouched.
    #[tracing::instrument(name = "Forwarding to the backend", skip(self, body))]
    pub async fn forward(&self, body: actix_web::web::Bytes) -> Result<Response, reqwest::Error> {
        self.http_client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
    }
}

/// First non-empty string found under one of `keys`.
pub(crate) fn string_field(reply: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| reply.get(key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .map(str::to_owned)
}
