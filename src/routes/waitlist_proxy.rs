use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::{configuration::Environment, error_chain_fmt, waitlist_client::WaitlistClient};

/// Same-origin `POST /api/waitlist`, kept for callers that still post here
/// instead of calling the backend directly.
///
/// Backend JSON is relayed with its status. Anything else becomes a 502.
#[tracing::instrument(
    name = "Proxying a waitlist request",
    skip(body, client, environment),
    fields(body_length = body.len())
)]
pub async fn waitlist_proxy(
    body: web::Bytes,
    client: web::Data<WaitlistClient>,
    environment: web::Data<Environment>,
) -> Result<HttpResponse, ProxyError> {
    let response = match client.forward(body).await {
        Ok(response) => response,
        Err(e) => {
            if !environment.is_production() {
                tracing::error!(error.cause_chain = ?e, "Error proxying to backend");
            }
            return Err(ProxyError::Unreachable);
        }
    };

    let status = response.status().as_u16();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("application/json"))
        .unwrap_or(false);
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            if !environment.is_production() {
                tracing::error!(error.cause_chain = ?e, "Backend response was cut short");
            }
            return Err(ProxyError::Unreachable);
        }
    };
    let raw_response = || String::from_utf8_lossy(&body).into_owned();

    if !is_json {
        return Err(ProxyError::NonJson { raw_response: raw_response(), status });
    }
    let data: serde_json::Value = serde_json::from_slice(&body).map_err(|e| ProxyError::InvalidJson {
        raw_response: raw_response(),
        status,
        source: e,
    })?;

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok(HttpResponse::build(status).json(data))
}

#[derive(thiserror::Error)]
pub enum ProxyError {
    #[error("Invalid JSON response from backend")]
    InvalidJson {
        raw_response: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    #[error("Backend returned non-JSON response")]
    NonJson { raw_response: String, status: u16 },
    #[error("Failed to connect to backend API")]
    Unreachable,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProxyErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_response: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl std::fmt::Debug for ProxyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_GATEWAY
    }

    fn error_response(&self) -> HttpResponse {
        let (raw_response, status) = match self {
            ProxyError::InvalidJson { raw_response, status, .. }
            | ProxyError::NonJson { raw_response, status } => (Some(raw_response.as_str()), Some(*status)),
            ProxyError::Unreachable => (None, None),
        };
        HttpResponse::build(self.status_code()).json(ProxyErrorBody {
            error: self.to_string(),
            raw_response,
            status,
        })
    }
}
