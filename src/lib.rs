pub mod configuration;
pub mod domain;
mod error;
pub mod forms;
pub mod notifications;
pub mod relay_client;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod waitlist_client;

pub use error::{error_chain_fmt, SubmissionError};
