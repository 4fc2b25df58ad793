/// Failures that leave a submission without a readable answer.
#[derive(thiserror::Error)]
pub enum SubmissionError {
    #[error("The server returned an unexpected response")]
    InvalidResponse(#[source] serde_json::Error),
    #[error("Unable to connect to the server")]
    Connection(#[from] reqwest::Error),
}

impl std::fmt::Debug for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
