use thiserror::Error;

/// Why a lookup could not produce a usable answer.
///
/// A "city not found" reply is not an error; see [`crate::LookupOutcome::NotFound`].
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request to weather service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to parse weather service response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("weather service returned status {status}: {body}")]
    UnexpectedResponse { status: u16, body: String },
}

impl LookupError {
    pub(crate) fn unexpected(status: u16, body: &str) -> Self {
        LookupError::UnexpectedResponse {
            status,
            body: truncate_body(body),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
