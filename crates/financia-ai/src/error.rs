use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI assistance is disabled")]
    Disabled,
    #[error("no API key configured (set {0})")]
    MissingApiKey(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model returned no content")]
    EmptyResponse,
    #[error("malformed model response: {0}")]
    Malformed(String),
    #[error("a {0} request is already in progress")]
    Busy(&'static str),
}

impl From<serde_json::Error> for AiError {
    fn from(err: serde_json::Error) -> Self {
        AiError::Malformed(err.to_string())
    }
}
