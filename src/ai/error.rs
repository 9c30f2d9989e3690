/// Failure taxonomy for the assistant request path.
///
/// `ServerOverloaded`, `RateLimited` and `NetworkError` are transient and
/// eligible for backoff; `MalformedResponse` and `Unknown` surface
/// immediately.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssistantError {
    #[error("erro 503: {0}")]
    ServerOverloaded(String),

    #[error("erro 429: {0}")]
    RateLimited(String),

    #[error("erro de rede: {0}")]
    NetworkError(String),

    #[error("resposta inválida da API")]
    MalformedResponse,

    #[error("erro {code}: {message}")]
    Unknown { code: u16, message: String },
}

impl AssistantError {
    /// Classify an HTTP-level failure. The error body's code takes
    /// precedence over the raw status when the endpoint supplies one.
    pub fn from_status(code: u16, message: String) -> Self {
        match code {
            503 => Self::ServerOverloaded(message),
            429 => Self::RateLimited(message),
            _ => Self::Unknown { code, message },
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ServerOverloaded(_) | Self::RateLimited(_) | Self::NetworkError(_)
        )
    }
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        AssistantError::NetworkError(err.to_string())
    }
}
