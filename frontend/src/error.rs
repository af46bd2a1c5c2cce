/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network down, CORS, aborted).
    #[error("{0}")]
    Transport(String),
    /// A 2xx response whose body was not the expected JSON.
    #[error("invalid response: {0}")]
    Parse(String),
    #[error("server responded with status {status}")]
    Server { status: u16, message: Option<String> },
}

impl ApiError {
    /// Text shown to the user for this failure.
    ///
    /// Server failures surface the backend's own message (or `fallback`),
    /// everything else is prefixed with `context`.
    pub fn describe(&self, context: &str, fallback: &str) -> String {
        match self {
            ApiError::Server { message, .. } => {
                format!("Error: {}", message.as_deref().unwrap_or(fallback))
            }
            ApiError::Transport(_) | ApiError::Parse(_) => format!("{}: {}", context, self),
        }
    }
}
