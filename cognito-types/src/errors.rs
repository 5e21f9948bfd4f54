/// Failures of the callback flow.
///
/// Everything except `InvalidConfig` and `ServerError` is converted into a
/// JSON error response by the handler instead of being propagated.
#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    #[error("Invalid callback configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build token request: {0}")]
    RequestBuild(String),

    #[error("Token request failed: {0}")]
    Transport(String),

    #[error("Token endpoint returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to decode token response: {0}")]
    Decode(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

impl CallbackError {
    /// HTTP status reported to the caller. Only upstream rejections keep
    /// their own status; every local failure is a 500.
    pub fn status_code(&self) -> u16 {
        match self {
            CallbackError::Upstream { status, .. } => *status,
            _ => 500,
        }
    }

    /// Text placed in the `message-error` field of the error body.
    pub fn message(&self) -> &str {
        match self {
            CallbackError::InvalidConfig(msg)
            | CallbackError::RequestBuild(msg)
            | CallbackError::Transport(msg)
            | CallbackError::Decode(msg)
            | CallbackError::ServerError(msg) => msg,
            CallbackError::Upstream { body, .. } => body,
        }
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, CallbackError::Upstream { .. })
    }
}
