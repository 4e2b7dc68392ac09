use std::fmt;

/// Error type for backend API operations
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Network failure or timeout before a response envelope arrived
    Transport(String),
    /// Response arrived but the envelope could not be decoded
    Decode(String),
    /// Envelope carried a non-200 business code
    Server { code: i64, msg: String },
    /// Envelope carried code 401: the session token is no longer valid
    SessionExpired(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "Network error: {}", msg),
            ApiError::Decode(msg) => write!(f, "Invalid response: {}", msg),
            ApiError::Server { code, msg } => write!(f, "Server error ({}): {}", code, msg),
            ApiError::SessionExpired(msg) => write!(f, "Session expired: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// True when the caller must drop the session and return to the login screen.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired(_))
    }

    /// User-friendly message for UI surfaces.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "Request failed, please try again later.".to_string(),
            ApiError::Decode(_) => "Unexpected server response, please try again.".to_string(),
            ApiError::Server { msg, .. } => msg.clone(),
            ApiError::SessionExpired(msg) => msg.clone(),
        }
    }
}
