use std::fmt;

use album_api::ApiError;

/// Central error types for the family album app
#[derive(Debug)]
pub enum AppError {
    /// Backend API error (transport, server, session expiry)
    Api(ApiError),
    /// Camera denied or absent
    DeviceUnavailable(String),
    /// Missing required field, blocked before any network call
    Validation(String),
    /// File extension outside the allow-list
    InvalidFormat(String),
    /// File above the size ceiling
    TooLarge(String),
    /// Still-capture frame could not be encoded
    ImageEncoding(String),
    /// Config file unreadable or malformed
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "API error: {}", e),
            AppError::DeviceUnavailable(msg) => write!(f, "Camera unavailable: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::InvalidFormat(msg) => write!(f, "Unsupported format: {}", msg),
            AppError::TooLarge(msg) => write!(f, "File too large: {}", msg),
            AppError::ImageEncoding(msg) => write!(f, "Image encoding error: {}", msg),
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        AppError::Api(e)
    }
}

/// User-friendly error messages for UI surfaces
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(e) => e.user_message(),
            AppError::DeviceUnavailable(_) => {
                "Cannot access the camera. Check permissions and that a camera is present."
                    .to_string()
            }
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidFormat(msg) => msg.clone(),
            AppError::TooLarge(msg) => msg.clone(),
            AppError::ImageEncoding(_) => "Could not process the captured image.".to_string(),
            AppError::Config(_) => "Configuration could not be loaded.".to_string(),
        }
    }

    /// True when the session must be torn down and the user sent to login.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, AppError::Api(e) if e.is_session_expired())
    }
}
