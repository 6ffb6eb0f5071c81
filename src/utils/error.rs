use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidFieldValueError { field: String, reason: String },
}

impl ProfileError {
    /// Message suitable for showing to the person at the terminal.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ProfileError::ApiError(_) => {
                "Unable to reach the server. Please check your connection and try again."
                    .to_string()
            }
            ProfileError::IoError(e) => format!("File access failed: {}", e),
            ProfileError::SerializationError(_) => "Received data could not be read.".to_string(),
            ProfileError::UrlError(e) => format!("Invalid URL: {}", e),
            ProfileError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem with '{}': {}", field, reason)
            }
            ProfileError::InvalidFieldValueError { field, reason } => {
                format!("Invalid {}: {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
