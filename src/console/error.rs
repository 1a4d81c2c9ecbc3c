use thiserror::Error;

use crate::shared::types::FieldErrors;

/// Failure of a round trip to the API, as seen by a screen
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server rejected the payload with per-field messages
    #[error("Validation failed: {} field(s) invalid", .0.len())]
    Validation(FieldErrors),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl ClientError {
    /// Message for the global, dismissible notification
    pub fn notification(&self) -> String {
        match self {
            ClientError::Validation(_) => "Please correct the highlighted fields.".to_string(),
            ClientError::Transport(_) => {
                "Could not reach the server. Please try again.".to_string()
            }
            ClientError::Server { message, .. } => message.clone(),
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
