use thiserror::Error;

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

impl ServiceError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Generic text shown to the user; wire details stay in the logs.
    pub fn client_display(&self) -> String {
        match self {
            Self::Transport(_) => String::from("Service unreachable."),
            Self::Status { .. } => String::from("The service reported an error."),
            Self::MalformedResponse { .. } => {
                String::from("The service sent an unusable response.")
            }
        }
    }
}
