use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The failures this core can actually produce. Everything else is the
/// shell's or the backend's problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    EmptyResponse,
    Validation,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::EmptyResponse => "EMPTY_RESPONSE",
            Self::Validation => "VALIDATION_ERROR",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("[{}] {message}", .kind.code())]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::Network => {
                "Unable to connect. Please check your internet connection and try again.".into()
            }
            ErrorKind::EmptyResponse => {
                "The server returned an empty response. Please try again.".into()
            }
            ErrorKind::Validation => self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_message() {
        let err = AppError::new(ErrorKind::Network, "connection refused");
        assert_eq!(err.to_string(), "[NETWORK_ERROR] connection refused");
    }

    #[test]
    fn validation_message_passes_through() {
        let err = AppError::new(ErrorKind::Validation, "price must be positive");
        assert_eq!(err.user_facing_message(), "price must be positive");
    }
}
