use std::error::Error as StdError;

use shared::error::ErrorBody;
use thiserror::Error;

/// Why a prediction request did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The service answered with a non-success status.
    #[error("Error: {message}")]
    Server {
        status: u16,
        message: String,
        details: Vec<String>,
    },
    /// The exchange never completed, or the success body was unusable.
    #[error("Network error: {reason}")]
    Transport { reason: String },
}

impl SubmitError {
    pub fn server(status: u16, body: Option<ErrorBody>) -> Self {
        let body = body.unwrap_or_default();
        let message = body
            .error
            .unwrap_or_else(|| format!("Prediction request failed (HTTP {status})"));
        Self::Server {
            status,
            message,
            details: body.details,
        }
    }

    pub fn transport(err: &(dyn StdError + 'static)) -> Self {
        let mut reason = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !reason.contains(&text) {
                reason.push_str(": ");
                reason.push_str(&text);
            }
            source = cause.source();
        }
        Self::Transport { reason }
    }

    pub fn transport_message(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn details(&self) -> &[String] {
        match self {
            Self::Server { details, .. } => details,
            Self::Transport { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),
}

/// A submit action that was refused before any request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("a prediction request is already in flight")]
    Busy,
    #[error("required field '{0}' is empty")]
    MissingField(&'static str),
}
