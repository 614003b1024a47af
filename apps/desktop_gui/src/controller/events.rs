//! Backend-to-UI events and status wording for the prediction form.

use client_core::SubmitError;
use shared::protocol::{HealthResponse, PredictionResult};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    PredictionSettled(Result<PredictionResult, SubmitError>),
    HealthChecked(Result<HealthResponse, SubmitError>),
}

/// Status-line hint shown next to a failed prediction. The error region keeps
/// the error's own message.
pub fn classify_submit_failure(err: &SubmitError) -> &'static str {
    match err {
        SubmitError::Server { status, .. } if *status == 429 => {
            "Prediction service is rate limiting requests; wait a minute and resubmit."
        }
        SubmitError::Server { status, .. } if *status >= 500 => {
            "Prediction service failed internally; resubmit later."
        }
        SubmitError::Server { .. } => "Prediction service rejected the form; check the inputs.",
        SubmitError::Transport { reason } => {
            let lower = reason.to_ascii_lowercase();
            if lower.contains("connection refused")
                || lower.contains("dns")
                || lower.contains("timed out")
                || lower.contains("error sending request")
            {
                "Prediction service unreachable; check the server URL and resubmit."
            } else if lower.contains("decoding") || lower.contains("decode") {
                "Prediction service sent an unexpected response."
            } else {
                "Prediction request did not complete; resubmit to retry."
            }
        }
    }
}
