use async_trait::async_trait;
use shared::protocol::{HealthResponse, PredictionResult, SubmissionPayload};

pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod render;
pub mod transport;

pub use config::{load_settings, ClientSettings};
pub use controller::{SubmissionController, SubmissionState};
pub use error::{FormError, SubmitError, SubmitRejected};
pub use form::FormState;
pub use render::{ResultView, SubmissionView};
pub use transport::HttpPredictionClient;

/// The remote side of a submission: one request, one outcome.
#[async_trait]
pub trait PredictionTransport: Send + Sync {
    async fn predict(&self, payload: &SubmissionPayload) -> Result<PredictionResult, SubmitError>;
    async fn health(&self) -> Result<HealthResponse, SubmitError>;
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
