use shared::protocol::{PredictionResult, SubmissionPayload};
use tracing::{info, warn};

use crate::{
    error::{FormError, SubmitError, SubmitRejected},
    form::FormState,
    render::SubmissionView,
    PredictionTransport,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(PredictionResult),
    Failed(SubmitError),
}

impl SubmissionState {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }
}

/// Owns one form instance and the lifecycle of its single in-flight submission.
#[derive(Debug, Clone, Default)]
pub struct SubmissionController {
    form: FormState,
    state: SubmissionState,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.state {
            SubmissionState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SubmitError> {
        match &self.state {
            SubmissionState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Replaces one raw value. Submission state is left as it is.
    pub fn set_field(&mut self, name: &str, raw: impl Into<String>) -> Result<(), FormError> {
        self.form.set_field(name, raw)
    }

    /// Enters `Submitting` and hands back the payload to send.
    ///
    /// Refusals leave the state untouched.
    pub fn begin_submit(&mut self) -> Result<SubmissionPayload, SubmitRejected> {
        if self.is_submitting() {
            return Err(SubmitRejected::Busy);
        }
        if let Some(name) = self.form.first_missing() {
            return Err(SubmitRejected::MissingField(name));
        }

        self.state = SubmissionState::Submitting;
        info!("prediction submission started");
        Ok(self.form.payload())
    }

    /// Applies the outcome of the in-flight request.
    pub fn settle(&mut self, outcome: Result<PredictionResult, SubmitError>) {
        if !self.is_submitting() {
            warn!("settling a prediction outcome with no submission in flight");
        }

        self.state = match outcome {
            Ok(result) => {
                info!(label = %result.label, probability = result.probability, "prediction settled");
                SubmissionState::Succeeded(result)
            }
            Err(err) => {
                warn!(transport = err.is_transport(), %err, "prediction failed");
                SubmissionState::Failed(err)
            }
        };
    }

    pub async fn submit<T>(&mut self, transport: &T) -> Result<&SubmissionState, SubmitRejected>
    where
        T: PredictionTransport + ?Sized,
    {
        let payload = self.begin_submit()?;
        let outcome = transport.predict(&payload).await;
        self.settle(outcome);
        Ok(&self.state)
    }

    pub fn view(&self) -> SubmissionView {
        SubmissionView::from_state(&self.state)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
