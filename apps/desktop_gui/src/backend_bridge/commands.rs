//! Backend commands queued from UI to backend worker.

use shared::protocol::SubmissionPayload;

#[derive(Debug)]
pub enum BackendCommand {
    SubmitPrediction { payload: SubmissionPayload },
    CheckHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubmitPrediction { .. } => "submit_prediction",
            Self::CheckHealth => "check_health",
        }
    }
}
