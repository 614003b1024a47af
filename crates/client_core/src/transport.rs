use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ErrorBody,
    protocol::{HealthResponse, PredictionResult, SubmissionPayload},
};
use tracing::{debug, info, warn};

use crate::{config::ClientSettings, error::SubmitError, PredictionTransport};

/// Talks to the prediction service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: Client,
    base_url: String,
}

impl HttpPredictionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.server_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }
}

#[async_trait]
impl PredictionTransport for HttpPredictionClient {
    async fn predict(&self, payload: &SubmissionPayload) -> Result<PredictionResult, SubmitError> {
        let url = self.predict_url();
        debug!(%url, fields = payload.len(), "posting prediction request");

        let res = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|err| SubmitError::transport(&err))?;

        let status = res.status();
        if status.is_success() {
            let result: PredictionResult = res
                .json()
                .await
                .map_err(|err| SubmitError::transport(&err))?;
            info!(
                %url,
                label = %result.label,
                probability = result.probability,
                "prediction received"
            );
            return Ok(result);
        }

        let body = match res.json::<ErrorBody>().await {
            Ok(body) => Some(body),
            Err(err) => {
                debug!(%url, %err, "error response carried no usable body");
                None
            }
        };
        let err = SubmitError::server(status.as_u16(), body);
        warn!(%url, status = status.as_u16(), %err, "prediction request rejected");
        Err(err)
    }

    async fn health(&self) -> Result<HealthResponse, SubmitError> {
        let url = self.health_url();
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| SubmitError::transport(&err))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.json::<ErrorBody>().await.ok();
            return Err(SubmitError::server(status.as_u16(), body));
        }

        res.json()
            .await
            .map_err(|err| SubmitError::transport(&err))
    }
}
