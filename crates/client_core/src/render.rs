//! Display strings for the form's submit control and result regions.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use shared::protocol::PredictionResult;

use crate::controller::SubmissionState;

pub const SUBMIT_LABEL: &str = "Predict CSAT";
pub const BUSY_LABEL: &str = "Predicting...";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub headline: String,
    pub probability: String,
    pub timestamp: String,
}

impl ResultView {
    pub fn from_result(result: &PredictionResult) -> Self {
        Self {
            headline: format!(
                "{} ({})",
                result.label,
                format_prediction(&result.prediction)
            ),
            probability: format_probability(result.probability),
            timestamp: format_timestamp(&result.timestamp),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionView {
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub error: Option<String>,
    pub result: Option<ResultView>,
}

impl SubmissionView {
    pub fn from_state(state: &SubmissionState) -> Self {
        let submitting = matches!(state, SubmissionState::Submitting);
        Self {
            submit_label: if submitting { BUSY_LABEL } else { SUBMIT_LABEL },
            submit_enabled: !submitting,
            error: match state {
                SubmissionState::Failed(err) => Some(err.to_string()),
                _ => None,
            },
            result: match state {
                SubmissionState::Succeeded(result) => Some(ResultView::from_result(result)),
                _ => None,
            },
        }
    }
}

pub fn format_probability(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

pub fn format_prediction(prediction: &Value) -> String {
    match prediction {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Offset timestamps are shown in local time; naive ones are shown as sent.
pub fn format_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(TIMESTAMP_FORMAT).to_string();
    }
    if let Some(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Utc
            .from_utc_datetime(&parsed)
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string();
    }
    "Invalid Date".to_string()
}
