use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::model::{Forecast, ForecastDay, Query};

/// Prediction errors. All three kinds are terminal for the current request;
/// nothing is retried.
#[derive(Debug, Error)]
pub enum PredictError {
    /// Missing location or date. No request is dispatched.
    #[error("Please enter both location and date.")]
    Validation,

    /// The backend replied with an application-level error message,
    /// surfaced verbatim.
    #[error("{0}")]
    Backend(String),

    /// The request could not be completed, or the reply was malformed.
    /// The detail is kept for logs; the display text stays generic.
    #[error("Error connecting to server.")]
    Transport(String),
}

impl PredictError {
    /// Transport detail hidden from the Display text, for logging.
    #[must_use]
    pub fn transport_detail(&self) -> Option<&str> {
        match self {
            Self::Transport(detail) => Some(detail),
            _ => None,
        }
    }
}

/// Seam between the UI component and the prediction service, so the
/// component can be driven without a live backend.
#[async_trait]
pub trait PredictBackend: Send + Sync + Debug {
    async fn predict(&self, query: &Query) -> Result<Forecast, PredictError>;
}

/// HTTP client for the prediction endpoint.
#[derive(Debug, Clone)]
pub struct PredictClient {
    http: Client,
    base_url: String,
}

impl PredictClient {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> Result<Self, PredictError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PredictError::Transport(e.to_string()))?;

        Ok(Self { http, base_url: config.backend_url.clone() })
    }

    fn endpoint(&self) -> String {
        format!("{}/predict", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PredictBackend for PredictClient {
    #[instrument(skip(self), fields(location = %query.location, date = %query.date))]
    async fn predict(&self, query: &Query) -> Result<Forecast, PredictError> {
        let url = self.endpoint();
        debug!(url = %url, "Dispatching prediction request");

        let res = self
            .http
            .post(&url)
            .json(query)
            .send()
            .await
            .map_err(|e| PredictError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| PredictError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(PredictError::Transport(format!(
                "prediction request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let raw: RawReply = serde_json::from_str(&body)
            .map_err(|e| PredictError::Transport(format!("failed to parse prediction reply: {e}")))?;

        raw.into_forecast()
    }
}

/// Wire shape of the backend reply. Every field is optional because the
/// error and success variants share one JSON object.
#[derive(Debug, Deserialize)]
struct RawReply {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default)]
    forecast: Option<Vec<ForecastDay>>,
    #[serde(default)]
    recommendation: Option<String>,
}

impl RawReply {
    /// An `error` field wins over everything else in the reply; a success
    /// reply missing any field counts as malformed.
    fn into_forecast(self) -> Result<Forecast, PredictError> {
        if let Some(message) = self.error {
            return Err(PredictError::Backend(message));
        }

        Ok(Forecast {
            location: self.location.ok_or_else(|| missing("location"))?,
            date: self.date.ok_or_else(|| missing("date"))?,
            temperature: self.temperature.ok_or_else(|| missing("temperature"))?,
            forecast: self.forecast.ok_or_else(|| missing("forecast"))?,
            recommendation: self.recommendation.ok_or_else(|| missing("recommendation"))?,
        })
    }
}

fn missing(field: &str) -> PredictError {
    PredictError::Transport(format!("prediction reply missing field `{field}`"))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Floor to a char boundary so multi-byte text cannot panic the slice.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
