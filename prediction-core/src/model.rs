use serde::{Deserialize, Serialize};

use crate::client::PredictError;

/// One prediction request, built from user input at trigger time.
///
/// Both fields are trimmed and non-empty; `Query::from_input` is the only
/// way to construct one, so a dispatched query always satisfies that.
#[derive(Debug, Clone, Serialize)]
pub struct Query {
    pub location: String,
    pub date: String,
}

impl Query {
    /// Trim both inputs and reject the query if either ends up empty.
    pub fn from_input(location: &str, date: &str) -> Result<Self, PredictError> {
        let location = location.trim();
        let date = date.trim();

        if location.is_empty() || date.is_empty() {
            return Err(PredictError::Validation);
        }

        Ok(Self { location: location.to_string(), date: date.to_string() })
    }
}

/// A successful prediction, as echoed by the backend.
///
/// `location` and `date` come from the backend, not from the typed input;
/// the echoed values are authoritative for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub location: String,
    pub date: String,
    pub temperature: f64,
    pub forecast: Vec<ForecastDay>,
    pub recommendation: String,
}

/// One day of the multi-day forecast strip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub temp: f64,
}
