//! Core library for the temperature prediction client.
//!
//! This crate defines:
//! - Configuration for reaching the prediction backend
//! - The HTTP client speaking the backend's predict contract
//! - Shared domain models (query, forecast, icons)
//! - The prediction component wiring input, request, and rendering
//!
//! It is used by `prediction-cli`, but can also be reused by other binaries
//! or services.

pub mod client;
pub mod config;
pub mod icon;
pub mod model;
pub mod ui;

pub use client::{PredictBackend, PredictClient, PredictError};
pub use config::Config;
pub use icon::Icon;
pub use model::{Forecast, ForecastDay, Query};
pub use ui::{DayBox, PredictionUi, PredictionView};
