use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::client::{PredictBackend, PredictError};
use crate::icon::Icon;
use crate::model::{Forecast, Query};

/// One rendered unit of the forecast strip: date, icon, temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBox {
    pub date: String,
    pub icon: Icon,
    pub temp: f64,
}

/// Display surface the prediction component renders into.
///
/// One method per display element, mirroring the result area, the
/// "current forecast location" label, the forecast strip, and the
/// recommendation line. Injected at construction so the component can be
/// exercised without a terminal.
pub trait PredictionView: Send + Sync {
    /// Validation message, shown when input is missing. No request follows.
    fn validation_error(&self, message: &str);

    /// Transient "in progress" indicator while the request is in flight.
    fn progress(&self);

    /// Headline for the requested day. Location and date are the backend's
    /// echoed values, not the typed input.
    fn headline(&self, location: &str, date: &str, temperature: f64);

    /// "Current forecast location" label, from the echoed location.
    fn forecast_location(&self, location: &str);

    /// The multi-day forecast strip, one box per entry, in reply order.
    fn forecast_days(&self, days: &[DayBox]);

    /// Recommendation text, verbatim.
    fn recommendation(&self, text: &str);

    /// Terminal error: a backend message verbatim, or the generic
    /// connection-error text.
    fn error(&self, message: &str);
}

/// Orchestrates one user-triggered prediction: validate input, issue a
/// single backend request, render the outcome.
pub struct PredictionUi {
    backend: Arc<dyn PredictBackend>,
    view: Arc<dyn PredictionView>,
    // Ticket counter guarding against stale responses when a second
    // trigger overtakes the first.
    seq: AtomicU64,
}

impl PredictionUi {
    pub fn new(backend: Arc<dyn PredictBackend>, view: Arc<dyn PredictionView>) -> Self {
        Self { backend, view, seq: AtomicU64::new(0) }
    }

    /// Handle one trigger of the predict control.
    ///
    /// Empty input (after trimming) short-circuits to a validation message
    /// without touching the network. A response whose ticket is no longer
    /// current renders nothing.
    ///
    /// The view has already shown any error by the time this returns; the
    /// error is returned as well so callers can reflect it in their exit
    /// status. A dropped stale response is not an error.
    pub async fn submit(&self, location: &str, date: &str) -> Result<(), PredictError> {
        let query = match Query::from_input(location, date) {
            Ok(query) => query,
            Err(err) => {
                self.view.validation_error(&err.to_string());
                return Err(err);
            }
        };

        self.view.progress();
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.backend.predict(&query).await;

        if self.seq.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "Dropping stale prediction response");
            return Ok(());
        }

        match result {
            Ok(forecast) => {
                self.render(&forecast);
                Ok(())
            }
            Err(err) => {
                if let Some(detail) = err.transport_detail() {
                    debug!(%detail, "Prediction request failed");
                }
                self.view.error(&err.to_string());
                Err(err)
            }
        }
    }

    fn render(&self, forecast: &Forecast) {
        self.view.headline(&forecast.location, &forecast.date, forecast.temperature);
        self.view.forecast_location(&forecast.location);

        let days: Vec<DayBox> = forecast
            .forecast
            .iter()
            .map(|day| DayBox {
                date: day.date.clone(),
                icon: Icon::for_temp(day.temp),
                temp: day.temp,
            })
            .collect();
        self.view.forecast_days(&days);

        self.view.recommendation(&forecast.recommendation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ForecastDay;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Validation(String),
        Progress,
        Headline(String, String, f64),
        Location(String),
        Days(Vec<DayBox>),
        Recommendation(String),
        Error(String),
    }

    #[derive(Default)]
    struct RecordingView {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingView {
        fn events(&self) -> Vec<Event> {
            self.events.lock().expect("view lock").clone()
        }

        fn push(&self, event: Event) {
            self.events.lock().expect("view lock").push(event);
        }
    }

    impl PredictionView for RecordingView {
        fn validation_error(&self, message: &str) {
            self.push(Event::Validation(message.to_string()));
        }

        fn progress(&self) {
            self.push(Event::Progress);
        }

        fn headline(&self, location: &str, date: &str, temperature: f64) {
            self.push(Event::Headline(location.to_string(), date.to_string(), temperature));
        }

        fn forecast_location(&self, location: &str) {
            self.push(Event::Location(location.to_string()));
        }

        fn forecast_days(&self, days: &[DayBox]) {
            self.push(Event::Days(days.to_vec()));
        }

        fn recommendation(&self, text: &str) {
            self.push(Event::Recommendation(text.to_string()));
        }

        fn error(&self, message: &str) {
            self.push(Event::Error(message.to_string()));
        }
    }

    /// Scripted backend: answers each call in order, optionally after a
    /// virtual delay, and counts how often it was hit.
    #[derive(Debug)]
    struct StubBackend {
        script: Mutex<Vec<(u64, Result<Forecast, PredictError>)>>,
        calls: AtomicUsize,
    }

    impl StubBackend {
        fn new(script: Vec<(u64, Result<Forecast, PredictError>)>) -> Self {
            Self { script: Mutex::new(script), calls: AtomicUsize::new(0) }
        }

        fn single(reply: Result<Forecast, PredictError>) -> Self {
            Self::new(vec![(0, reply)])
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PredictBackend for StubBackend {
        async fn predict(&self, _query: &Query) -> Result<Forecast, PredictError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let (delay_ms, reply) = self.script.lock().expect("script lock").remove(0);
            if delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            reply
        }
    }

    fn paris_forecast() -> Forecast {
        Forecast {
            location: "Paris".to_string(),
            date: "2024-05-01".to_string(),
            temperature: 28.0,
            forecast: vec![
                ForecastDay { date: "2024-05-02".to_string(), temp: 33.0 },
                ForecastDay { date: "2024-05-03".to_string(), temp: 26.0 },
                ForecastDay { date: "2024-05-04".to_string(), temp: 22.0 },
                ForecastDay { date: "2024-05-05".to_string(), temp: 18.0 },
                ForecastDay { date: "2024-05-06".to_string(), temp: 15.0 },
                ForecastDay { date: "2024-05-07".to_string(), temp: 12.0 },
                ForecastDay { date: "2024-05-08".to_string(), temp: 21.0 },
            ],
            recommendation: "Stay hydrated".to_string(),
        }
    }

    fn ui_with(
        backend: Arc<StubBackend>,
        view: Arc<RecordingView>,
    ) -> PredictionUi {
        PredictionUi::new(backend, view)
    }

    #[tokio::test]
    async fn empty_input_shows_validation_and_skips_backend() {
        let backend = Arc::new(StubBackend::single(Ok(paris_forecast())));
        let view = Arc::new(RecordingView::default());
        let ui = ui_with(backend.clone(), view.clone());

        for (location, date) in [("", "2024-05-01"), ("Paris", "   "), (" \t ", "")] {
            let result = ui.submit(location, date).await;
            assert!(matches!(result, Err(PredictError::Validation)));
        }

        assert_eq!(backend.calls(), 0);
        assert_eq!(
            view.events(),
            vec![
                Event::Validation("Please enter both location and date.".to_string()),
                Event::Validation("Please enter both location and date.".to_string()),
                Event::Validation("Please enter both location and date.".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn success_renders_headline_location_days_recommendation_in_order() {
        let backend = Arc::new(StubBackend::single(Ok(paris_forecast())));
        let view = Arc::new(RecordingView::default());
        let ui = ui_with(backend.clone(), view.clone());

        // Typed input differs from the echo; the echo must win.
        ui.submit(" paris ", "2024-05-01").await.expect("submit succeeds");

        assert_eq!(backend.calls(), 1);

        let events = view.events();
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], Event::Progress);
        assert_eq!(
            events[1],
            Event::Headline("Paris".to_string(), "2024-05-01".to_string(), 28.0)
        );
        assert_eq!(events[2], Event::Location("Paris".to_string()));

        let Event::Days(days) = &events[3] else {
            panic!("expected forecast strip, got {:?}", events[3]);
        };
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].icon, Icon::Clear);
        assert_eq!(days[1].icon, Icon::Drizzle);
        assert_eq!(days[2].icon, Icon::Mist);
        assert_eq!(days[3].icon, Icon::Rain);
        assert_eq!(days[4].icon, Icon::Cloudy);
        assert_eq!(days[0].date, "2024-05-02");

        assert_eq!(events[4], Event::Recommendation("Stay hydrated".to_string()));
    }

    #[tokio::test]
    async fn backend_error_is_shown_verbatim_and_renders_nothing_else() {
        let backend = Arc::new(StubBackend::single(Err(PredictError::Backend(
            "No data found for atlantis.".to_string(),
        ))));
        let view = Arc::new(RecordingView::default());
        let ui = ui_with(backend, view.clone());

        let err = ui.submit("atlantis", "2024-05-01").await.unwrap_err();
        assert!(matches!(err, PredictError::Backend(_)));

        assert_eq!(
            view.events(),
            vec![
                Event::Progress,
                Event::Error("No data found for atlantis.".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn transport_failure_shows_generic_message() {
        let backend = Arc::new(StubBackend::single(Err(PredictError::Transport(
            "connection refused".to_string(),
        ))));
        let view = Arc::new(RecordingView::default());
        let ui = ui_with(backend, view.clone());

        let err = ui.submit("Paris", "2024-05-01").await.unwrap_err();
        assert!(matches!(err, PredictError::Transport(_)));

        assert_eq!(
            view.events(),
            vec![
                Event::Progress,
                Event::Error("Error connecting to server.".to_string()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn overtaken_response_is_dropped() {
        let mut stale = paris_forecast();
        stale.location = "Stale".to_string();

        // First trigger answers late, second answers immediately.
        let backend = Arc::new(StubBackend::new(vec![
            (100, Ok(stale)),
            (0, Ok(paris_forecast())),
        ]));
        let view = Arc::new(RecordingView::default());
        let ui = ui_with(backend.clone(), view.clone());

        let (overtaken, latest) =
            tokio::join!(ui.submit("Paris", "2024-05-01"), ui.submit("Paris", "2024-05-01"));

        // Dropping a stale response is not a failure.
        assert!(overtaken.is_ok());
        assert!(latest.is_ok());
        assert_eq!(backend.calls(), 2);

        let headlines: Vec<_> = view
            .events()
            .into_iter()
            .filter(|e| matches!(e, Event::Headline(..)))
            .collect();
        assert_eq!(
            headlines,
            vec![Event::Headline("Paris".to_string(), "2024-05-01".to_string(), 28.0)]
        );
    }
}
