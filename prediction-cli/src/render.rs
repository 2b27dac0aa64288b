use prediction_core::{DayBox, PredictionView};

/// Renders prediction output to stdout, one line per display element.
pub struct TerminalView;

impl PredictionView for TerminalView {
    fn validation_error(&self, message: &str) {
        println!("⚠️ {message}");
    }

    fn progress(&self) {
        println!("⏳ Predicting...");
    }

    fn headline(&self, location: &str, date: &str, temperature: f64) {
        println!("{}", headline_line(location, date, temperature));
    }

    fn forecast_location(&self, location: &str) {
        println!("📍 Forecast for {location}");
    }

    fn forecast_days(&self, days: &[DayBox]) {
        for day in days {
            println!("  {}", day_line(day));
        }
    }

    fn recommendation(&self, text: &str) {
        println!("💡 {text}");
    }

    fn error(&self, message: &str) {
        println!("❌ {message}");
    }
}

fn headline_line(location: &str, date: &str, temperature: f64) -> String {
    format!("🌤️ Temperature for {location} on {date}: {temperature}°C")
}

fn day_line(day: &DayBox) -> String {
    format!("{}  {} {}  {}°C", day.date, day.icon.emoji(), day.icon, day.temp)
}
