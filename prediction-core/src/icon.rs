use serde::{Deserialize, Serialize};

/// Weather icon for a forecast day, selected from the day's temperature.
///
/// Icons are referenced by name only; resolving a name to an asset is the
/// rendering layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Clear,
    Drizzle,
    Mist,
    Rain,
    Cloudy,
}

impl Icon {
    /// Select the icon for a forecast-day temperature in °C.
    ///
    /// Total over all temperatures, first match wins:
    /// above 32 clear, above 25 drizzle, above 20 mist, above 15 rain,
    /// everything else cloudy.
    #[must_use]
    pub fn for_temp(temp: f64) -> Self {
        if temp > 32.0 {
            Self::Clear
        } else if temp > 25.0 {
            Self::Drizzle
        } else if temp > 20.0 {
            Self::Mist
        } else if temp > 15.0 {
            Self::Rain
        } else {
            Self::Cloudy
        }
    }

    /// Asset name the UI layer resolves to an image.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Drizzle => "drizzle",
            Self::Mist => "mist",
            Self::Rain => "rain",
            Self::Cloudy => "cloudy",
        }
    }

    /// Emoji stand-in for terminal output.
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::Drizzle => "🌦️",
            Self::Mist => "🌫️",
            Self::Rain => "🌧️",
            Self::Cloudy => "☁️",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
