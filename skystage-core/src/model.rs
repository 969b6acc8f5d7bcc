use serde::{Deserialize, Serialize};

/// Coarse weather category reported by the upstream API.
///
/// The upstream label set is open-ended; anything outside the known
/// categories maps to [`Condition::Other`], which drives no precipitation
/// effect and leaves audio selection to the day/night fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Other,
}

impl Condition {
    /// Classify an upstream condition label (`weather[0].main`).
    pub fn from_label(label: &str) -> Self {
        match label {
            "Clear" => Condition::Clear,
            "Clouds" => Condition::Clouds,
            "Rain" => Condition::Rain,
            "Drizzle" => Condition::Drizzle,
            "Thunderstorm" => Condition::Thunderstorm,
            "Snow" => Condition::Snow,
            _ => Condition::Other,
        }
    }

    /// Which precipitation family this condition belongs to.
    pub fn precipitation(self) -> Precipitation {
        match self {
            Condition::Rain | Condition::Drizzle | Condition::Thunderstorm => Precipitation::Rain,
            Condition::Snow => Precipitation::Snow,
            Condition::Clear | Condition::Clouds | Condition::Other => Precipitation::None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Condition::Clear => "Clear",
            Condition::Clouds => "Clouds",
            Condition::Rain => "Rain",
            Condition::Drizzle => "Drizzle",
            Condition::Thunderstorm => "Thunderstorm",
            Condition::Snow => "Snow",
            Condition::Other => "Other",
        }
    }
}

/// Precipitation family used by the particle and audio routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precipitation {
    Rain,
    Snow,
    None,
}

/// One fetched weather observation for a city.
///
/// Created fresh per successful fetch; a new report wholly replaces the
/// previous one. Timestamps are unix seconds, UTC; `timezone_offset_secs`
/// is the signed shift to the city's local wall clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub condition: Condition,
    /// Raw upstream label, kept for display ("Mist", "Haze", ...).
    pub condition_label: String,
    pub temperature_c: f64,
    pub observed_unix: i64,
    pub timezone_offset_secs: i64,
    pub sunrise_unix: i64,
    pub sunset_unix: i64,
    pub city: String,
}
