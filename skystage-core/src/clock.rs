//! Local wall-clock derivation for a fetched weather report.
//!
//! The upstream API reports everything in UTC unix seconds plus a signed
//! per-city offset. All interval arithmetic here stays on `i64` seconds;
//! chrono is only involved when a timestamp is rendered as text.

use chrono::DateTime;

use crate::model::WeatherReport;

/// Shown in the time label while a fetch is in flight.
pub const TIME_PLACEHOLDER: &str = "--:--";

/// The observation instant and the sunrise/sunset pair, all shifted into
/// the queried city's local wall clock. Recomputed per update, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTimes {
    pub local_unix: i64,
    pub sunrise_unix: i64,
    pub sunset_unix: i64,
}

impl LocalTimes {
    pub fn from_report(report: &WeatherReport) -> Self {
        let shift = report.timezone_offset_secs;
        Self {
            local_unix: report.observed_unix + shift,
            sunrise_unix: report.sunrise_unix + shift,
            sunset_unix: report.sunset_unix + shift,
        }
    }

    /// Normalized position of local time within the sunrise-sunset interval,
    /// clamped to [0, 1].
    ///
    /// The upstream data is trusted to satisfy `sunrise <= sunset` but that
    /// is not guaranteed; a non-positive day length short-circuits to the
    /// endpoint the clamp would have produced instead of dividing.
    pub fn day_percent(&self) -> f32 {
        let day_length = self.sunset_unix - self.sunrise_unix;
        if day_length <= 0 {
            return if self.local_unix >= self.sunset_unix { 1.0 } else { 0.0 };
        }
        let since_sunrise = self.local_unix - self.sunrise_unix;
        (since_sunrise as f64 / day_length as f64).clamp(0.0, 1.0) as f32
    }

    /// Strictly between local sunrise and sunset; both boundary instants
    /// count as night.
    pub fn is_daytime(&self) -> bool {
        self.sunrise_unix < self.local_unix && self.local_unix < self.sunset_unix
    }
}

/// Render a local unix timestamp as zero-padded 24-hour `HH:mm`.
///
/// Timestamps chrono cannot represent render as the placeholder.
pub fn format_hhmm(local_unix: i64) -> String {
    DateTime::from_timestamp(local_unix, 0)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| TIME_PLACEHOLDER.to_string())
}
