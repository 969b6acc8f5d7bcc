//! The scene presenter: one user-triggered search fans out into the four
//! presentation updates (time label, sun, particles, audio).

use std::fmt;

use log::{info, warn};

use crate::clock::{LocalTimes, TIME_PLACEHOLDER, format_hhmm};
use crate::config::SceneTuning;
use crate::model::{Precipitation, WeatherReport};
use crate::provider::WeatherProvider;
use crate::scene::audio::{AudioMixer, AudioSink, select_track};
use crate::scene::particles::{ParticleSink, update_particles};
use crate::scene::sun::{SunSink, SunState};

/// User-visible status line messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    EnterCity,
    Fetching(String),
    CityNotFound,
    Showing(String),
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::EnterCity => f.write_str("Please enter a city name."),
            StatusMessage::Fetching(city) => write!(f, "Fetching weather for {city}..."),
            StatusMessage::CityNotFound => f.write_str("City not found. Please try again."),
            StatusMessage::Showing(city) => write!(f, "Displaying weather for: {city}"),
        }
    }
}

/// Host service for the status line and the time label.
pub trait StatusSink {
    fn status(&mut self, message: StatusMessage);
    fn time(&mut self, text: &str);
}

/// Everything the presenter needs from its host scene, in one bound.
pub trait SceneHost: StatusSink + SunSink + ParticleSink + AudioSink {}

impl<T: StatusSink + SunSink + ParticleSink + AudioSink> SceneHost for T {}

/// Owns the current weather report and drives the host scene from it.
///
/// One instance per scene; all mutable presentation state lives here, not
/// in globals. Overlapping searches are not guarded against: whichever
/// fetch completes last wins, as there is no cancellation or de-duplication.
#[derive(Debug)]
pub struct ScenePresenter<H: SceneHost> {
    provider: Box<dyn WeatherProvider>,
    tuning: SceneTuning,
    host: H,
    mixer: AudioMixer,
    current: Option<WeatherReport>,
}

impl<H: SceneHost> ScenePresenter<H> {
    /// Build the presenter and put the host scene into its quiet initial
    /// state: no particles, all audio stopped and silent, empty time label.
    pub fn new(provider: Box<dyn WeatherProvider>, tuning: SceneTuning, mut host: H) -> Self {
        let mut mixer = AudioMixer::new(&tuning);
        update_particles(&mut host, Precipitation::None);
        mixer.stop_all(&mut host);
        host.time("");

        Self {
            provider,
            tuning,
            host,
            mixer,
            current: None,
        }
    }

    /// Fetch weather for `city` and update the whole scene from the result.
    ///
    /// Empty or whitespace-only input short-circuits to a validation
    /// message without touching the network. Any fetch error shows the
    /// fixed not-found message and clears the time label; the rest of the
    /// scene keeps presenting the previous report.
    pub async fn search(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            self.host.status(StatusMessage::EnterCity);
            return;
        }

        self.host.status(StatusMessage::Fetching(city.to_string()));
        self.host.time(TIME_PLACEHOLDER);

        match self.provider.current_weather(city).await {
            Err(err) => {
                warn!("weather fetch for {city:?} failed: {err}");
                self.host.status(StatusMessage::CityNotFound);
                self.host.time("");
            }
            Ok(report) => {
                info!(
                    "weather for {}: {} at {:.1} C",
                    report.city, report.condition_label, report.temperature_c
                );
                self.host.status(StatusMessage::Showing(report.city.clone()));
                self.current = Some(report);
                self.refresh_scene();
            }
        }
    }

    /// Re-run the four presentation updates from the current report, in
    /// order: time label, sun, particles, audio.
    fn refresh_scene(&mut self) {
        let Some(report) = self.current.as_ref() else {
            return;
        };
        let times = LocalTimes::from_report(report);
        let precipitation = report.condition.precipitation();

        self.host.time(&format_hhmm(times.local_unix));

        let sun = SunState::at(times.day_percent(), &self.tuning);
        self.host.apply_sun(&sun);

        update_particles(&mut self.host, precipitation);

        let target = select_track(precipitation, times.is_daytime());
        self.mixer.select(&mut self.host, target);
    }

    /// Advance the audio crossfade by one host frame delta.
    pub fn tick(&mut self, dt: f32) {
        self.mixer.tick(&mut self.host, dt);
    }

    pub fn is_fading(&self) -> bool {
        self.mixer.is_fading()
    }

    pub fn current_report(&self) -> Option<&WeatherReport> {
        self.current.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}
