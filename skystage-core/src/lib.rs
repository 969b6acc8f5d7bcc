//! Core library for the `skystage` scene controller.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over the weather provider
//! - The domain model and local-time derivation
//! - The scene presenter: sun state, particle effects, audio crossfade
//!
//! It is used by `skystage-cli`, but can also be reused by other hosts that
//! supply their own rendering and audio sinks.

pub mod clock;
pub mod config;
pub mod model;
pub mod presenter;
pub mod provider;
pub mod scene;

pub use clock::{LocalTimes, TIME_PLACEHOLDER, format_hhmm};
pub use config::{Config, SceneTuning};
pub use model::{Condition, Precipitation, WeatherReport};
pub use presenter::{SceneHost, ScenePresenter, StatusMessage, StatusSink};
pub use provider::{ProviderError, WeatherProvider, provider_from_config};
pub use scene::audio::{AudioMixer, AudioSink, Track};
pub use scene::particles::{ParticleEffect, ParticleSink};
pub use scene::sun::{Gradient, Rgb, SunSink, SunState};
