//! Terminal-backed scene: renders presenter signals as text.
//!
//! Status lines print as they arrive; sun, particle, and audio signals are
//! retained and shown as one snapshot once the scene has settled. Per-frame
//! gain writes land on the trace level to keep `RUST_LOG=debug` readable.

use std::collections::{HashMap, HashSet};

use chrono::DateTime;
use log::{debug, trace};

use skystage_core::{
    AudioSink, LocalTimes, ParticleEffect, ParticleSink, StatusMessage, StatusSink, SunSink,
    SunState, Track, WeatherReport,
};

#[derive(Debug, Default)]
pub struct TerminalScene {
    time_text: String,
    sun: Option<SunState>,
    active_effect: Option<ParticleEffect>,
    playing: HashSet<Track>,
    gains: HashMap<Track, f32>,
}

impl StatusSink for TerminalScene {
    fn status(&mut self, message: StatusMessage) {
        println!("{message}");
    }

    fn time(&mut self, text: &str) {
        self.time_text = text.to_string();
    }
}

impl SunSink for TerminalScene {
    fn apply_sun(&mut self, state: &SunState) {
        debug!("sun: pitch {:.1} deg", state.pitch_deg);
        self.sun = Some(*state);
    }
}

impl ParticleSink for TerminalScene {
    fn play(&mut self, effect: ParticleEffect) {
        debug!("particles: play {effect:?}");
        self.active_effect = Some(effect);
    }

    fn stop(&mut self, effect: ParticleEffect) {
        if self.active_effect == Some(effect) {
            self.active_effect = None;
        }
    }
}

impl AudioSink for TerminalScene {
    fn play(&mut self, track: Track) {
        debug!("audio: play {}", track.name());
        self.playing.insert(track);
    }

    fn stop(&mut self, track: Track) {
        debug!("audio: stop {}", track.name());
        self.playing.remove(&track);
    }

    fn set_gain(&mut self, track: Track, gain: f32) {
        trace!("audio: {} gain {gain:.3}", track.name());
        self.gains.insert(track, gain);
    }
}

impl TerminalScene {
    /// Print the settled scene for the given report.
    pub fn render_snapshot(&self, report: Option<&WeatherReport>) {
        let Some(report) = report else {
            return;
        };
        let times = LocalTimes::from_report(report);

        println!();
        println!(
            "  {}: {}, {:.1} C",
            report.city, report.condition_label, report.temperature_c
        );

        let observed = DateTime::from_timestamp(report.observed_unix, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("  observed {observed}, local time {}", self.time_text);
        println!(
            "  daylight: {:.0}% through the sunrise-sunset arc",
            times.day_percent() * 100.0
        );

        if let Some(sun) = &self.sun {
            let [r, g, b] = sun.sun_color.to_rgb8();
            let [ar, ag, ab] = sun.ambient_color.to_rgb8();
            println!(
                "  sun: pitch {:.1} deg, yaw {:.1} deg, color #{r:02x}{g:02x}{b:02x}, ambient #{ar:02x}{ag:02x}{ab:02x}",
                sun.pitch_deg, sun.yaw_deg
            );
        }

        match self.active_effect {
            Some(ParticleEffect::Rain) => println!("  effects: rain"),
            Some(ParticleEffect::Snow) => println!("  effects: snow"),
            None => println!("  effects: none"),
        }

        let audible: Vec<String> = Track::ALL
            .into_iter()
            .filter(|track| self.playing.contains(track))
            .map(|track| {
                let gain = self.gains.get(&track).copied().unwrap_or(0.0);
                format!("{} (gain {gain:.2})", track.name())
            })
            .collect();
        if audible.is_empty() {
            println!("  audio: silent");
        } else {
            println!("  audio: {}", audible.join(", "));
        }
    }
}
