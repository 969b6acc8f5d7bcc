//! Ambient audio track selection and gain crossfading.
//!
//! The mixer owns which of the four tracks has audible focus and the state
//! of the one in-flight crossfade. The host frame loop calls [`AudioMixer::tick`]
//! with its frame delta; there is no internal timer.

use log::debug;

use crate::config::SceneTuning;
use crate::model::Precipitation;
use crate::scene::lerp;

/// The four ambient audio channels the host exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Day,
    Night,
    Rain,
    Snow,
}

impl Track {
    pub const ALL: [Track; 4] = [Track::Day, Track::Night, Track::Rain, Track::Snow];

    pub fn name(self) -> &'static str {
        match self {
            Track::Day => "day",
            Track::Night => "night",
            Track::Rain => "rain",
            Track::Snow => "snow",
        }
    }
}

/// Host service for audio playback: start/stop a channel and write its gain.
pub trait AudioSink {
    fn play(&mut self, track: Track);
    fn stop(&mut self, track: Track);
    fn set_gain(&mut self, track: Track, gain: f32);
}

/// Pick the track that should have audible focus.
///
/// Precipitation wins over time of day; otherwise strict daylight selects
/// the day track and everything else (boundaries included) the night track.
pub fn select_track(precipitation: Precipitation, daytime: bool) -> Track {
    match precipitation {
        Precipitation::Rain => Track::Rain,
        Precipitation::Snow => Track::Snow,
        Precipitation::None => {
            if daytime {
                Track::Day
            } else {
                Track::Night
            }
        }
    }
}

/// One in-flight linear crossfade between two (possibly absent) tracks.
#[derive(Debug, Clone, Copy)]
struct Crossfade {
    from: Option<Track>,
    to: Option<Track>,
    elapsed: f32,
    duration: f32,
}

/// Tracks audible focus and advances at most one crossfade at a time.
#[derive(Debug)]
pub struct AudioMixer {
    ceiling: f32,
    fade_duration: f32,
    current: Option<Track>,
    fade: Option<Crossfade>,
}

impl AudioMixer {
    pub fn new(tuning: &SceneTuning) -> Self {
        Self {
            ceiling: tuning.audio_gain_ceiling,
            fade_duration: tuning.crossfade_secs,
            current: None,
            fade: None,
        }
    }

    /// The track currently holding audible focus (set at fade start, not
    /// fade completion).
    pub fn current(&self) -> Option<Track> {
        self.current
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Stop all channels and zero their gains. Run once at scene setup.
    pub fn stop_all(&mut self, sink: &mut dyn AudioSink) {
        for track in Track::ALL {
            sink.stop(track);
            sink.set_gain(track, 0.0);
        }
        self.current = None;
        self.fade = None;
    }

    /// Give audible focus to `target`, crossfading from the current track.
    ///
    /// A no-op when `target` already has focus. A running fade is replaced
    /// immediately: its outgoing track is left playing at whatever gain the
    /// last tick wrote, and is never stopped.
    pub fn select(&mut self, sink: &mut dyn AudioSink, target: Track) {
        if self.current == Some(target) {
            return;
        }
        if let Some(dropped) = self.fade.take() {
            debug!(
                "crossfade to {:?} preempted by {}",
                dropped.to.map(Track::name),
                target.name()
            );
        }
        let from = self.current;
        self.current = Some(target);

        // Incoming track starts silent and playing at the moment the fade begins.
        sink.set_gain(target, 0.0);
        sink.play(target);

        debug!("crossfade {:?} -> {}", from.map(Track::name), target.name());
        self.fade = Some(Crossfade {
            from,
            to: Some(target),
            elapsed: 0.0,
            duration: self.fade_duration,
        });
    }

    /// Advance the running crossfade by one frame delta.
    ///
    /// Progress is `elapsed / duration` computed after accumulation and is
    /// deliberately not clamped, so the final tick may write a gain slightly
    /// past the target; completion then stops the outgoing track and pins
    /// the incoming gain to exactly the ceiling.
    pub fn tick(&mut self, sink: &mut dyn AudioSink, dt: f32) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };

        fade.elapsed += dt;
        if fade.duration > 0.0 {
            let progress = fade.elapsed / fade.duration;
            if let Some(from) = fade.from {
                sink.set_gain(from, lerp(self.ceiling, 0.0, progress));
            }
            if let Some(to) = fade.to {
                sink.set_gain(to, lerp(0.0, self.ceiling, progress));
            }
        }

        if fade.elapsed >= fade.duration {
            if let Some(from) = fade.from {
                sink.stop(from);
            }
            if let Some(to) = fade.to {
                sink.set_gain(to, self.ceiling);
            }
            debug!("crossfade to {:?} complete", fade.to.map(Track::name));
            self.fade = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    const CEILING: f32 = 0.2;

    fn mixer() -> AudioMixer {
        AudioMixer::new(&SceneTuning::default())
    }

    #[derive(Debug, Default)]
    struct RecordingSink {
        gains: HashMap<Track, f32>,
        playing: HashSet<Track>,
        stops: Vec<Track>,
    }

    impl RecordingSink {
        fn gain(&self, track: Track) -> f32 {
            self.gains.get(&track).copied().unwrap_or(0.0)
        }
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, track: Track) {
            self.playing.insert(track);
        }

        fn stop(&mut self, track: Track) {
            self.playing.remove(&track);
            self.stops.push(track);
        }

        fn set_gain(&mut self, track: Track, gain: f32) {
            self.gains.insert(track, gain);
        }
    }

    #[test]
    fn precipitation_outranks_time_of_day() {
        assert_eq!(select_track(Precipitation::Rain, true), Track::Rain);
        assert_eq!(select_track(Precipitation::Rain, false), Track::Rain);
        assert_eq!(select_track(Precipitation::Snow, true), Track::Snow);
        assert_eq!(select_track(Precipitation::None, true), Track::Day);
        assert_eq!(select_track(Precipitation::None, false), Track::Night);
    }

    #[test]
    fn stop_all_silences_every_channel() {
        let mut mixer = mixer();
        let mut sink = RecordingSink::default();
        mixer.stop_all(&mut sink);
        for track in Track::ALL {
            assert!(!sink.playing.contains(&track));
            assert_eq!(sink.gain(track), 0.0);
        }
        assert_eq!(mixer.current(), None);
    }

    #[test]
    fn first_selection_fades_in_from_silence() {
        let mut mixer = mixer();
        let mut sink = RecordingSink::default();

        mixer.select(&mut sink, Track::Day);
        assert_eq!(mixer.current(), Some(Track::Day));
        assert!(sink.playing.contains(&Track::Day));
        assert_eq!(sink.gain(Track::Day), 0.0);

        mixer.tick(&mut sink, 0.5);
        assert!((sink.gain(Track::Day) - CEILING * 0.25).abs() < 1e-6);

        mixer.tick(&mut sink, 1.5);
        assert!(!mixer.is_fading());
        assert_eq!(sink.gain(Track::Day), CEILING);
        // No outgoing side existed, so nothing was stopped.
        assert!(sink.stops.is_empty());
    }

    #[test]
    fn crossfade_swaps_gains_linearly() {
        let mut mixer = mixer();
        let mut sink = RecordingSink::default();

        mixer.select(&mut sink, Track::Day);
        mixer.tick(&mut sink, 2.0);

        mixer.select(&mut sink, Track::Rain);
        assert!(sink.playing.contains(&Track::Day));
        assert!(sink.playing.contains(&Track::Rain));
        assert_eq!(sink.gain(Track::Rain), 0.0);

        mixer.tick(&mut sink, 1.0);
        assert!((sink.gain(Track::Day) - CEILING * 0.5).abs() < 1e-6);
        assert!((sink.gain(Track::Rain) - CEILING * 0.5).abs() < 1e-6);

        mixer.tick(&mut sink, 1.0);
        assert!(!mixer.is_fading());
        assert!(!sink.playing.contains(&Track::Day));
        assert_eq!(sink.stops, vec![Track::Day]);
        assert_eq!(sink.gain(Track::Rain), CEILING);
    }

    #[test]
    fn final_tick_overshoot_is_pinned_to_ceiling() {
        let mut mixer = mixer();
        let mut sink = RecordingSink::default();

        mixer.select(&mut sink, Track::Night);
        mixer.tick(&mut sink, 1.9);
        // 1.9 + 0.3 = 2.2s elapsed over a 2s fade: progress overshoots 1.0,
        // then completion pins the gain to the exact ceiling.
        mixer.tick(&mut sink, 0.3);
        assert!(!mixer.is_fading());
        assert_eq!(sink.gain(Track::Night), CEILING);
    }

    #[test]
    fn reselecting_the_current_track_does_nothing() {
        let mut mixer = mixer();
        let mut sink = RecordingSink::default();

        mixer.select(&mut sink, Track::Day);
        mixer.tick(&mut sink, 2.0);
        let gains_before = sink.gains.clone();

        mixer.select(&mut sink, Track::Day);
        assert!(!mixer.is_fading());
        assert_eq!(sink.gains, gains_before);
    }

    #[test]
    fn preempted_fade_abandons_the_outgoing_gain() {
        let mut mixer = mixer();
        let mut sink = RecordingSink::default();

        mixer.select(&mut sink, Track::Day);
        mixer.tick(&mut sink, 2.0);

        // Fade day -> rain, interrupted halfway.
        mixer.select(&mut sink, Track::Rain);
        mixer.tick(&mut sink, 1.0);
        let abandoned_gain = sink.gain(Track::Day);
        assert!(abandoned_gain > 0.0 && abandoned_gain < CEILING);

        mixer.select(&mut sink, Track::Snow);
        mixer.tick(&mut sink, 2.0);

        // Day was never the outgoing side of the new fade: it keeps playing
        // at its mid-fade gain. Rain lost focus and was stopped.
        assert!(sink.playing.contains(&Track::Day));
        assert_eq!(sink.gain(Track::Day), abandoned_gain);
        assert!(!sink.playing.contains(&Track::Rain));
        assert_eq!(sink.gain(Track::Snow), CEILING);
    }

    #[test]
    fn zero_duration_fade_completes_on_first_tick() {
        let tuning = SceneTuning { crossfade_secs: 0.0, ..SceneTuning::default() };
        let mut mixer = AudioMixer::new(&tuning);
        let mut sink = RecordingSink::default();

        mixer.select(&mut sink, Track::Day);
        mixer.tick(&mut sink, 0.016);
        assert!(!mixer.is_fading());
        assert_eq!(sink.gain(Track::Day), tuning.audio_gain_ceiling);
    }

    #[test]
    fn tick_without_fade_is_a_no_op() {
        let mut mixer = mixer();
        let mut sink = RecordingSink::default();
        mixer.tick(&mut sink, 1.0);
        assert!(sink.gains.is_empty());
        assert!(sink.stops.is_empty());
    }
}
