//! Sun orientation and lighting colors for the current day percent.
//!
//! This is a simple arc sweep from sunrise to sunset, not an astronomical
//! model: pitch runs 0..180 degrees across the daylight interval and both
//! light colors are sampled from configured gradients. Values outside the
//! interval clamp to the endpoint colors; there is no night-side wraparound.

use serde::{Deserialize, Serialize};

use crate::config::SceneTuning;
use crate::scene::lerp;

/// Fixed yaw of the sun's arc plane, in degrees.
pub const SUN_YAW_DEG: f32 = -60.0;

/// Linear-space RGB color with components nominally in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb::new(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
        )
    }

    /// 8-bit channels, clamped.
    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

/// One stop of a color-over-time gradient. `at` is a position in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub at: f32,
    pub color: Rgb,
}

/// Piecewise-linear color gradient over [0, 1].
///
/// Stops are expected sorted by `at`; sampling outside the stop range
/// clamps to the endpoint colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    pub fn new(stops: Vec<GradientStop>) -> Self {
        Self { stops }
    }

    pub fn sample(&self, t: f32) -> Rgb {
        let mut previous: Option<&GradientStop> = None;
        for stop in &self.stops {
            if t <= stop.at {
                return match previous {
                    None => stop.color,
                    Some(from) => {
                        let span = stop.at - from.at;
                        if span <= f32::EPSILON {
                            stop.color
                        } else {
                            from.color.lerp(stop.color, (t - from.at) / span)
                        }
                    }
                };
            }
            previous = Some(stop);
        }
        previous.map(|stop| stop.color).unwrap_or(Rgb::BLACK)
    }

    /// Default sun color ramp: warm orange at the horizon, near-white
    /// through midday.
    pub fn sun_default() -> Self {
        Self::new(vec![
            GradientStop { at: 0.0, color: Rgb::new(1.0, 0.6, 0.3) },
            GradientStop { at: 0.25, color: Rgb::new(1.0, 0.95, 0.9) },
            GradientStop { at: 0.75, color: Rgb::new(1.0, 0.95, 0.9) },
            GradientStop { at: 1.0, color: Rgb::new(1.0, 0.6, 0.3) },
        ])
    }

    /// Default ambient ramp: dim blue at the horizon, grey-white at midday.
    pub fn ambient_default() -> Self {
        Self::new(vec![
            GradientStop { at: 0.0, color: Rgb::new(0.4, 0.45, 0.7) },
            GradientStop { at: 0.25, color: Rgb::new(0.9, 0.9, 1.0) },
            GradientStop { at: 0.75, color: Rgb::new(0.9, 0.9, 1.0) },
            GradientStop { at: 1.0, color: Rgb::new(0.4, 0.45, 0.7) },
        ])
    }
}

/// Sun transform plus the two lighting colors the host applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunState {
    pub pitch_deg: f32,
    pub yaw_deg: f32,
    pub roll_deg: f32,
    pub sun_color: Rgb,
    pub ambient_color: Rgb,
}

impl SunState {
    /// Sun state at a given day percent (0 = sunrise, 1 = sunset).
    pub fn at(day_percent: f32, tuning: &SceneTuning) -> Self {
        Self {
            pitch_deg: day_percent * 180.0,
            yaw_deg: SUN_YAW_DEG,
            roll_deg: 0.0,
            sun_color: tuning.sun_gradient.sample(day_percent),
            ambient_color: tuning.ambient_gradient.sample(day_percent),
        }
    }
}

/// Host service that applies sun state to the scene.
pub trait SunSink {
    fn apply_sun(&mut self, state: &SunState);
}
