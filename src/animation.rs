//! # Slide Animations
//!
//! A deliberately small animation engine: a [`Slide`] interpolates one
//! horizontal coordinate from a start to an end position over a fixed
//! duration, shaped by a [`Curve`]. Time is pushed in from outside with
//! [`Slide::advance`], so the same animation runs identically under the real
//! frame timer and in tests.
//!
//! Interpolated positions are rounded to whole pixels and are only meant for
//! drawing. Whoever owns the slide reads the exact end coordinate from
//! [`Slide::to_x`] once it has finished.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Interpolation curve applied to linear progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    Linear,
    EaseIn,
    /// Decelerates toward the end of the slide
    #[default]
    EaseOut,
    EaseInOut,
}

impl Curve {
    /// Map linear progress `t` in 0..=1 to eased progress in 0..=1.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => t,
            Curve::EaseIn => t * t,
            Curve::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Curve::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

/// Horizontal slide of one layer.
#[derive(Clone, Debug)]
pub struct Slide {
    from_x: i32,
    to_x: i32,
    duration: Duration,
    elapsed: Duration,
    curve: Curve,
}

impl Slide {
    pub fn new(from_x: i32, to_x: i32, duration: Duration, curve: Curve) -> Self {
        Self {
            from_x,
            to_x,
            duration,
            elapsed: Duration::ZERO,
            curve,
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// Jump straight to the end position.
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear progress in 0..=1.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
    }

    /// Current coordinate, rounded to a pixel.
    pub fn x(&self) -> i32 {
        if self.is_finished() {
            return self.to_x;
        }
        let eased = self.curve.apply(self.progress());
        let span = (self.to_x - self.from_x) as f32;
        self.from_x + (span * eased).round() as i32
    }

    pub fn to_x(&self) -> i32 {
        self.to_x
    }
}
