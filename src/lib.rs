//! # Text Watch Core Library
//!
//! This library provides the building blocks of a word-clock watch face: the
//! current time is shown as three lines of words ("ten twenty five"), with a
//! weekday and a date underneath. Whenever a line's words change, the old text
//! slides out to the left while the new text slides in from the right.
//!
//! ## Design Philosophy
//!
//! ### Double-Buffered Lines
//! Every text line owns two fixed-capacity slots. One slot is on screen at the
//! home position, the other waits off screen at the parked position holding the
//! previous text. A change writes the hidden slot and swaps the two with a
//! paired slide animation.
//!
//! ### Explicit State
//! - **Visible slot**: tracked by an enum, never inferred from coordinates
//! - **Owned lines**: each [`face::WatchFace`] owns its lines, so several faces
//!   (or tests) can run side by side
//! - **Bounded text**: slots hold at most [`text_buffer::LINE_CAPACITY`] bytes and
//!   truncate deterministically
//!
//! ### Data Flow
//! 1. **Tick**: once per minute a [`clock::TickEvent`] arrives
//! 2. **Words**: [`words::time_to_3words`] turns hour/minute into three strings
//! 3. **Rotate**: each [`line::Line`] diffs its text and starts a slide on change
//! 4. **Render**: [`renderer`] draws the animated positions into a frame buffer
//!
//! ## Core Types
//!
//! - [`TimeOfDay`]: a validated hour/minute pair
//! - [`WatchError`]: every failure the face can report

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Module declarations
pub mod animation;
pub mod clock;
pub mod config;
pub mod date;
pub mod face;
pub mod framebuffer;
pub mod line;
pub mod renderer;
pub mod text_buffer;
pub mod words;

/// Errors reported by the watch face.
///
/// Formatting problems are normally absorbed by truncation; the variants exist
/// so callers that want strict behavior can ask for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatchError {
    /// Hour or minute outside 0..=23 / 0..=59
    #[error("invalid time {hour}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },

    /// Text longer than a line slot can hold
    #[error("formatted text is {len} bytes, slot holds {capacity}")]
    FormatOverflow { len: usize, capacity: usize },

    /// Configuration file could not be read or parsed
    #[error("config: {0}")]
    Config(String),

    /// Display surface could not be created or drawn
    #[error("display: {0}")]
    Display(String),

    /// Unrecognized debug button command
    #[error("unknown command {0:?}")]
    Command(String),
}

/// A wall-clock time with minute resolution.
///
/// Both fields are range checked on construction, so every `TimeOfDay` in
/// circulation is valid.
///
/// # Example
/// ```
/// use text_watch_lib::TimeOfDay;
///
/// let t = TimeOfDay::new(10, 15).unwrap();
/// assert_eq!(t.hour(), 10);
/// assert!(TimeOfDay::new(24, 0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Midnight, 00:00.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    pub fn new(hour: u32, minute: u32) -> Result<Self, WatchError> {
        if hour > 23 || minute > 59 {
            return Err(WatchError::InvalidTime { hour, minute });
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Take hour and minute from any chrono time value.
    pub fn from_chrono<T: chrono::Timelike>(time: &T) -> Self {
        // chrono guarantees hour < 24 and minute < 60
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    /// One minute later, wrapping 23:59 to 00:00.
    pub fn next_minute(self) -> Self {
        let total = (self.minutes_since_midnight() + 1) % (24 * 60);
        Self::from_minutes(total)
    }

    /// One minute earlier, wrapping 00:00 to 23:59.
    pub fn prev_minute(self) -> Self {
        let total = (self.minutes_since_midnight() + 24 * 60 - 1) % (24 * 60);
        Self::from_minutes(total)
    }

    fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    fn from_minutes(total: u32) -> Self {
        Self {
            hour: (total / 60) as u8,
            minute: (total % 60) as u8,
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
