//! # Time Input
//!
//! Everything that feeds the face with time:
//! - [`TickSource`] turns wall-clock readings into minute [`TickEvent`]s and
//!   flags the first tick of each new day
//! - [`Button`] and [`ButtonRepeat`] drive the debug mode, where the minute is
//!   stepped by hand instead of waiting for the clock
//! - [`DebugCommand`] parses the stdin form of those button presses

use crate::{TimeOfDay, WatchError};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::str::FromStr;
use std::time::Duration;

/// One minute tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickEvent {
    pub time: NaiveDateTime,
    /// True on the first tick and whenever the calendar date moved
    pub day_changed: bool,
}

impl TickEvent {
    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_chrono(&self.time)
    }
}

/// Tracks the last seen date to flag day changes.
#[derive(Debug, Default)]
pub struct TickSource {
    last_date: Option<NaiveDate>,
}

impl TickSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now: NaiveDateTime) -> TickEvent {
        let date = now.date();
        let day_changed = self.last_date != Some(date);
        self.last_date = Some(date);
        TickEvent {
            time: now,
            day_changed,
        }
    }
}

/// Time left until the next whole minute.
pub fn until_next_minute(now: &NaiveDateTime) -> Duration {
    let into_minute = Duration::new(now.second() as u64, now.nanosecond() % 1_000_000_000);
    Duration::from_secs(60).saturating_sub(into_minute)
}

/// Debug buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Up,
    Down,
}

impl Button {
    /// Apply one press: up adds a minute, down removes one, wrapping the day.
    pub fn step(self, time: TimeOfDay) -> TimeOfDay {
        match self {
            Button::Up => time.next_minute(),
            Button::Down => time.prev_minute(),
        }
    }
}

/// Auto-repeat of a held button.
#[derive(Clone, Copy, Debug)]
pub struct ButtonRepeat {
    interval: Duration,
}

impl ButtonRepeat {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Presses fired for a hold of `held`: one on press, then one per interval.
    pub fn presses_for_hold(&self, held: Duration) -> u32 {
        if self.interval.is_zero() {
            return 1;
        }
        let repeats = held.as_nanos() / self.interval.as_nanos();
        u32::try_from(repeats).unwrap_or(u32::MAX).saturating_add(1)
    }

    /// Offsets from the press at which each step fires.
    pub fn schedule(&self, held: Duration) -> impl Iterator<Item = Duration> {
        let interval = self.interval;
        (0..self.presses_for_hold(held)).map(move |i| interval * i)
    }
}

/// A button press typed on stdin: `up`, `down 1500`, `u`, `-`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebugCommand {
    pub button: Button,
    pub held: Duration,
}

impl FromStr for DebugCommand {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let button = match parts.next() {
            Some("up" | "u" | "+") => Button::Up,
            Some("down" | "d" | "-") => Button::Down,
            _ => return Err(WatchError::Command(s.trim().to_string())),
        };
        let held = match parts.next() {
            Some(ms) => ms
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| WatchError::Command(s.trim().to_string()))?,
            None => Duration::ZERO,
        };
        if parts.next().is_some() {
            return Err(WatchError::Command(s.trim().to_string()));
        }
        Ok(Self { button, held })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, d)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_first_tick_changes_day() {
        let mut source = TickSource::new();
        assert!(source.tick(at(16, 9, 0, 0)).day_changed);
        assert!(!source.tick(at(16, 9, 1, 0)).day_changed);
        assert!(source.tick(at(17, 0, 0, 0)).day_changed);
    }

    #[test]
    fn test_until_next_minute() {
        assert_eq!(until_next_minute(&at(16, 9, 0, 0)), Duration::from_secs(60));
        assert_eq!(until_next_minute(&at(16, 9, 0, 45)), Duration::from_secs(15));
    }

    #[test]
    fn test_buttons_roll_over() {
        let t = TimeOfDay::new(10, 59).unwrap();
        assert_eq!(Button::Up.step(t), TimeOfDay::new(11, 0).unwrap());

        let t = TimeOfDay::new(23, 59).unwrap();
        assert_eq!(Button::Up.step(t), TimeOfDay::MIDNIGHT);

        let t = TimeOfDay::new(10, 0).unwrap();
        assert_eq!(Button::Down.step(t), TimeOfDay::new(9, 59).unwrap());

        assert_eq!(
            Button::Down.step(TimeOfDay::MIDNIGHT),
            TimeOfDay::new(23, 59).unwrap()
        );
    }

    #[test]
    fn test_button_repeat_every_100ms() {
        let repeat = ButtonRepeat::new(Duration::from_millis(100));
        assert_eq!(repeat.presses_for_hold(Duration::ZERO), 1);
        assert_eq!(repeat.presses_for_hold(Duration::from_millis(99)), 1);
        assert_eq!(repeat.presses_for_hold(Duration::from_millis(1000)), 11);

        let offsets: Vec<_> = repeat.schedule(Duration::from_millis(250)).collect();
        assert_eq!(
            offsets,
            vec![
                Duration::ZERO,
                Duration::from_millis(100),
                Duration::from_millis(200)
            ]
        );
    }

    #[test]
    fn test_very_long_hold_saturates() {
        let repeat = ButtonRepeat::new(Duration::from_millis(100));
        let command = "up 429496729500".parse::<DebugCommand>().unwrap();
        assert_eq!(repeat.presses_for_hold(command.held), u32::MAX);
        assert_eq!(
            repeat.presses_for_hold(Duration::from_millis(429_496_729_600)),
            u32::MAX
        );
        assert_eq!(repeat.presses_for_hold(Duration::MAX), u32::MAX);

        // sub-millisecond intervals still count
        let fast = ButtonRepeat::new(Duration::from_micros(500));
        assert_eq!(fast.presses_for_hold(Duration::from_millis(1)), 3);
    }

    #[test]
    fn test_parse_debug_commands() {
        assert_eq!(
            "up".parse::<DebugCommand>().unwrap(),
            DebugCommand {
                button: Button::Up,
                held: Duration::ZERO
            }
        );
        assert_eq!(
            "d 1500".parse::<DebugCommand>().unwrap(),
            DebugCommand {
                button: Button::Down,
                held: Duration::from_millis(1500)
            }
        );
        assert!("sideways".parse::<DebugCommand>().is_err());
        assert!("up soon".parse::<DebugCommand>().is_err());
        assert!("up 10 20".parse::<DebugCommand>().is_err());
    }
}
