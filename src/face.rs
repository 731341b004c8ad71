//! # Watch Face
//!
//! Ties the pieces together: three rotating [`Line`]s for the time, plus the
//! static date and weekday strings.
//!
//! The face never reads the clock itself. Time arrives through
//! [`WatchFace::display_initial_time`] at startup, [`WatchFace::handle_tick`]
//! once a minute, and [`WatchFace::press`] in debug mode. Animation time
//! arrives through [`WatchFace::advance`].

use crate::clock::{Button, TickEvent};
use crate::config::Config;
use crate::date::{DateLines, OrdinalKey};
use crate::line::{Line, LineUpdate};
use crate::words::{words_for, WordStyle};
use crate::TimeOfDay;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Number of rotating time lines.
pub const LINE_COUNT: usize = 3;

/// Serializable view of what the face currently shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FaceSnapshot {
    pub time: String,
    pub lines: [String; LINE_COUNT],
    pub date: String,
    pub day: String,
    pub animating: bool,
}

#[derive(Debug)]
pub struct WatchFace {
    lines: [Line; LINE_COUNT],
    date: DateLines,
    time: TimeOfDay,
    style: WordStyle,
    ordinal_key: OrdinalKey,
}

impl WatchFace {
    pub fn new(config: &Config) -> Self {
        let policy = config.line_policy();
        Self {
            lines: [
                Line::new(policy.clone()),
                Line::new(policy.clone()),
                Line::new(policy),
            ],
            date: DateLines {
                date: String::new(),
                day: String::new(),
            },
            time: TimeOfDay::MIDNIGHT,
            style: config.face.word_style,
            ordinal_key: config.face.ordinal_key,
        }
    }

    /// Show `at` without any slide, and fill in the date.
    pub fn display_initial_time(&mut self, at: &NaiveDateTime) {
        self.time = TimeOfDay::from_chrono(at);
        let words = words_for(self.time, self.style);
        for (line, text) in self.lines.iter_mut().zip(words.iter()) {
            line.show_immediately(text);
        }
        self.set_date(at);
    }

    /// Move the face to `time`, sliding every line whose words changed.
    pub fn display_time(&mut self, time: TimeOfDay) -> [LineUpdate; LINE_COUNT] {
        self.time = time;
        let words = words_for(time, self.style);
        let mut updates = [LineUpdate::Unchanged; LINE_COUNT];
        for (i, (line, text)) in self.lines.iter_mut().zip(words.iter()).enumerate() {
            updates[i] = line.update_to(text);
        }
        debug!("{} -> {:?}", time, updates);
        updates
    }

    /// Minute tick: update the time lines, and the date on a new day.
    pub fn handle_tick(&mut self, tick: &TickEvent) -> [LineUpdate; LINE_COUNT] {
        let updates = self.display_time(tick.time_of_day());
        if tick.day_changed {
            self.set_date(&tick.time);
        }
        updates
    }

    /// Debug button press: step the shown time by one minute.
    pub fn press(&mut self, button: Button) -> [LineUpdate; LINE_COUNT] {
        let time = button.step(self.time);
        self.display_time(time)
    }

    /// Rewrite date and weekday, unconditionally.
    pub fn set_date(&mut self, at: &NaiveDateTime) {
        self.date = DateLines::for_time(at, self.ordinal_key);
    }

    /// Step all running slides. Returns whether any line is still animating.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let mut animating = false;
        for line in self.lines.iter_mut() {
            animating |= line.advance(dt);
        }
        animating
    }

    pub fn is_animating(&self) -> bool {
        self.lines.iter().any(Line::is_animating)
    }

    pub fn lines(&self) -> &[Line; LINE_COUNT] {
        &self.lines
    }

    pub fn date_lines(&self) -> &DateLines {
        &self.date
    }

    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    pub fn snapshot(&self) -> FaceSnapshot {
        FaceSnapshot {
            time: self.time.to_string(),
            lines: [
                self.lines[0].visible_text().to_string(),
                self.lines[1].visible_text().to_string(),
                self.lines[2].visible_text().to_string(),
            ],
            date: self.date.date.clone(),
            day: self.date.day.clone(),
            animating: self.is_animating(),
        }
    }
}
