//! # Time to Words
//!
//! Converts an hour/minute pair into three short lines of English. The face
//! shows one string per line, so each line stays a word or two long.
//!
//! Two styles are available:
//! - [`WordStyle::Digital`]: reads the clock digits aloud, "ten twenty five"
//! - [`WordStyle::Relative`]: reads the time relative to the hour, "quarter past ten"
//!
//! Hours are always spoken on a 12-hour dial; midnight and noon are "twelve".

use crate::{TimeOfDay, WatchError};
use serde::{Deserialize, Serialize};

/// Three display lines, top to bottom.
pub type TimeWords = [String; 3];

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 6] = ["", "", "twenty", "thirty", "forty", "fifty"];

/// How the minutes are phrased.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordStyle {
    /// "ten" / "twenty" / "five"
    #[default]
    Digital,
    /// "twenty five" / "past" / "ten"
    Relative,
}

/// Format `hour:minute` as three lines of words.
///
/// Fails only for out-of-range input. Lines that carry no word are empty
/// strings, which the digital style uses on the hour and for teens.
///
/// # Example
/// ```
/// use text_watch_lib::words::{time_to_3words, WordStyle};
///
/// let lines = time_to_3words(10, 25, WordStyle::Digital).unwrap();
/// assert_eq!(lines, ["ten", "twenty", "five"]);
///
/// let lines = time_to_3words(10, 15, WordStyle::Relative).unwrap();
/// assert_eq!(lines, ["quarter", "past", "ten"]);
/// ```
pub fn time_to_3words(hour: u32, minute: u32, style: WordStyle) -> Result<TimeWords, WatchError> {
    let time = TimeOfDay::new(hour, minute)?;
    Ok(words_for(time, style))
}

/// Infallible variant for an already validated time.
pub fn words_for(time: TimeOfDay, style: WordStyle) -> TimeWords {
    match style {
        WordStyle::Digital => digital(time.hour(), time.minute()),
        WordStyle::Relative => relative(time.hour(), time.minute()),
    }
}

fn digital(hour: u32, minute: u32) -> TimeWords {
    let h = hour_word(hour);
    match minute {
        0 => lines(h, "o'clock", ""),
        1..=9 => lines(h, "oh", ONES[minute as usize]),
        10..=19 => lines(h, ONES[minute as usize], ""),
        m if m % 10 == 0 => lines(h, TENS[(m / 10) as usize], ""),
        m => lines(h, TENS[(m / 10) as usize], ONES[(m % 10) as usize]),
    }
}

fn relative(hour: u32, minute: u32) -> TimeWords {
    let this_hour = hour_word(hour);
    let next_hour = hour_word((hour + 1) % 24);
    match minute {
        0 => lines("it's", this_hour, "o'clock"),
        15 => lines("quarter", "past", this_hour),
        30 => lines("half", "past", this_hour),
        45 => lines("quarter", "to", next_hour),
        1..=29 => [minute_phrase(minute), "past".into(), this_hour.into()],
        m => [minute_phrase(60 - m), "to".into(), next_hour.into()],
    }
}

fn hour_word(hour: u32) -> &'static str {
    match hour % 12 {
        0 => "twelve",
        h => ONES[h as usize],
    }
}

/// 1..=30 as one or two words.
fn minute_phrase(minutes: u32) -> String {
    match minutes {
        0..=19 => ONES[minutes as usize].to_string(),
        m if m % 10 == 0 => TENS[(m / 10) as usize].to_string(),
        m => format!("{} {}", TENS[(m / 10) as usize], ONES[(m % 10) as usize]),
    }
}

fn lines(first: &str, second: &str, third: &str) -> TimeWords {
    [first.to_string(), second.to_string(), third.to_string()]
}
