//! Date and weekday lines shown below the time.
//!
//! Both are plain strings, rewritten on every day change without diffing or
//! animation. The first character is lower-cased to match the all-lowercase
//! look of the time lines: "november 21st, 2026" and "saturday".

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Which number picks the ordinal suffix of the date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrdinalKey {
    /// Suffix follows the day of the month ("21st")
    #[default]
    DayOfMonth,
    /// Suffix follows the minute of the hour, so the 21st at 10:02 reads
    /// "21nd". Only useful for reproducing older faces.
    MinuteOfHour,
}

/// The two strings of the date area.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateLines {
    pub date: String,
    pub day: String,
}

impl DateLines {
    pub fn for_time(at: &NaiveDateTime, key: OrdinalKey) -> Self {
        Self {
            date: format_date(at, key),
            day: format_day(at),
        }
    }
}

/// English ordinal suffix for `n`, as used for days of the month.
pub fn ordinal_suffix(n: u32) -> &'static str {
    match n {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}

/// "november 21st, 2026"
pub fn format_date(at: &NaiveDateTime, key: OrdinalKey) -> String {
    let suffix_source = match key {
        OrdinalKey::DayOfMonth => at.day(),
        OrdinalKey::MinuteOfHour => at.minute(),
    };
    let text = format!(
        "{} {}{}, {}",
        at.format("%B"),
        at.day(),
        ordinal_suffix(suffix_source),
        at.year()
    );
    lower_first(&text)
}

/// "wednesday"
pub fn format_day(at: &NaiveDateTime) -> String {
    lower_first(&at.format("%A").to_string())
}

fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
