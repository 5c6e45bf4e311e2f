//! Week and hour derivation for the calendar grid.
//!
//! Weeks start on Saturday. The grid shows the hours 5am through 8pm.

use chrono::{Datelike, Duration, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const WEEK_LEN: usize = 7;
pub const FIRST_HOUR: u8 = 5;
pub const LAST_HOUR: u8 = 20;

static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([0-9]+)(am|pm)$").expect("time pattern is valid")
});

/// One column of the week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Day {
    pub date: NaiveDate,
    /// ISO `yyyy-MM-dd`.
    pub formatted_date: String,
    /// Full weekday name, e.g. "Saturday".
    pub day_name: String,
    pub day_number: u32,
    /// Abbreviated month, e.g. "Jun".
    pub month: String,
}

/// One row of the week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hour {
    pub hour: u8,
    pub label: String,
}

impl Day {
    fn new(date: NaiveDate) -> Day {
        Day {
            date,
            formatted_date: date.format("%Y-%m-%d").to_string(),
            day_name: date.format("%A").to_string(),
            day_number: date.day(),
            month: date.format("%b").to_string(),
        }
    }
}

/// Returns the Saturday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    // Saturday is 6 days from Sunday; shift so it becomes offset 0.
    let offset = (date.weekday().num_days_from_sunday() + 1) % 7;
    date - Duration::days(offset as i64)
}

/// The seven days of the week containing `reference`, Saturday first.
pub fn days_of_week(reference: NaiveDate) -> Vec<Day> {
    let start = week_start(reference);
    (0..WEEK_LEN as i64)
        .map(|i| Day::new(start + Duration::days(i)))
        .collect()
}

/// The displayable hours, 5am to 8pm inclusive.
pub fn hours_of_day() -> Vec<Hour> {
    (FIRST_HOUR..=LAST_HOUR)
        .map(|hour| Hour { hour, label: format_hour(hour) })
        .collect()
}

/// 12-hour label for a 24-hour value: 0 -> "12am", 12 -> "12pm", 19 -> "7pm".
pub fn format_hour(hour: u8) -> String {
    match hour {
        0 => "12am".to_string(),
        12 => "12pm".to_string(),
        h if h > 12 => format!("{}pm", h - 12),
        h => format!("{}am", h),
    }
}

/// Renders an ISO date string as "Mon D". `None` if it is not a date.
pub fn format_date(date_string: &str) -> Option<String> {
    parse_date(date_string).map(format_short_date)
}

pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// Parses `<digits><am|pm>` into a 24-hour value.
///
/// Only ASCII digits for hours 1 through 12 are accepted, with no space
/// before the suffix. "12am" is midnight (0) and "12pm" is noon (12).
pub fn parse_time_string(text: &str) -> Option<u8> {
    let caps = TIME_RE.captures(text.trim())?;
    let hour: u8 = caps[1].parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    let pm = caps[2].eq_ignore_ascii_case("pm");
    Some(match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    })
}

/// Tracks which week the calendar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekCursor {
    reference: NaiveDate,
}

impl WeekCursor {
    pub fn new(reference: NaiveDate) -> WeekCursor {
        WeekCursor { reference }
    }

    pub fn today() -> WeekCursor {
        WeekCursor::new(Local::now().date_naive())
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn previous_week(&mut self) {
        self.reference -= Duration::days(7);
    }

    pub fn next_week(&mut self) {
        self.reference += Duration::days(7);
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        self.reference = date;
    }

    pub fn go_to_today(&mut self) {
        self.go_to(Local::now().date_naive());
    }

    pub fn days(&self) -> Vec<Day> {
        days_of_week(self.reference)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let start = week_start(self.reference);
        date >= start && date < start + Duration::days(WEEK_LEN as i64)
    }
}
