//! Human-facing formatting: the page date, relative timestamps, and the
//! time-of-day theme.

use chrono::{DateTime, NaiveDate, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

/// First hour (inclusive) of the light theme.
pub const DAY_STARTS_AT: u32 = 7;

/// First hour (inclusive) of the dark theme.
pub const NIGHT_STARTS_AT: u32 = 19;

/// Formats a date the way the page heading shows it: `October 18, 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Describes how long ago `then` was, relative to `now`.
///
/// Timestamps in the future read as "just now". Anything a month or more
/// old falls back to [`format_date`].
pub fn relative_time<Tz: TimeZone>(then: DateTime<Tz>, now: DateTime<Tz>) -> String {
    let seconds = now.clone().signed_duration_since(then.clone()).num_seconds();
    if seconds < 45 {
        return "just now".to_string();
    }

    let minutes = (seconds + 30) / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    if seconds < 86_400 {
        let hours = ((minutes + 30) / 60).min(23);
        return plural(hours, "hour");
    }

    let then_date = then.with_timezone(&now.timezone()).date_naive();
    let days = (now.date_naive() - then_date).num_days();
    match days {
        ..=1 => "yesterday".to_string(),
        2..=29 => format!("{days} days ago"),
        _ => format_date(then.naive_local().date()),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Colour scheme picked from the local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Daytime.
    Light,
    /// Evening and night.
    Dark,
}

impl Theme {
    /// Theme for an hour of the day (0-23).
    pub fn for_hour(hour: u32) -> Self {
        if (DAY_STARTS_AT..NIGHT_STARTS_AT).contains(&hour) {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    /// Theme for a point in time, using its own offset's hour.
    pub fn at<Tz: TimeZone>(time: &DateTime<Tz>) -> Self {
        Self::for_hour(time.hour())
    }

    /// Class name the page puts on `<body>`.
    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}
