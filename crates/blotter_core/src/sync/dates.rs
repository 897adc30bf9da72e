//! Lenient record-date parsing.
//!
//! Record dates come from free-entry form fields and may be malformed.
//! The chain is: date + time, then date alone (midnight), then the
//! caller's fallback timestamp. Malformed input must never raise; the
//! degraded "just now" timestamp on a new-record event is an accepted
//! inaccuracy, not a defect.

use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

/// Resolves a record's own timestamp with the lenient fallback chain.
///
/// Accepted date shapes: `MM-DD-YYYY`, `YYYY-MM-DD`.
/// Accepted time shapes: `HH:MM`, `HH:MM:SS`, `hh:MM AM/PM`.
pub fn record_timestamp(date: Option<&str>, time: Option<&str>, fallback_ms: i64) -> i64 {
    let Some(parsed_date) = date.and_then(parse_date) else {
        return fallback_ms;
    };

    let parsed_time = time.and_then(parse_time).unwrap_or(Time::MIDNIGHT);
    to_epoch_ms(parsed_date, parsed_time)
}

fn parse_date(value: &str) -> Option<Date> {
    let trimmed = value.trim();
    Date::parse(trimmed, format_description!("[month]-[day]-[year]"))
        .ok()
        .or_else(|| Date::parse(trimmed, format_description!("[year]-[month]-[day]")).ok())
}

fn parse_time(value: &str) -> Option<Time> {
    let normalized = value.trim().to_ascii_uppercase();
    Time::parse(&normalized, format_description!("[hour]:[minute]:[second]"))
        .ok()
        .or_else(|| Time::parse(&normalized, format_description!("[hour]:[minute]")).ok())
        .or_else(|| {
            Time::parse(
                &normalized,
                format_description!("[hour repr:12]:[minute] [period]"),
            )
            .ok()
        })
}

fn to_epoch_ms(date: Date, time: Time) -> i64 {
    PrimitiveDateTime::new(date, time)
        .assume_utc()
        .unix_timestamp()
        * 1000
}
