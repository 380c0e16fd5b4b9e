// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relative-time rendering of ISO-8601 instants.
//!
//! [`parse_instant`] accepts the ISO-8601 shapes that appear in `datetime`
//! attributes, [`relative_to`] reduces the distance to "now" to a single
//! whole unit, and [`RelativeTime`] phrases it in English.
//!
//! Units are tried from largest to smallest: years, months, days, hours,
//! minutes, seconds. The first with a whole count of at least one wins, and
//! counts are truncated toward zero, so 47 hours is "1 day ago". Months and
//! years are calendar months in the instant's own offset.

use core::fmt;
use core::str::FromStr;

use chrono::{
    DateTime, Datelike as _, FixedOffset, Local, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeDelta, TimeZone, Utc, Weekday,
};

/// A calendar or clock unit used in relative phrasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Twelve calendar months.
    Year,
    /// A calendar month.
    Month,
    /// 24 hours.
    Day,
    /// 60 minutes.
    Hour,
    /// 60 seconds.
    Minute,
    /// One second.
    Second,
}

impl TimeUnit {
    /// Returns the singular English name of the unit.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
    }
}

/// The distance between an instant and "now", in one whole unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RelativeTime {
    /// Whole number of [`unit`](Self::unit)s, truncated toward zero.
    pub count: u64,
    /// The largest unit with a count of at least one (seconds for zero).
    pub unit: TimeUnit,
    /// `true` unless the instant lies strictly before "now".
    pub future: bool,
}

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.count == 1 { "" } else { "s" };
        let name = self.unit.name();
        if self.future {
            write!(f, "in {} {name}{plural}", self.count)
        } else {
            write!(f, "{} {name}{plural} ago", self.count)
        }
    }
}

/// The zone in which date-times written without an offset are read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalZone {
    /// The same offset for every date.
    Fixed(FixedOffset),
    /// The host's time zone, with the offset in force on each date.
    System,
}

impl LocalZone {
    /// Places a wall-clock date-time in this zone.
    ///
    /// A time repeated by a backward transition takes the earlier offset; a
    /// time skipped by a forward transition moves forward by one hour.
    #[must_use]
    pub fn resolve(self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Fixed(offset) => resolve_in(&offset, naive),
            Self::System => resolve_in(&Local, naive),
        }
    }
}

fn resolve_in<Tz: TimeZone>(zone: &Tz, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    zone.from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            let shifted = naive.checked_add_signed(TimeDelta::hours(1))?;
            zone.from_local_datetime(&shifted).earliest()
        })
        .map(|instant| instant.fixed_offset())
}

/// Parses an ISO-8601 instant as found in a `datetime` attribute.
///
/// The date is one of:
///
/// - calendar: `2026`, `2026-10`, `2026-10-19`, `20261019`
/// - ordinal: `2026-292`, `2026292`
/// - week: `2026-W43`, `2026-W43-1`, `2026W431`
///
/// It may be followed by `T` (or a space) and a time of `HH`, `HH:MM` or
/// `HH:MM:SS`, colons optional, where seconds may carry a fraction after `.`
/// or `,`. The time may end in `Z`, `±HH`, `±HH:MM` or `±HHMM`.
///
/// Values without an offset are read in `zone`; a date alone is midnight.
#[must_use]
pub fn parse_instant(text: &str, zone: LocalZone) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    let (date, time) = match text.split_once(['T', 't', ' ']) {
        Some((date, time)) => (date, Some(time)),
        None => (text, None),
    };
    let date = parse_date(date)?;
    let Some(time) = time else {
        return zone.resolve(date.and_time(NaiveTime::MIN));
    };
    let (clock, offset) = split_offset(time)?;
    let naive = date.and_time(parse_clock(clock)?);
    match offset {
        Some(offset) => offset.from_local_datetime(&naive).single(),
        None => zone.resolve(naive),
    }
}

/// Parses a run of ASCII digits.
fn digits<T: FromStr>(text: &str) -> Option<T> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Strips an optional `sep`, refusing a separator with nothing after it.
fn after_separator(text: &str, sep: char) -> Option<&str> {
    match text.strip_prefix(sep) {
        Some("") => None,
        Some(rest) => Some(rest),
        None => Some(text),
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let year = digits(text.get(..4)?)?;
    let rest = text.get(4..)?;
    if rest.is_empty() {
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    let rest = after_separator(rest, '-')?;

    if let Some(week) = rest.strip_prefix('W') {
        let number = digits(week.get(..2)?)?;
        let day = match week.get(2..)? {
            "" => 1,
            day => digits::<usize>(after_separator(day, '-')?)?,
        };
        let weekday = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .get(day.checked_sub(1)?)?;
        return NaiveDate::from_isoywd_opt(year, number, *weekday);
    }
    if rest.len() == 3 {
        return NaiveDate::from_yo_opt(year, digits(rest)?);
    }

    let month = digits(rest.get(..2)?)?;
    let day = match rest.get(2..)? {
        "" => 1,
        day => {
            let day = after_separator(day, '-')?;
            if day.len() != 2 {
                return None;
            }
            digits(day)?
        }
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Splits a time into its clock part and its offset, if any.
fn split_offset(time: &str) -> Option<(&str, Option<FixedOffset>)> {
    if let Some(clock) = time.strip_suffix(['Z', 'z']) {
        return Some((clock, Some(FixedOffset::east_opt(0)?)));
    }
    match time.find(['+', '-']) {
        Some(at) => Some((time.get(..at)?, Some(parse_offset(time.get(at..)?)?))),
        None => Some((time, None)),
    }
}

/// Parses `±HH`, `±HH:MM` or `±HHMM`.
fn parse_offset(text: &str) -> Option<FixedOffset> {
    let sign = if text.starts_with('-') { -1 } else { 1 };
    let body = text.get(1..)?;
    let hours: i32 = digits(body.get(..2)?)?;
    let minutes: i32 = match body.get(2..)? {
        "" => 0,
        rest => {
            let rest = after_separator(rest, ':')?;
            if rest.len() != 2 {
                return None;
            }
            digits(rest)?
        }
    };
    if minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parses `HH`, `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`, colons optional.
fn parse_clock(text: &str) -> Option<NaiveTime> {
    let hours = digits(text.get(..2)?)?;
    let mut rest = text.get(2..)?;
    let mut minutes = 0;
    let mut seconds = 0;
    let mut nanos = 0;

    if !rest.is_empty() {
        rest = after_separator(rest, ':')?;
        minutes = digits(rest.get(..2)?)?;
        rest = rest.get(2..)?;
    }
    if !rest.is_empty() && !rest.starts_with(['.', ',']) {
        rest = after_separator(rest, ':')?;
        seconds = digits(rest.get(..2)?)?;
        rest = rest.get(2..)?;
    }
    if !rest.is_empty() {
        // A fraction is only allowed on seconds.
        if text.len() - rest.len() < 6 {
            return None;
        }
        let fraction = rest.get(1..)?;
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // Digits past nanoseconds are dropped.
        let kept = fraction.get(..fraction.len().min(9))?;
        let scale = 10_u32.pow(9 - u32::try_from(kept.len()).ok()?);
        nanos = digits::<u32>(kept)? * scale;
    }
    NaiveTime::from_hms_nano_opt(hours, minutes, seconds, nanos)
}

/// Computes the relative distance from `now` to `then`.
#[must_use]
pub fn relative_to(then: DateTime<FixedOffset>, now: DateTime<Utc>) -> RelativeTime {
    let now = now.with_timezone(then.offset());
    let future = then >= now;
    let (earlier, later) = if future { (now, then) } else { (then, now) };

    let months = whole_months(earlier, later);
    let (count, unit) = if months >= 12 {
        (u64::from(months / 12), TimeUnit::Year)
    } else if months >= 1 {
        (u64::from(months), TimeUnit::Month)
    } else {
        let delta = later.signed_duration_since(earlier);
        [
            (delta.num_days(), TimeUnit::Day),
            (delta.num_hours(), TimeUnit::Hour),
            (delta.num_minutes(), TimeUnit::Minute),
            (delta.num_seconds(), TimeUnit::Second),
        ]
        .into_iter()
        .find(|&(count, _)| count >= 1)
        .map_or((0, TimeUnit::Second), |(count, unit)| {
            (count.unsigned_abs(), unit)
        })
    };

    RelativeTime {
        count,
        unit,
        future,
    }
}

/// Whole calendar months from `earlier` to `later` (`earlier <= later`).
fn whole_months(earlier: DateTime<FixedOffset>, later: DateTime<FixedOffset>) -> u32 {
    let years = later.year() - earlier.year();
    let mut months = years * 12 + later.month() as i32 - earlier.month() as i32;
    // Adding the naive month count can overshoot when `later` sits earlier in
    // its month than `earlier` does.
    while months > 0 {
        match earlier.checked_add_months(Months::new(months.unsigned_abs())) {
            Some(high_water) if high_water <= later => break,
            _ => months -= 1,
        }
    }
    months.max(0).unsigned_abs()
}

/// Renders `text` relative to `now`, or returns `placeholder` when `text` is
/// not an ISO-8601 instant.
#[must_use]
pub fn humanize(text: &str, now: DateTime<Utc>, zone: LocalZone, placeholder: &str) -> String {
    match parse_instant(text, zone) {
        Some(instant) => relative_to(instant, now).to_string(),
        None => placeholder.to_owned(),
    }
}
