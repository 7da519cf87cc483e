// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil instants: a Julian Date with its calendar breakdown.
//!
//! [`Instant`] is immutable.  The "set" operations return a new value; the
//! breakdown is always recomputed from the Julian Date rounded to the nearest
//! second, so `Instant::from_julian(i.julian())` reproduces `i` exactly.
//!
//! Accepted text forms:
//!
//! | Form | Example |
//! |------|---------|
//! | date | `2017-03-01` |
//! | date and clock | `2017-03-01 18:30`, `2017-03-01T06:30:00pm` |
//! | clock | `18:30`, `6:30pm`, `06:30:15`, `66600` (seconds since midnight) |
//! | Julian Date | `2457813.5` |

use std::str::FromStr;

use chrono::{DateTime, Utc};
use qtty::Days;

use crate::calendar::{
    julian_to_date, julian_to_time, time_to_julian_fraction, CalendarDate, ClockTime,
};
use crate::error::{ParseKind, SkyError, SkyResult};
use crate::instant::Time;
use crate::scales::{JD, MJD};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A point in civil time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Instant {
    jd: Time<JD>,
    date: CalendarDate,
    clock: ClockTime,
    hour24: bool,
    utc: bool,
}

impl Instant {
    /// Current system time.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Breaks a Julian Date down into calendar date and clock time.
    pub fn from_julian(jd: Time<JD>) -> Self {
        Self {
            jd,
            date: julian_to_date(jd),
            clock: julian_to_time(jd),
            hour24: true,
            utc: true,
        }
    }

    /// Instant at `clock` UT on `date`.
    pub fn from_calendar(date: CalendarDate, clock: ClockTime) -> Self {
        let midnight = date.julian_midnight();
        let fraction = time_to_julian_fraction(clock.hour, clock.minute, clock.second);
        Self::from_julian(midnight + Days::new(fraction))
    }

    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self::from_julian(Time::<JD>::from_utc(datetime))
    }

    /// Midnight UT of a `YYYY-MM-DD` date.
    pub fn parse_date(text: &str) -> SkyResult<Self> {
        let date = parse_date_fields(text)?;
        Ok(Self::from_calendar(date, ClockTime::MIDNIGHT))
    }

    /// Decimal Julian Date; must be finite and non-negative.
    pub fn parse_julian(text: &str) -> SkyResult<Self> {
        let trimmed = text.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| SkyError::parse(ParseKind::JulianDate, text, "not a number"))?;
        if !value.is_finite() {
            return Err(SkyError::parse(ParseKind::JulianDate, text, "not finite"));
        }
        if value < 0.0 {
            return Err(SkyError::parse(ParseKind::JulianDate, text, "negative"));
        }
        Ok(Self::from_julian(Time::new(value)))
    }

    /// Same clock time on another date.
    pub fn with_date_str(&self, text: &str) -> SkyResult<Self> {
        let date = parse_date_fields(text)?;
        Ok(Self {
            hour24: self.hour24,
            ..Self::from_calendar(date, self.clock)
        })
    }

    /// Same date at another clock time.
    pub fn with_clock_str(&self, text: &str) -> SkyResult<Self> {
        let (clock, hour24) = parse_clock(text)?;
        Ok(Self {
            hour24,
            ..self.with_clock(clock)
        })
    }

    pub fn with_clock(&self, clock: ClockTime) -> Self {
        Self {
            hour24: self.hour24,
            ..Self::from_calendar(self.date, clock)
        }
    }

    /// Shifted by a (possibly fractional, possibly negative) number of days.
    pub fn add_days(&self, days: f64) -> Self {
        Self {
            hour24: self.hour24,
            ..Self::from_julian(self.jd + Days::new(days))
        }
    }

    #[inline]
    pub fn julian(&self) -> Time<JD> {
        self.jd
    }

    #[inline]
    pub fn modified_julian(&self) -> Time<MJD> {
        self.jd.to::<MJD>()
    }

    #[inline]
    pub fn date(&self) -> CalendarDate {
        self.date
    }

    #[inline]
    pub fn clock(&self) -> ClockTime {
        self.clock
    }

    /// Whether the clock was entered (and is displayed) on the 24-hour dial.
    #[inline]
    pub fn is_24_hour(&self) -> bool {
        self.hour24
    }

    /// Instants are always kept in UT.
    #[inline]
    pub fn is_utc(&self) -> bool {
        self.utc
    }

    pub fn day_of_year(&self) -> u32 {
        self.date.day_of_year()
    }

    /// Calendar date seen by an observer `utc_offset_hours` east of Greenwich.
    pub fn local_date(&self, utc_offset_hours: f64) -> CalendarDate {
        julian_to_date(self.jd + Days::new(utc_offset_hours / 24.0))
    }

    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.jd.to_utc()
    }
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ", self.date)?;
        if self.hour24 {
            write!(f, "{}", self.clock)?;
        } else {
            let (h, pm) = self.clock.twelve_hour();
            write!(
                f,
                "{:02}:{:02}:{:02} {}",
                h,
                self.clock.minute,
                self.clock.second,
                if pm { "PM" } else { "AM" }
            )?;
        }
        f.write_str(" UTC")
    }
}

impl FromStr for Instant {
    type Err = SkyError;

    /// A date (optionally followed by a clock time) or a Julian Date.
    fn from_str(text: &str) -> SkyResult<Self> {
        let trimmed = text.trim();
        if !trimmed.contains('-') {
            return Self::parse_julian(trimmed);
        }
        match trimmed.split_once(|c: char| c == 'T' || c.is_whitespace()) {
            Some((date, clock)) => Self::parse_date(date)?.with_clock_str(clock),
            None => Self::parse_date(trimmed),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Field parsers
// ═══════════════════════════════════════════════════════════════════════════

fn parse_date_fields(text: &str) -> SkyResult<CalendarDate> {
    let fields: Vec<&str> = text.trim().split('-').collect();
    let [y, m, d] = fields.as_slice() else {
        return Err(SkyError::parse(
            ParseKind::Date,
            text,
            "expected YYYY-MM-DD",
        ));
    };
    let field = |s: &str, what: &str| -> SkyResult<u32> {
        s.parse::<u32>()
            .map_err(|_| SkyError::parse(ParseKind::Date, text, format!("{what} is not a number")))
    };
    let year = i32::try_from(field(*y, "year")?)
        .map_err(|_| SkyError::parse(ParseKind::Date, text, "year out of range"))?;
    let month = field(*m, "month")?;
    let day = field(*d, "day")?;
    CalendarDate::new(year, month, day)
}

/// Returns the clock and whether it was given on the 24-hour dial.
fn parse_clock(text: &str) -> SkyResult<(ClockTime, bool)> {
    let lower = text.trim().to_ascii_lowercase();
    let err = |reason: &str| SkyError::parse(ParseKind::Clock, text, reason);

    if !lower.contains(':') {
        let secs: u32 = lower
            .parse()
            .map_err(|_| err("expected HH:MM[:SS] or seconds since midnight"))?;
        if secs >= 86_400 {
            return Err(err("seconds since midnight must be below 86400"));
        }
        return Ok((ClockTime::from_seconds_of_day(secs), true));
    }

    let (body, meridiem) = if let Some(rest) = lower.strip_suffix("am").or_else(|| lower.strip_suffix('a')) {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = lower.strip_suffix("pm").or_else(|| lower.strip_suffix('p')) {
        (rest.trim_end(), Some(true))
    } else {
        (lower.as_str(), None)
    };

    let fields: Vec<&str> = body.split(':').collect();
    if !(2..=3).contains(&fields.len()) {
        return Err(err("expected HH:MM[:SS]"));
    }
    let mut values = [0u32; 3];
    for (slot, f) in values.iter_mut().zip(&fields) {
        *slot = f.parse().map_err(|_| err("non-numeric field"))?;
    }
    let [hour, minute, second] = values;
    if minute >= 60 || second >= 60 {
        return Err(err("minutes and seconds must be below 60"));
    }

    let hour = match meridiem {
        None if hour < 24 => hour,
        None => return Err(err("hour must be below 24")),
        Some(_) if !(1..=12).contains(&hour) => {
            return Err(err("12-hour clock needs an hour from 1 to 12"))
        }
        Some(false) => hour % 12,
        Some(true) => hour % 12 + 12,
    };
    Ok((ClockTime::new(hour, minute, second), meridiem.is_none()))
}
