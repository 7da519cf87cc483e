// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil calendar ↔ Julian Date conversion.
//!
//! The Gregorian calendar is used from 1582-10-15 onward and the Julian
//! calendar before it.  Years use astronomical numbering (1 BC is year 0).
//!
//! The converters themselves do not validate their input; use
//! [`is_valid_calendar_date`] or [`CalendarDate::new`] for that.

use crate::error::{SkyError, SkyResult};
use crate::instant::Time;
use crate::scales::{JD, MJD};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// First JD day number (noon-based) that is Gregorian: 1582-10-15.
const GREGORIAN_CUTOVER_Z: f64 = 2_299_161.0;

/// A calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    /// Validated constructor.
    pub fn new(year: i32, month: u32, day: u32) -> SkyResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(SkyError::InvalidDate {
                year,
                month,
                day,
                reason: "month out of range",
            });
        }
        if !is_valid_calendar_date(year, month, day) {
            return Err(SkyError::InvalidDate {
                year,
                month,
                day,
                reason: "day out of range for month",
            });
        }
        Ok(Self { year, month, day })
    }

    /// 1-based ordinal day within the year.
    pub fn day_of_year(&self) -> u32 {
        (1..self.month)
            .filter_map(|m| days_in_month(self.year, m))
            .sum::<u32>()
            + self.day
    }

    /// Julian Day of this date's civil midnight.
    #[inline]
    pub fn julian_midnight(&self) -> Time<JD> {
        date_to_julian_noon(self.year, self.month, self.day)
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A time of day, always stored on the 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockTime {
    pub const MIDNIGHT: Self = Self::new(0, 0, 0);

    #[inline]
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// `true` for 00:00:00 through 23:59:59.
    pub fn is_valid(&self) -> bool {
        self.hour < 24 && self.minute < 60 && self.second < 60
    }

    /// Seconds elapsed since midnight.
    #[inline]
    pub fn seconds_of_day(&self) -> u32 {
        self.hour * 3600 + self.minute * 60 + self.second
    }

    /// Build from seconds since midnight, clamped to 23:59:59.
    pub fn from_seconds_of_day(seconds: u32) -> Self {
        let s = seconds.min(86_399);
        Self::new(s / 3600, s % 3600 / 60, s % 60)
    }

    /// Hour on the 12-hour clock (1–12) and the PM flag.
    pub fn twelve_hour(&self) -> (u32, bool) {
        let pm = self.hour >= 12;
        let h = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        (h, pm)
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════════════════════════════════════

/// Gregorian leap-year rule.
#[inline]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month`, or `None` for a month outside 1–12.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    const DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let idx = month.checked_sub(1)? as usize;
    let days = *DAYS.get(idx)?;
    Some(if month == 2 && is_leap_year(year) {
        days + 1
    } else {
        days
    })
}

/// `true` when `year-month-day` names an existing day.
///
/// The Gregorian leap rule is applied to every year.  Before 1582-10-15
/// [`julian_to_date`] counts in the Julian calendar, so it can return
/// February 29 of a century year such as 1500, which this function (and
/// therefore [`CalendarDate::new`] and date parsing) rejects.
pub fn is_valid_calendar_date(year: i32, month: u32, day: u32) -> bool {
    days_in_month(year, month).is_some_and(|max| (1..=max).contains(&day))
}

// ═══════════════════════════════════════════════════════════════════════════
// Date → JD
// ═══════════════════════════════════════════════════════════════════════════

/// Julian Day at 0h of the given date.
///
/// The value carries the customary `.5` bias: 2017-03-01 → 2457813.5,
/// 2001-12-05 → 2452248.5.
pub fn date_to_julian_noon(year: i32, month: u32, day: u32) -> Time<JD> {
    let gregorian = (year, month, day) >= (1582, 10, 15);

    let (mut y, mut m) = (f64::from(year), f64::from(month));
    if month <= 2 {
        y -= 1.0;
        m += 12.0;
    }

    let b = if gregorian {
        let a = (y / 100.0).floor();
        2.0 - a + (a / 4.0).floor()
    } else {
        0.0
    };

    let jd = (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + f64::from(day) + b
        - 1524.5;
    Time::new(jd)
}

/// Fraction of a day elapsed at `hour:minute:second`.
#[inline]
pub fn time_to_julian_fraction(hour: u32, minute: u32, second: u32) -> f64 {
    f64::from(ClockTime::new(hour, minute, second).seconds_of_day()) / SECONDS_PER_DAY
}

// ═══════════════════════════════════════════════════════════════════════════
// JD → date / time
// ═══════════════════════════════════════════════════════════════════════════

/// Splits a JD into the civil day number (`Z`, counted from noon-based JD
/// integers) and the second of that civil day, rounding to the nearest second.
fn split_rounded(jd: f64) -> (f64, u32) {
    let total = ((jd + 0.5) * SECONDS_PER_DAY).round();
    let z = (total / SECONDS_PER_DAY).floor();
    let secs = (total - z * SECONDS_PER_DAY).clamp(0.0, SECONDS_PER_DAY - 1.0);
    (z, secs as u32)
}

fn date_from_day_number(z: f64) -> CalendarDate {
    let a = if z >= GREGORIAN_CUTOVER_Z {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    } else {
        z
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor();
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    CalendarDate {
        year: year as i32,
        month: month as u32,
        day: day as u32,
    }
}

/// Calendar date containing `jd`, after rounding to the nearest second.
pub fn julian_to_date(jd: Time<JD>) -> CalendarDate {
    let (z, _) = split_rounded(jd.value());
    date_from_day_number(z)
}

/// Time of day of `jd`, rounded to the nearest second.
pub fn julian_to_time(jd: Time<JD>) -> ClockTime {
    let (_, secs) = split_rounded(jd.value());
    ClockTime::from_seconds_of_day(secs)
}

/// Time of day for a fraction of a day counted from midnight.
///
/// Only the fractional part of `fraction` is used.
pub fn julian_fraction_to_time(fraction: f64) -> ClockTime {
    let f = crate::math::fractional_part(fraction);
    let secs = (f * SECONDS_PER_DAY).round().min(SECONDS_PER_DAY - 1.0);
    ClockTime::from_seconds_of_day(secs as u32)
}

// ═══════════════════════════════════════════════════════════════════════════
// J2000 day counts and MJD
// ═══════════════════════════════════════════════════════════════════════════

/// Days since 2000-01-01T12:00 for a date and optional UT hour.
///
/// `None` means the date alone, i.e. 0h UT.  The integer formula is exact
/// for 1901–2099; outside that range the value is still returned and a
/// warning is logged.
pub fn to_j2000(year: i32, month: u32, day: u32, hours: Option<f64>) -> f64 {
    if !(1901..=2099).contains(&year) {
        log::warn!("J2000 day count for year {year} is outside 1901–2099");
    }
    let (y, m, d) = (i64::from(year), i64::from(month), i64::from(day));
    let days = 367 * y - 7 * (y + (m + 9) / 12) / 4 + 275 * m / 9 + d;
    days as f64 - 730_531.5 + hours.unwrap_or(0.0) / 24.0
}

/// MJD of 0h on the given date.
///
/// With `add_time_zone`, the result is the MJD of the observer's *local*
/// midnight: `tz_offset_hours / 24` is subtracted (UTC−5 → +5/24).
pub fn to_modified_julian_midnight(
    year: i32,
    month: u32,
    day: u32,
    tz_offset_hours: f64,
    add_time_zone: bool,
) -> Time<MJD> {
    let mjd: Time<MJD> = date_to_julian_noon(year, month, day).to::<MJD>();
    if add_time_zone {
        mjd - qtty::Days::new(tz_offset_hours / 24.0)
    } else {
        mjd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_julian_days() {
        assert_eq!(date_to_julian_noon(2017, 3, 1).value(), 2_457_813.5);
        assert_eq!(date_to_julian_noon(2001, 12, 5).value(), 2_452_248.5);
        assert_eq!(date_to_julian_noon(2000, 1, 1).value(), 2_451_544.5);
    }

    #[test]
    fn gregorian_cutover() {
        let julian_last = date_to_julian_noon(1582, 10, 4).value();
        let gregorian_first = date_to_julian_noon(1582, 10, 15).value();
        assert_eq!(gregorian_first - julian_last, 1.0);
        assert_eq!(julian_to_date(Time::new(2_299_160.5)), CalendarDate { year: 1582, month: 10, day: 15 });
        assert_eq!(julian_to_date(Time::new(2_299_159.5)), CalendarDate { year: 1582, month: 10, day: 4 });
    }

    #[test]
    fn date_roundtrip_over_years() {
        for &(y, m, d) in &[
            (1600, 2, 29),
            (1858, 11, 17),
            (1900, 3, 1),
            (1999, 12, 31),
            (2000, 2, 29),
            (2024, 7, 15),
            (-4712, 1, 1),
        ] {
            let jd = date_to_julian_noon(y, m, d);
            assert_eq!(julian_to_date(jd), CalendarDate { year: y, month: m, day: d });
        }
    }

    #[test]
    fn time_breakdown_rounds_to_second() {
        let jd = Time::<JD>::new(2_451_545.0 + 0.4 / SECONDS_PER_DAY);
        assert_eq!(julian_to_time(jd), ClockTime::new(12, 0, 0));
        let late = Time::<JD>::new(2_451_545.5 - 0.2 / SECONDS_PER_DAY);
        assert_eq!(julian_to_date(late), CalendarDate { year: 2000, month: 1, day: 2 });
        assert_eq!(julian_to_time(late), ClockTime::MIDNIGHT);
    }

    #[test]
    fn fraction_roundtrip_within_a_second() {
        for &(h, m, s) in &[(0, 0, 0), (6, 30, 15), (12, 0, 0), (23, 59, 59)] {
            let f = time_to_julian_fraction(h, m, s);
            assert_eq!(julian_fraction_to_time(f), ClockTime::new(h, m, s));
        }
    }

    #[test]
    fn julian_century_leap_day_is_not_valid_input() {
        let leap_day = date_to_julian_noon(1500, 3, 1) - qtty::Days::new(1.0);
        let date = julian_to_date(leap_day);
        assert_eq!((date.year, date.month, date.day), (1500, 2, 29));
        assert!(!is_valid_calendar_date(1500, 2, 29));
        assert!(CalendarDate::new(1500, 2, 29).is_err());
    }

    #[test]
    fn leap_years() {
        assert!(is_valid_calendar_date(2000, 2, 29));
        assert!(is_valid_calendar_date(1600, 2, 29));
        assert!(!is_valid_calendar_date(1900, 2, 29));
        assert!(!is_valid_calendar_date(2100, 2, 29));
        assert!(!is_valid_calendar_date(2023, 2, 29));
        assert!(!is_valid_calendar_date(2023, 4, 31));
        assert!(!is_valid_calendar_date(2023, 13, 1));
        assert!(!is_valid_calendar_date(2023, 0, 1));
        assert!(!is_valid_calendar_date(2023, 1, 0));
    }

    #[test]
    fn calendar_date_new_rejects() {
        assert!(matches!(
            CalendarDate::new(2023, 2, 29),
            Err(SkyError::InvalidDate { month: 2, day: 29, .. })
        ));
        assert!(CalendarDate::new(2024, 2, 29).is_ok());
    }

    #[test]
    fn day_of_year_counts_leap_day() {
        assert_eq!(CalendarDate::new(2024, 3, 1).unwrap().day_of_year(), 61);
        assert_eq!(CalendarDate::new(2023, 3, 1).unwrap().day_of_year(), 60);
        assert_eq!(CalendarDate::new(2023, 12, 31).unwrap().day_of_year(), 365);
    }

    #[test]
    fn j2000_day_counts() {
        assert_eq!(to_j2000(2000, 1, 1, None), -0.5);
        assert_eq!(to_j2000(2000, 1, 1, Some(12.0)), 0.0);
        // 0h 21 June 1997
        assert_eq!(to_j2000(1997, 6, 21, None), -924.5);
    }

    #[test]
    fn j2000_matches_jd_inside_valid_range() {
        let d = to_j2000(2017, 3, 1, Some(6.0));
        let jd = date_to_julian_noon(2017, 3, 1).value() + 0.25;
        assert!((d - (jd - 2_451_545.0)).abs() < 1e-9);
    }

    #[test]
    fn mjd_midnight_with_zone() {
        let utc = to_modified_julian_midnight(2017, 3, 1, -5.0, false);
        assert_eq!(utc.value(), 57_813.0);
        let local = to_modified_julian_midnight(2017, 3, 1, -5.0, true);
        assert!((local.value() - (57_813.0 + 5.0 / 24.0)).abs() < 1e-12);
    }

    #[test]
    fn twelve_hour_clock() {
        assert_eq!(ClockTime::new(0, 5, 0).twelve_hour(), (12, false));
        assert_eq!(ClockTime::new(12, 0, 0).twelve_hour(), (12, true));
        assert_eq!(ClockTime::new(15, 0, 0).twelve_hour(), (3, true));
    }

    #[test]
    fn display_pads() {
        assert_eq!(CalendarDate { year: 2017, month: 3, day: 1 }.to_string(), "2017-03-01");
        assert_eq!(ClockTime::new(4, 5, 6).to_string(), "04:05:06");
    }
}
