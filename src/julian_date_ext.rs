// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Date (`Time<JD>`) specific extensions.

use qtty::*;

use super::calendar::{self, CalendarDate, ClockTime};
use super::instant::Time;
use super::scales::{J2K, JD, MJD};

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00  (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian centuries since J2000.0 (argument of the sidereal-time and
    /// low-precision Sun/Moon series).
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(
            ((*self - Self::J2000) / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }

    /// Decimal year counted in Julian years from J2000.0.
    #[inline]
    pub fn decimal_year(&self) -> f64 {
        super::delta_t::decimal_year(self.value())
    }

    /// Convenience: MJD value corresponding to this JD.
    #[inline]
    pub fn to_mjd(&self) -> Time<MJD> {
        self.to::<MJD>()
    }

    /// Convenience: days since J2000.0 noon.
    #[inline]
    pub fn to_j2k(&self) -> Time<J2K> {
        self.to::<J2K>()
    }

    /// Calendar date containing this instant.
    #[inline]
    pub fn calendar_date(&self) -> CalendarDate {
        calendar::julian_to_date(*self)
    }

    /// Time of day of this instant, rounded to the second.
    #[inline]
    pub fn clock_time(&self) -> ClockTime {
        calendar::julian_to_time(*self)
    }

    /// Julian Day of the civil midnight (`.5`) that opens this instant's day.
    #[inline]
    pub fn start_of_day(&self) -> Self {
        Self::new((self.value() + 0.5).floor() - 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centuries_at_j2000_is_zero() {
        assert_eq!(Time::<JD>::J2000.julian_centuries(), Centuries::new(0.0));
    }

    #[test]
    fn start_of_day_snaps_to_midnight() {
        let jd = Time::<JD>::new(2_457_813.9);
        assert_eq!(jd.start_of_day().value(), 2_457_813.5);
        let before_noon = Time::<JD>::new(2_457_813.2);
        assert_eq!(before_noon.start_of_day().value(), 2_457_812.5);
    }

    #[test]
    fn breakdown_helpers() {
        let jd = Time::<JD>::new(2_451_545.0);
        assert_eq!(jd.calendar_date(), CalendarDate::new(2000, 1, 1).unwrap());
        assert_eq!(jd.clock_time(), ClockTime::new(12, 0, 0));
        assert_eq!(jd.to_j2k().value(), 0.0);
    }
}
