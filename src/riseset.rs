// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Rise, set and twilight search over one local day.
//!
//! The altitude of a moving object is sampled every hour from the observer's
//! local midnight.  Each pair of hours `(h−1, h, h+1)` with `h = 1, 3, …, 23`
//! is fitted with [`quad`] and the roots of
//! `sin(alt) − sin(h₀)` inside the window are classified as rising or setting.
//! The search stops as soon as both a rise and a set have been found.

use crate::calendar::{to_modified_julian_midnight, CalendarDate};
use crate::config::{GeoLocation, ObserverConfig};
use crate::horizon::local_altitude;
use crate::instant::Time;
use crate::math::{quad, sin_deg};
use crate::scales::{JD, MJD};
use qtty::{Centuries, Days};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Altitude a body's centre must cross to count as risen or set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum HorizonThreshold {
    /// 0°.
    Geometric,
    /// +8′, average lunar diameter allowance.
    Moon,
    /// −50′, classic solar refraction value.
    Sun,
    /// −6°.
    Civil,
    /// −12°.
    Nautical,
    /// −18°.
    Astronomical,
}

impl HorizonThreshold {
    /// Threshold altitude in degrees.
    pub const fn altitude_deg(&self) -> f64 {
        match self {
            HorizonThreshold::Geometric => 0.0,
            HorizonThreshold::Moon => 8.0 / 60.0,
            HorizonThreshold::Sun => -50.0 / 60.0,
            HorizonThreshold::Civil => -6.0,
            HorizonThreshold::Nautical => -12.0,
            HorizonThreshold::Astronomical => -18.0,
        }
    }

    #[inline]
    pub fn sin_altitude(&self) -> f64 {
        sin_deg(self.altitude_deg())
    }

    pub const fn name(&self) -> &'static str {
        match self {
            HorizonThreshold::Geometric => "Geometric horizon",
            HorizonThreshold::Moon => "Moon",
            HorizonThreshold::Sun => "Sun",
            HorizonThreshold::Civil => "Civil twilight",
            HorizonThreshold::Nautical => "Nautical twilight",
            HorizonThreshold::Astronomical => "Astronomical twilight",
        }
    }
}

/// Geocentric equatorial position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Equatorial {
    /// Right ascension in hours, `[0, 24)`.
    pub ra_hours: f64,
    /// Declination in degrees.
    pub dec_deg: f64,
}

/// Anything that can report an equatorial position for a time argument in
/// Julian centuries since J2000.0.
pub trait EquatorialSource {
    fn equatorial(&self, t: Centuries) -> Equatorial;
}

impl<F> EquatorialSource for F
where
    F: Fn(Centuries) -> Equatorial,
{
    fn equatorial(&self, t: Centuries) -> Equatorial {
        self(t)
    }
}

/// One horizon crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Crossing {
    /// Hours after the search anchor (the observer's local midnight).
    pub hour: f64,
    /// Crossing instant on the civil (UT) axis.
    pub at: Time<JD>,
}

/// Outcome of a one-day search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum RiseSet {
    /// At least one crossing that day; either side may be missing.
    Crossings {
        rise: Option<Crossing>,
        set: Option<Crossing>,
    },
    /// Above the threshold all day.
    AlwaysAbove,
    /// Below the threshold all day.
    AlwaysBelow,
}

impl RiseSet {
    pub fn rise(&self) -> Option<Crossing> {
        match self {
            RiseSet::Crossings { rise, .. } => *rise,
            _ => None,
        }
    }

    pub fn set(&self) -> Option<Crossing> {
        match self {
            RiseSet::Crossings { set, .. } => *set,
            _ => None,
        }
    }
}

/// Working state of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyObjectSample {
    pub rise_hour: f64,
    pub set_hour: f64,
    pub rises: bool,
    pub sets: bool,
    /// Whether the object was above the threshold at the anchor.
    pub above: bool,
    pub sin_horizon: f64,
}

impl SkyObjectSample {
    pub fn new(threshold: HorizonThreshold) -> Self {
        Self {
            rise_hour: 0.0,
            set_hour: 0.0,
            rises: false,
            sets: false,
            above: false,
            sin_horizon: threshold.sin_altitude(),
        }
    }

    #[inline]
    pub fn done(&self) -> bool {
        self.rises && self.sets
    }

    /// Fits the samples at `hour − 1`, `hour`, `hour + 1` and records any
    /// crossing found within that window.
    pub fn adjust_for_next(&mut self, y_prior: f64, y_curr: f64, y_next: f64, hour: f64) {
        let fit = quad(y_prior, y_curr, y_next);
        match fit.count {
            1 => {
                if y_prior < 0.0 {
                    self.rise_hour = hour + fit.root1;
                    self.rises = true;
                } else {
                    self.set_hour = hour + fit.root1;
                    self.sets = true;
                }
            }
            2 => {
                if fit.y_extreme < 0.0 {
                    self.rise_hour = hour + fit.root2;
                    self.set_hour = hour + fit.root1;
                } else {
                    self.rise_hour = hour + fit.root1;
                    self.set_hour = hour + fit.root2;
                }
                self.rises = true;
                self.sets = true;
            }
            _ => {}
        }
    }

    /// Converts the final state into a [`RiseSet`] with instants measured from
    /// `anchor`.
    pub fn into_result(self, anchor: Time<MJD>) -> RiseSet {
        let crossing = |hour: f64| Crossing {
            hour,
            at: (anchor + Days::new(hour / 24.0)).to::<JD>(),
        };
        if self.rises || self.sets {
            RiseSet::Crossings {
                rise: self.rises.then(|| crossing(self.rise_hour)),
                set: self.sets.then(|| crossing(self.set_hour)),
            }
        } else if self.above {
            RiseSet::AlwaysAbove
        } else {
            RiseSet::AlwaysBelow
        }
    }
}

/// Sine of the altitude of `source` at `hour` hours after `anchor`.
fn sin_altitude<S: EquatorialSource + ?Sized>(
    source: &S,
    location: &GeoLocation,
    anchor: Time<MJD>,
    hour: f64,
) -> f64 {
    let instant = anchor + Days::new(hour / 24.0);
    let t = instant.to::<JD>().julian_centuries();
    let eq = source.equatorial(t);
    local_altitude(location, instant, eq.ra_hours, eq.dec_deg)
}

/// Searches the 24 hours following `anchor` for crossings of `threshold`.
pub fn find_rise_set<S: EquatorialSource + ?Sized>(
    source: &S,
    threshold: HorizonThreshold,
    location: &GeoLocation,
    anchor: Time<MJD>,
) -> RiseSet {
    let mut sample = SkyObjectSample::new(threshold);
    let sin_horizon = sample.sin_horizon;
    let f = |hour: f64| sin_altitude(source, location, anchor, hour) - sin_horizon;

    let mut y_prior = f(0.0);
    sample.above = y_prior > 0.0;

    let mut hour = 1.0;
    while hour < 25.0 && !sample.done() {
        let y_curr = f(hour);
        let y_next = f(hour + 1.0);
        sample.adjust_for_next(y_prior, y_curr, y_next, hour);
        log::trace!(
            "{} {hour:>4}h: prev = {y_prior:.6} curr = {y_curr:.6} next = {y_next:.6}",
            threshold.name()
        );
        y_prior = y_next;
        hour += 2.0;
    }

    let result = sample.into_result(anchor);
    log::debug!("{}: {result:?}", threshold.name());
    result
}

/// Searches the observer's local calendar day `date`.
pub fn rise_set_on<S: EquatorialSource + ?Sized>(
    source: &S,
    threshold: HorizonThreshold,
    observer: &ObserverConfig,
    date: CalendarDate,
) -> RiseSet {
    let anchor = to_modified_julian_midnight(
        date.year,
        date.month,
        date.day,
        observer.utc_offset_hours,
        true,
    );
    find_rise_set(source, threshold, &observer.location, anchor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(ra_hours: f64, dec_deg: f64) -> impl Fn(Centuries) -> Equatorial {
        move |_| Equatorial { ra_hours, dec_deg }
    }

    fn at(latitude_deg: f64) -> GeoLocation {
        GeoLocation {
            latitude_deg,
            longitude_deg: 0.0,
            elevation_ft: 0.0,
        }
    }

    #[test]
    fn thresholds_ordered() {
        assert!(HorizonThreshold::Moon.sin_altitude() > HorizonThreshold::Geometric.sin_altitude());
        assert!(HorizonThreshold::Sun.sin_altitude() > HorizonThreshold::Civil.sin_altitude());
        assert!(HorizonThreshold::Civil.sin_altitude() > HorizonThreshold::Nautical.sin_altitude());
        assert!(
            HorizonThreshold::Nautical.sin_altitude() > HorizonThreshold::Astronomical.sin_altitude()
        );
    }

    #[test]
    fn equatorial_star_rises_and_sets_half_a_sidereal_day_apart() {
        let star = fixed(6.0, 0.0);
        let rs = find_rise_set(&star, HorizonThreshold::Geometric, &at(0.0), Time::new(51_544.0));
        let rise = rs.rise().expect("rise");
        let set = rs.set().expect("set");
        let span = (set.hour - rise.hour).abs();
        assert!((span - 11.967).abs() < 0.05, "span = {span}");
        assert!((0.0..=25.0).contains(&rise.hour));
    }

    #[test]
    fn crossing_instant_matches_hour() {
        let star = fixed(6.0, 0.0);
        let anchor = Time::<MJD>::new(51_544.0);
        let rs = find_rise_set(&star, HorizonThreshold::Geometric, &at(0.0), anchor);
        let rise = rs.rise().expect("rise");
        let expected = 2_451_544.5 + rise.hour / 24.0;
        assert!((rise.at.value() - expected).abs() < 1e-9);
    }

    #[test]
    fn circumpolar_star_always_above() {
        let star = fixed(2.0, 80.0);
        let rs = find_rise_set(&star, HorizonThreshold::Geometric, &at(60.0), Time::new(51_544.0));
        assert_eq!(rs, RiseSet::AlwaysAbove);
    }

    #[test]
    fn southern_star_never_rises_in_north() {
        let star = fixed(2.0, -80.0);
        let rs = find_rise_set(&star, HorizonThreshold::Geometric, &at(60.0), Time::new(51_544.0));
        assert_eq!(rs, RiseSet::AlwaysBelow);
    }

    #[test]
    fn adjust_classifies_single_rise() {
        let mut s = SkyObjectSample::new(HorizonThreshold::Geometric);
        s.adjust_for_next(-1.0, 0.0, 1.0, 5.0);
        assert!(s.rises && !s.sets);
        assert!((s.rise_hour - 5.0).abs() < 1e-12);
    }

    #[test]
    fn adjust_classifies_set_then_rise_around_minimum() {
        let mut s = SkyObjectSample::new(HorizonThreshold::Geometric);
        s.adjust_for_next(1.0, -1.0, 1.0, 3.0);
        assert!(s.done());
        assert!(s.set_hour < s.rise_hour);
    }

    #[test]
    fn local_day_anchor_uses_offset() {
        let observer = ObserverConfig {
            location: at(0.0),
            utc_offset_hours: -6.0,
        };
        let star = fixed(6.0, 0.0);
        let date = CalendarDate::new(2000, 1, 1).unwrap();
        let rs = rise_set_on(&star, HorizonThreshold::Geometric, &observer, date);
        let rise = rs.rise().expect("rise");
        // local midnight at UTC−6 is 06:00 UT
        let expected = 2_451_544.75 + rise.hour / 24.0;
        assert!((rise.at.value() - expected).abs() < 1e-9);
    }
}
