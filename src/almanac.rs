// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! One observer, every engine.
//!
//! [`Almanac`] holds an [`ObserverConfig`] and answers queries for an
//! [`Instant`].  Daily events (rise/set, sunrise) are computed for the
//! observer's *local* calendar date, which may differ from the UT date of
//! the instant.

use crate::calendar::CalendarDate;
use crate::civil::Instant;
use crate::config::ObserverConfig;
use crate::error::SkyResult;
use crate::moon::{
    current_phase, next_principal_phase, phase_calendar, LowPrecisionMoon, LowPrecisionSun, MoonPhase, MoonPhaseSample,
    PhaseCalendarOptions, PhaseEvent,
};
use crate::planets::{all_planets, geocentric, Planet, PlanetPosition};
use crate::riseset::{rise_set_on, EquatorialSource, HorizonThreshold, RiseSet};
use crate::scales::J2K;
use crate::sun::{sun_events, SunEvents};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Moon, Sun and nautical twilight for one local day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DailyRiseSet {
    pub date: CalendarDate,
    pub moon: RiseSet,
    pub sun: RiseSet,
    pub nautical_twilight: RiseSet,
}

/// Query facade bound to one observer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Almanac {
    config: ObserverConfig,
}

impl Almanac {
    pub fn new(config: ObserverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    /// Local calendar date of `at` for this observer.
    pub fn local_date(&self, at: &Instant) -> CalendarDate {
        at.local_date(self.config.utc_offset_hours)
    }

    /// Position in the synodic month and the next principal phase.
    pub fn moon_phase(&self, at: &Instant) -> (MoonPhaseSample, MoonPhase) {
        current_phase(at.julian())
    }

    /// Upcoming principal phases, starting with the one that comes next.
    pub fn next_phases(&self, at: &Instant, options: PhaseCalendarOptions) -> Vec<PhaseEvent> {
        let jd = at.julian();
        phase_calendar(next_principal_phase(jd), jd, options)
    }

    /// Moon, Sun and nautical twilight on the local date of `at`.
    pub fn rise_set(&self, at: &Instant) -> DailyRiseSet {
        DailyRiseSet {
            date: self.local_date(at),
            moon: self.rise_set_for(at, HorizonThreshold::Moon),
            sun: self.rise_set_for(at, HorizonThreshold::Sun),
            nautical_twilight: self.rise_set_for(at, HorizonThreshold::Nautical),
        }
    }

    /// Crossings of a single threshold on the local date of `at`.
    ///
    /// [`HorizonThreshold::Moon`] tracks the Moon; every other threshold
    /// tracks the Sun.
    pub fn rise_set_for(&self, at: &Instant, threshold: HorizonThreshold) -> RiseSet {
        let source: &dyn EquatorialSource = match threshold {
            HorizonThreshold::Moon => &LowPrecisionMoon,
            _ => &LowPrecisionSun,
        };
        rise_set_on(source, threshold, &self.config, self.local_date(at))
    }

    /// Sunrise equation for the local date of `at`.
    pub fn sun(&self, at: &Instant) -> SunEvents {
        sun_events(self.local_date(at), &self.config.location)
    }

    pub fn planet(&self, planet: Planet, at: &Instant) -> SkyResult<PlanetPosition> {
        geocentric(planet, at.julian().to::<J2K>())
    }

    /// Every observable planet; failures are reported per body.
    pub fn planets(&self, at: &Instant) -> Vec<(Planet, SkyResult<PlanetPosition>)> {
        all_planets(at.julian().to::<J2K>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeoLocation;
    use crate::error::SkyError;

    fn nashua() -> Almanac {
        Almanac::default()
    }

    #[test]
    fn local_date_uses_offset() {
        let at: Instant = "2017-03-01 02:00".parse().unwrap();
        assert_eq!(
            nashua().local_date(&at),
            CalendarDate::new(2017, 2, 28).unwrap()
        );
    }

    #[test]
    fn daily_events_at_mid_latitude() {
        let at: Instant = "2017-03-01 17:00".parse().unwrap();
        let day = nashua().rise_set(&at);
        let sunrise = day.sun.rise().unwrap();
        let sunset = day.sun.set().unwrap();
        assert!(sunrise.hour < sunset.hour);
        // Nashua on 1 March: sunrise about 06:20 EST, sunset about 17:40 EST
        assert!((sunrise.hour - 6.35).abs() < 0.3, "{sunrise:?}");
        assert!((sunset.hour - 17.65).abs() < 0.3, "{sunset:?}");

        let dawn = day.nautical_twilight.rise().unwrap();
        assert!(dawn.hour < sunrise.hour);
    }

    #[test]
    fn twilight_dawns_are_ordered() {
        let at: Instant = "2017-03-01 17:00".parse().unwrap();
        let almanac = nashua();
        let dawn = |threshold| {
            almanac
                .rise_set_for(&at, threshold)
                .rise()
                .map(|c| c.hour)
                .unwrap_or_else(|| panic!("no {threshold:?} dawn"))
        };
        let astronomical = dawn(HorizonThreshold::Astronomical);
        let nautical = dawn(HorizonThreshold::Nautical);
        let civil = dawn(HorizonThreshold::Civil);
        let sunrise = dawn(HorizonThreshold::Sun);
        assert!(astronomical < nautical, "{astronomical} {nautical}");
        assert!(nautical < civil && civil < sunrise, "{nautical} {civil} {sunrise}");
        // About half an hour of civil twilight at 43° N in March
        assert!((0.3..0.8).contains(&(sunrise - civil)), "{civil} {sunrise}");
    }

    #[test]
    fn sun_matches_rise_set_search() {
        let at: Instant = "2017-03-01 17:00".parse().unwrap();
        let almanac = nashua();
        let equation = almanac.sun(&at).sunrise().unwrap();
        let search = almanac.rise_set(&at).sun.rise().unwrap().at;
        assert!((equation - search).value().abs() < 8.0 / 1440.0);
    }

    #[test]
    fn polar_night_for_sun() {
        let arctic = Almanac::new(ObserverConfig {
            location: GeoLocation {
                latitude_deg: 80.0,
                longitude_deg: 0.0,
                elevation_ft: 0.0,
            },
            utc_offset_hours: 0.0,
        });
        let at: Instant = "2021-12-21".parse().unwrap();
        assert_eq!(
            arctic.rise_set_for(&at, HorizonThreshold::Sun),
            RiseSet::AlwaysBelow
        );
    }

    #[test]
    fn next_phases_start_with_nearest() {
        let at: Instant = "2017-03-01".parse().unwrap();
        let events = nashua().next_phases(&at, PhaseCalendarOptions::default());
        assert_eq!(events.len(), 4);
        assert!(events[0].at >= at.julian());
        assert!(events.windows(2).all(|w| w[0].at < w[1].at));
        for phase in MoonPhase::ALL {
            assert!(events[0].at <= crate::moon::next_phase_instant(phase, at.julian()));
        }
    }

    #[test]
    fn new_moon_hours_away_is_listed_first() {
        // 2014-12-22 00:00 UT; New Moon at 01:36 UT the same night
        let at = Instant::from_julian(crate::JulianDate::new(2_457_013.5));
        let events = nashua().next_phases(&at, PhaseCalendarOptions::default());
        assert_eq!(events[0].phase, MoonPhase::New);
        assert!((events[0].at.value() - 2_457_013.566).abs() < 0.01, "{:?}", events[0]);
    }

    #[test]
    fn planets_cover_observable_bodies() {
        let at: Instant = "2017-03-01".parse().unwrap();
        let almanac = nashua();
        let all = almanac.planets(&at);
        assert_eq!(all.len(), Planet::OBSERVABLE.len());
        assert!(all.iter().all(|(_, r)| r.is_ok()));
        assert!(matches!(
            almanac.planet(Planet::Earth, &at),
            Err(SkyError::ObserverBody { .. })
        ));
    }
}
