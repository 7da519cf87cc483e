// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sunrise, solar noon and sunset from the sunrise equation.
//!
//! ```text
//! n   = days since J2000.0 noon at the date's noon + 0.0008
//! J*  = n − λ_obs / 360            (mean solar noon, east longitude)
//! M   = 357.5291 + 0.98560028·J*
//! C   = 1.9148 sin M + 0.0200 sin 2M + 0.0003 sin 3M
//! λ   = M + C + 180 + 102.9372
//! J_t = 2451545 + J* + 0.0053 sin M − 0.0069 sin 2λ
//! sin δ = sin λ · sin 23.44°
//! cos ω₀ = (sin h₀ − sin φ sin δ) / (cos φ cos δ)
//! ```
//!
//! `h₀` is −0.83° lowered by `1.15°·√elevation_ft / 60` for the observer's
//! height.

use crate::calendar::CalendarDate;
use crate::config::GeoLocation;
use crate::instant::Time;
use crate::math::{deg_to_rad, normalize_degrees, rad_to_deg, sin_deg};
use crate::scales::{J2K, JD};
use qtty::Days;

/// Offset added to the day count to approximate TT − UT.
const TT_OFFSET_DAYS: f64 = 0.0008;

/// Maximum axial tilt used for the declination.
const OBLIQUITY_DEG: f64 = 23.44;

/// Centre-of-disc altitude at apparent rise and set, degrees.
const STANDARD_ALTITUDE_DEG: f64 = -0.83;

/// Day length outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SunDay {
    RiseSet {
        rise: Time<JD>,
        set: Time<JD>,
        /// Hour angle ω₀ at rise/set, degrees.
        hour_angle_deg: f64,
    },
    /// Midnight sun.
    AlwaysAbove,
    /// Polar night.
    AlwaysBelow,
}

/// Everything the sunrise equation yields for one date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunEvents {
    pub date: CalendarDate,
    /// Solar noon (local true solar transit), UT.
    pub transit: Time<JD>,
    /// Equation of time; positive when solar noon falls after mean noon.
    pub equation_of_time: Days,
    pub declination_deg: f64,
    pub ecliptic_longitude_deg: f64,
    pub mean_anomaly_deg: f64,
    pub day: SunDay,
}

impl SunEvents {
    pub fn sunrise(&self) -> Option<Time<JD>> {
        match self.day {
            SunDay::RiseSet { rise, .. } => Some(rise),
            _ => None,
        }
    }

    pub fn sunset(&self) -> Option<Time<JD>> {
        match self.day {
            SunDay::RiseSet { set, .. } => Some(set),
            _ => None,
        }
    }

    /// Time between sunrise and sunset; a full or empty day at the poles.
    pub fn day_length(&self) -> Days {
        match self.day {
            SunDay::RiseSet { rise, set, .. } => set - rise,
            SunDay::AlwaysAbove => Days::new(1.0),
            SunDay::AlwaysBelow => Days::new(0.0),
        }
    }
}

/// Apparent-horizon altitude for an observer `elevation_ft` above sea level.
#[inline]
pub fn horizon_altitude_deg(elevation_ft: f64) -> f64 {
    STANDARD_ALTITUDE_DEG - 1.15 * elevation_ft.max(0.0).sqrt() / 60.0
}

/// Sunrise, solar noon and sunset for `date` at `location`.
pub fn sun_events(date: CalendarDate, location: &GeoLocation) -> SunEvents {
    let noon = date.julian_midnight() + Days::new(0.5);
    let n = noon.to::<J2K>().value() + TT_OFFSET_DAYS;
    let j_star = n - location.longitude_deg / 360.0;

    let mean_anomaly = normalize_degrees(357.5291 + 0.985_600_28 * j_star);
    let m = deg_to_rad(mean_anomaly);
    let center = 1.9148 * m.sin() + 0.0200 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin();
    let lambda = normalize_degrees(mean_anomaly + center + 180.0 + 102.9372);
    let l = deg_to_rad(lambda);

    let equation_of_time = 0.0053 * m.sin() - 0.0069 * (2.0 * l).sin();
    let transit = Time::<J2K>::new(j_star + equation_of_time).to::<JD>();

    let declination = (l.sin() * sin_deg(OBLIQUITY_DEG)).asin();

    let h0 = deg_to_rad(horizon_altitude_deg(location.elevation_ft));
    let phi = deg_to_rad(location.latitude_deg);
    let cos_w0 =
        (h0.sin() - phi.sin() * declination.sin()) / (phi.cos() * declination.cos());

    log::trace!(
        "sun {date}: J* = {j_star:.5}, M = {mean_anomaly:.4}, C = {center:.4}, λ = {lambda:.4}, cos ω₀ = {cos_w0:.6}"
    );

    let day = if cos_w0 < -1.0 {
        SunDay::AlwaysAbove
    } else if cos_w0 > 1.0 {
        SunDay::AlwaysBelow
    } else {
        let w0 = rad_to_deg(cos_w0.acos());
        let half = Days::new(w0 / 360.0);
        SunDay::RiseSet {
            rise: transit - half,
            set: transit + half,
            hour_angle_deg: w0,
        }
    };

    log::debug!("sun {date}: transit {}, {day:?}", transit.value());

    SunEvents {
        date,
        transit,
        equation_of_time: Days::new(equation_of_time),
        declination_deg: rad_to_deg(declination),
        ecliptic_longitude_deg: lambda,
        mean_anomaly_deg: mean_anomaly,
        day,
    }
}
