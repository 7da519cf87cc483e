// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Local sidereal time and altitude above the horizon.

use crate::config::GeoLocation;
use crate::instant::Time;
use crate::math::{cos_deg, fractional_part, sin_deg};
use crate::scales::MJD;

/// Local mean sidereal time in hours, `[0, 24)`.
///
/// The GMST polynomial is evaluated with the day part of the MJD for the
/// century argument and the fractional part as UT hours, then shifted by the
/// observer's east longitude.
pub fn local_sidereal_time(mjd: Time<MJD>, location: &GeoLocation) -> f64 {
    let mjd = mjd.value();
    let ut = fractional_part(mjd) * 24.0;
    let t = (mjd.floor() - 51_544.5) / 36_525.0;
    let gmst = 6.697_374_558
        + 1.002_737_909_3 * ut
        + (8_640_184.812_866 + (0.093_104 - 0.000_006_2 * t) * t) * t / 3600.0;
    24.0 * fractional_part((gmst + location.longitude_deg / 15.0) / 24.0)
}

/// Sine of the altitude of an object at `ra_hours` / `dec_deg`, seen from
/// `location` at `mjd`.
pub fn local_altitude(location: &GeoLocation, mjd: Time<MJD>, ra_hours: f64, dec_deg: f64) -> f64 {
    let hour_angle = 15.0 * (local_sidereal_time(mjd, location) - ra_hours);
    sin_deg(location.latitude_deg) * sin_deg(dec_deg)
        + cos_deg(location.latitude_deg) * cos_deg(dec_deg) * cos_deg(hour_angle)
}
