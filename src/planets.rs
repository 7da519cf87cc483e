// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Planet positions from mean orbital elements
//!
//! Each planet follows a fixed Keplerian ellipse whose elements are
//! referred to the mean ecliptic and equinox of J2000.0 and osculate at
//! JD 2450680.5.  The pipeline for one body at `d` days after J2000.0 is:
//!
//! 1. mean anomaly `M = n·(d − d_el) + L − ϖ`
//! 2. Kepler's equation `E − e·sin E = M` by Newton iteration
//! 3. true anomaly and radius vector
//! 4. heliocentric ecliptic rectangular coordinates
//! 5. subtract the Earth, rotate by the obliquity → RA / Dec / distance
//!
//! Accuracy is a few arc-minutes for the inner planets over a few decades.

use crate::config::GeoLocation;
use crate::error::{SkyError, SkyResult};
use crate::horizon::local_altitude;
use crate::instant::Time;
use crate::math::{atan2_positive, deg_to_rad, normalize_radians, rad_to_deg};
use crate::riseset::Equatorial;
use crate::scales::{J2K, JD, MJD};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Newton step tolerance on the eccentric anomaly, radians.
const KEPLER_TOLERANCE: f64 = 1e-12;
const KEPLER_MAX_ITERATIONS: usize = 50;

/// Epoch of the element table.
const ELEMENTS_EPOCH_JD: f64 = 2_450_680.5;
/// Epoch of the mean ecliptic and equinox.
const ECLIPTIC_EPOCH_JD: f64 = 2_451_545.0;

/// Obliquity of the ecliptic for the J2000.0 frame, degrees.
const OBLIQUITY_J2000_DEG: f64 = 23.429_292;

/// The nine classical planets, Earth included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// Keplerian elements.  Angles in degrees, distances in AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub inclination_deg: f64,
    pub ascending_node_deg: f64,
    /// Longitude of perihelion ϖ.
    pub perihelion_deg: f64,
    pub semi_major_axis_au: f64,
    /// Mean daily motion n, degrees per day.
    pub daily_motion_deg: f64,
    pub eccentricity: f64,
    /// Mean longitude L at the element epoch.
    pub mean_longitude_deg: f64,
}

#[rustfmt::skip]
static ELEMENTS: [OrbitalElements; 9] = [
    elements( 7.00507,  48.3339,  77.454,    0.3870978, 4.092353,    0.2056324, 314.42369),
    elements( 3.39472,  76.6889, 131.761,    0.7233238, 1.602158,    0.0067933, 236.94045),
    elements( 0.00041, 349.2,    102.8517,   1.00002,   0.9855796,   0.0166967, 328.40353),
    elements( 1.84992,  49.5664, 336.0882,   1.5236365, 0.5240613,   0.0934231, 262.42784),
    elements( 1.30463, 100.4713,  15.6978,   5.202597,  0.08309618,  0.0484646, 322.55983),
    elements( 2.48524, 113.6358,  88.863,    9.5719,    0.03328656,  0.0531651,  20.95759),
    elements( 0.77343,  74.0954, 175.6807,  19.30181,   0.01162295,  0.0428959, 303.18967),
    elements( 1.7681,  131.7925,   7.206,   30.26664,   0.005919282, 0.0102981, 299.8641),
    elements(17.12137, 110.3833, 224.8025,  39.5804,    0.003958072, 0.2501272, 235.7656),
];

const fn elements(
    inclination_deg: f64,
    ascending_node_deg: f64,
    perihelion_deg: f64,
    semi_major_axis_au: f64,
    daily_motion_deg: f64,
    eccentricity: f64,
    mean_longitude_deg: f64,
) -> OrbitalElements {
    OrbitalElements {
        inclination_deg,
        ascending_node_deg,
        perihelion_deg,
        semi_major_axis_au,
        daily_motion_deg,
        eccentricity,
        mean_longitude_deg,
    }
}

impl Planet {
    pub const ALL: [Planet; 9] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
    ];

    /// Every body that can be observed from the Earth.
    pub const OBSERVABLE: [Planet; 8] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Earth => "Earth",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
        }
    }

    #[inline]
    pub fn elements(&self) -> &'static OrbitalElements {
        &ELEMENTS[*self as usize]
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for Planet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Kepler's equation
// ═══════════════════════════════════════════════════════════════════════════

/// Eccentric anomaly `E` solving `E − e·sin E = M` (radians).
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> SkyResult<f64> {
    let mut e_anom = mean_anomaly;
    let mut delta = f64::INFINITY;
    for i in 0..KEPLER_MAX_ITERATIONS {
        delta = e_anom - eccentricity * e_anom.sin() - mean_anomaly;
        e_anom -= delta / (1.0 - eccentricity * e_anom.cos());
        if delta.abs() < KEPLER_TOLERANCE {
            log::trace!("Kepler: M = {mean_anomaly:.9}, e = {eccentricity} → E = {e_anom:.12} in {} steps", i + 1);
            return Ok(e_anom);
        }
    }
    Err(SkyError::KeplerNotConverged {
        eccentricity,
        iterations: KEPLER_MAX_ITERATIONS,
        residual: delta.abs(),
    })
}

/// True anomaly in `[0, 2π)` from the eccentric anomaly.
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let factor = ((1.0 + eccentricity) / (1.0 - eccentricity)).sqrt();
    normalize_radians(2.0 * (factor * (0.5 * eccentric_anomaly).tan()).atan())
}

// ═══════════════════════════════════════════════════════════════════════════
// Positions
// ═══════════════════════════════════════════════════════════════════════════

/// Heliocentric ecliptic rectangular coordinates, AU.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Heliocentric {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Radius vector.
    pub radius_au: f64,
    /// True anomaly, radians.
    pub true_anomaly: f64,
}

/// Heliocentric position of `planet` at `d` days after J2000.0.
///
/// The Earth is kept in the ecliptic plane (`z = 0`).
pub fn heliocentric(planet: Planet, d: Time<J2K>) -> SkyResult<Heliocentric> {
    let el = planet.elements();
    let elements_offset = ELEMENTS_EPOCH_JD - ECLIPTIC_EPOCH_JD;

    let perihelion = deg_to_rad(el.perihelion_deg);
    let node = deg_to_rad(el.ascending_node_deg);
    let inclination = deg_to_rad(el.inclination_deg);
    let e = el.eccentricity;

    let mean_anomaly = normalize_radians(
        deg_to_rad(el.daily_motion_deg) * (d.value() - elements_offset)
            + deg_to_rad(el.mean_longitude_deg)
            - perihelion,
    );
    let v = true_anomaly(solve_kepler(mean_anomaly, e)?, e);
    let r = el.semi_major_axis_au * (1.0 - e * e) / (1.0 + e * v.cos());

    let (x, y, z) = match planet {
        Planet::Earth => {
            let lon = v + perihelion;
            (r * lon.cos(), r * lon.sin(), 0.0)
        }
        _ => {
            let u = v + perihelion - node;
            (
                r * (node.cos() * u.cos() - node.sin() * u.sin() * inclination.cos()),
                r * (node.sin() * u.cos() + node.cos() * u.sin() * inclination.cos()),
                r * (u.sin() * inclination.sin()),
            )
        }
    };

    log::trace!(
        "{planet}: M = {mean_anomaly:.6}, v = {v:.6}, r = {r:.6}, xyz = ({x:.6}, {y:.6}, {z:.6})"
    );

    Ok(Heliocentric {
        x,
        y,
        z,
        radius_au: r,
        true_anomaly: v,
    })
}

/// Geocentric equatorial position of a planet at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PlanetPosition {
    pub planet: Planet,
    pub at: Time<J2K>,
    pub equatorial: Equatorial,
    pub distance_au: f64,
}

impl PlanetPosition {
    /// Sine of the altitude above the observer's horizon at this instant.
    pub fn sin_altitude(&self, location: &GeoLocation) -> f64 {
        local_altitude(
            location,
            self.at.to::<MJD>(),
            self.equatorial.ra_hours,
            self.equatorial.dec_deg,
        )
    }

    /// Altitude in degrees.
    pub fn altitude_deg(&self, location: &GeoLocation) -> f64 {
        rad_to_deg(self.sin_altitude(location).clamp(-1.0, 1.0).asin())
    }

    pub fn is_above_horizon(&self, location: &GeoLocation) -> bool {
        self.sin_altitude(location) > 0.0
    }
}

/// Geocentric RA, Dec and distance of `planet` at `d` days after J2000.0.
pub fn geocentric(planet: Planet, d: Time<J2K>) -> SkyResult<PlanetPosition> {
    if planet == Planet::Earth {
        return Err(SkyError::ObserverBody {
            planet: planet.name(),
        });
    }
    let earth = heliocentric(Planet::Earth, d)?;
    let body = heliocentric(planet, d)?;

    let xg = body.x - earth.x;
    let yg = body.y - earth.y;
    let zg = body.z - earth.z;

    let ecl = deg_to_rad(OBLIQUITY_J2000_DEG);
    let xeq = xg;
    let yeq = yg * ecl.cos() - zg * ecl.sin();
    let zeq = yg * ecl.sin() + zg * ecl.cos();

    let ra_hours = rad_to_deg(atan2_positive(yeq, xeq)) / 15.0;
    let dec_deg = rad_to_deg((zeq / xeq.hypot(yeq)).atan());
    let distance_au = (xeq * xeq + yeq * yeq + zeq * zeq).sqrt();

    log::debug!("{planet}: RA {ra_hours:.4} h, Dec {dec_deg:.4}°, {distance_au:.4} AU");

    Ok(PlanetPosition {
        planet,
        at: d,
        equatorial: Equatorial { ra_hours, dec_deg },
        distance_au,
    })
}

/// Positions of every observable planet.  One failure does not hide the rest.
pub fn all_planets(d: Time<J2K>) -> Vec<(Planet, SkyResult<PlanetPosition>)> {
    Planet::OBSERVABLE
        .into_iter()
        .map(|p| (p, geocentric(p, d)))
        .collect()
}

/// Convenience: geocentric position at a civil Julian Date.
pub fn geocentric_at(planet: Planet, jd: Time<JD>) -> SkyResult<PlanetPosition> {
    geocentric(planet, jd.to::<J2K>())
}
