// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # skyclock
//!
//! Moon phases, rise and set times, sunrise and planet positions for an
//! observer on the Earth, at amateur-ephemeris accuracy.
//!
//! Every engine takes a Julian Date on the civil (UT) axis, or an
//! [`Instant`] that wraps one, and returns plain values.  Nothing is printed
//! and no global state is read; the observer is passed in as an
//! [`ObserverConfig`].
//!
//! # Core types
//!
//! - [`Time<S>`]: an instant on the time scale `S`.
//! - [`JulianDate`], [`ModifiedJulianDate`], [`J2000Days`] and
//!   [`JulianEphemerisDay`]: aliases for the four scales.
//! - [`Instant`]: a Julian Date with its calendar breakdown, parsed from text.
//! - [`Almanac`]: every query for one observer.
//!
//! # Time scales
//!
//! | Marker | Scale | Axis |
//! |--------|-------|------|
//! | [`JD`] | Julian Date | civil |
//! | [`MJD`] | Modified Julian Date, `JD − 2 400 000.5` | civil |
//! | [`J2K`] | Days since 2000-01-01T12:00 | civil |
//! | [`JDE`] | Julian Ephemeris Day | dynamical, `JD + ΔT` |
//!
//! ```
//! use skyclock::{Almanac, Instant, ObserverConfig};
//!
//! let at: Instant = "2017-03-01 18:00".parse().unwrap();
//! let almanac = Almanac::new(ObserverConfig::default());
//! let (sample, next) = almanac.moon_phase(&at);
//! assert!(sample.phase_percent < 100.0);
//! println!("next principal phase: {next}");
//! ```
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`calendar`] | date ↔ Julian Day, MJD and J2000 day counts |
//! | [`math`] | angle helpers and the three-point quadratic fit |
//! | [`horizon`] | local sidereal time and altitude |
//! | [`riseset`] | hourly rise/set/twilight search |
//! | [`moon`] | synodic phase, Meeus principal phases, low-precision Sun/Moon |
//! | [`sun`] | sunrise equation and solar noon |
//! | [`planets`] | Kepler orbits and geocentric planet positions |
//! | [`civil`] | [`Instant`] and text parsing |
//! | [`config`] | observer location and TOML loading |
//! | [`almanac`] | the query facade |

pub mod almanac;
pub mod calendar;
pub mod civil;
pub mod config;
mod delta_t;
pub mod error;
pub mod horizon;
pub(crate) mod instant;
mod julian_date_ext;
pub mod math;
pub mod moon;
pub mod planets;
pub mod riseset;
pub(crate) mod scales;
pub mod sun;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use almanac::{Almanac, DailyRiseSet};
pub use calendar::{CalendarDate, ClockTime};
pub use civil::Instant;
pub use config::{GeoLocation, ObserverConfig};
pub use delta_t::{decimal_year, delta_t_seconds};
pub use error::{ParseKind, SkyError, SkyResult};
pub use instant::{Time, TimeScale};
pub use moon::{MoonPhase, MoonPhaseSample, PhaseCalendarOptions, PhaseEvent, PhaseState};
pub use planets::{Planet, PlanetPosition};
pub use riseset::{Crossing, Equatorial, HorizonThreshold, RiseSet};
pub use scales::{J2K, JD, JDE, MJD};
pub use sun::{SunDay, SunEvents};

// ── Type aliases ──────────────────────────────────────────────────────────

/// Julian Date on the civil axis.
///
/// `JulianDate::new(...)`, `JulianDate::J2000` and `.julian_centuries()`
/// are all available on this alias.
pub type JulianDate = Time<JD>;

/// Julian Ephemeris Day, the dynamical day count used by the Meeus series.
pub type JulianEphemerisDay = Time<JDE>;

/// Modified Julian Date, `JD − 2 400 000.5`.
pub type ModifiedJulianDate = Time<MJD>;

/// Days since J2000.0 (2000-01-01T12:00), the planet-engine argument `d`.
pub type J2000Days = Time<J2K>;
