// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Moon phases and low-precision Sun/Moon positions
//!
//! Two levels of phase information are provided:
//!
//! * [`MoonPhaseSample`]: where in the synodic month a Julian Date falls,
//!   counted in whole days from the reference new moon of 2000-01-06.
//! * [`next_phase_instant`]: the instant of the next New, First Quarter,
//!   Full or Last Quarter, from the mean-phase polynomial of Meeus
//!   (*Astronomical Algorithms*, ch. 49) plus its periodic and planetary
//!   corrections.  The series runs in dynamical time and is brought back to
//!   the civil axis through [`JDE`](crate::JDE).
//!
//! [`LowPrecisionMoon`] and [`LowPrecisionSun`] give equatorial positions good
//! to a few arc-minutes for a few centuries around J2000.0, which is enough
//! for the rise/set search.

use crate::instant::Time;
use crate::math::{deg_to_rad, fractional_part, normalize_degrees};
use crate::riseset::{Equatorial, EquatorialSource};
use crate::scales::{JD, JDE};
use qtty::Centuries;
use std::cmp::Ordering;
use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Mean synodic month in days.
pub const SYNODIC_MONTH: f64 = 29.530_587_705_76;

/// Age of the Moon at Full, in days.
const FULL_AGE: f64 = 14.765;

/// Civil midnight before the new moon of 2000-01-06.
const REFERENCE_NEW_MOON_JD: f64 = 2_451_549.5;

/// Synodic months per year, scale of the lunation number `K`.
const LUNATIONS_PER_YEAR: f64 = 12.3685;

/// Lunations per Julian century.
const LUNATIONS_PER_CENTURY: f64 = 1236.85;

/// Limit on `K` adjustments when bracketing the next phase.
const MAX_K_STEPS: usize = 8;

// ═══════════════════════════════════════════════════════════════════════════
// Phase enumeration
// ═══════════════════════════════════════════════════════════════════════════

/// The four principal phases, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum MoonPhase {
    New,
    WaxingQuarter,
    Full,
    WaningQuarter,
}

impl MoonPhase {
    pub const ALL: [MoonPhase; 4] = [
        MoonPhase::New,
        MoonPhase::WaxingQuarter,
        MoonPhase::Full,
        MoonPhase::WaningQuarter,
    ];

    /// Position in the cycle, 0 for New through 3 for the waning quarter.
    #[inline]
    pub const fn index(&self) -> usize {
        match self {
            MoonPhase::New => 0,
            MoonPhase::WaxingQuarter => 1,
            MoonPhase::Full => 2,
            MoonPhase::WaningQuarter => 3,
        }
    }

    /// Phase at `index` modulo 4.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    #[inline]
    pub const fn next(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Fraction of a lunation this phase adds to an integer `K`.
    #[inline]
    fn k_offset(&self) -> f64 {
        self.index() as f64 * 0.25
    }

    pub const fn name(&self) -> &'static str {
        match self {
            MoonPhase::New => "New Moon",
            MoonPhase::WaxingQuarter => "Waxing Quarter",
            MoonPhase::Full => "Full Moon",
            MoonPhase::WaningQuarter => "Waning Quarter",
        }
    }
}

impl std::fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Phase sample
// ═══════════════════════════════════════════════════════════════════════════

/// Position of a Julian Date within the mean synodic month.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MoonPhaseSample {
    pub julian: Time<JD>,
    /// Whole days since the reference new moon (truncated toward zero).
    pub days_since: i64,
    /// `days_since` in synodic months.
    pub new_moons: f64,
    /// Age of the Moon in days, `[0, SYNODIC_MONTH)`.
    pub days_from_new: f64,
    /// Age as a percentage of the synodic month, `[0, 100)`.
    pub phase_percent: f64,
}

/// Descriptive phase, as one would read it off a calendar.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum PhaseState {
    /// Within about a day of New.
    New { percent: f64 },
    /// Within half a day of Full.
    Full { percent: f64 },
    Waxing { percent: f64, days_to_full: f64 },
    Waning { percent: f64, days_to_new: f64 },
}

impl MoonPhaseSample {
    pub fn at(julian: Time<JD>) -> Self {
        let days_since = (julian.value() - REFERENCE_NEW_MOON_JD).trunc() as i64;
        let new_moons = days_since as f64 / SYNODIC_MONTH;
        let days_from_new = fractional_part(new_moons) * SYNODIC_MONTH;
        let phase_percent = days_from_new / SYNODIC_MONTH * 100.0;
        log::trace!(
            "phase sample {}: {days_since} days since 2000-01-06, {new_moons:.4} new moons",
            julian.value()
        );
        Self {
            julian,
            days_since,
            new_moons,
            days_from_new,
            phase_percent,
        }
    }

    /// The principal phase the Moon is heading toward.
    pub fn upcoming_phase(&self) -> MoonPhase {
        match self.phase_percent {
            p if p < 25.0 => MoonPhase::WaxingQuarter,
            p if p < 50.0 => MoonPhase::Full,
            p if p < 75.0 => MoonPhase::WaningQuarter,
            _ => MoonPhase::New,
        }
    }

    /// Illumination estimate: rises linearly to 100 at Full, back to 0 at New.
    pub fn illuminated_percent(&self) -> f64 {
        if self.phase_percent < 50.0 {
            self.phase_percent * 2.0
        } else {
            100.0 - (self.phase_percent - 50.0) * 2.0
        }
    }

    pub fn state(&self) -> PhaseState {
        let dfn = self.days_from_new;
        if dfn < 1.0 || dfn > 28.53 {
            PhaseState::New {
                percent: self.phase_percent,
            }
        } else if (dfn - FULL_AGE).abs() < 0.5 {
            PhaseState::Full {
                percent: self.illuminated_percent(),
            }
        } else if self.phase_percent < 50.0 {
            PhaseState::Waxing {
                percent: self.illuminated_percent(),
                days_to_full: FULL_AGE - dfn,
            }
        } else {
            PhaseState::Waning {
                percent: self.illuminated_percent(),
                days_to_new: SYNODIC_MONTH - dfn,
            }
        }
    }
}

/// Phase sample at `julian` together with the upcoming principal phase.
pub fn current_phase(julian: Time<JD>) -> (MoonPhaseSample, MoonPhase) {
    let sample = MoonPhaseSample::at(julian);
    let upcoming = sample.upcoming_phase();
    (sample, upcoming)
}

// ═══════════════════════════════════════════════════════════════════════════
// Next principal phase
// ═══════════════════════════════════════════════════════════════════════════

/// `coeff · E^e_power · sin(m·M + ms·M′ + f·F + om·Ω)`
struct PeriodicTerm {
    coeff: f64,
    e_power: i32,
    m: f64,
    ms: f64,
    f: f64,
    om: f64,
}

const fn term(coeff: f64, e_power: i32, m: f64, ms: f64, f: f64, om: f64) -> PeriodicTerm {
    PeriodicTerm {
        coeff,
        e_power,
        m,
        ms,
        f,
        om,
    }
}

#[rustfmt::skip]
const NEW_MOON_TERMS: [PeriodicTerm; 25] = [
    term(-0.40720, 0,  0.0, 1.0,  0.0, 0.0),
    term( 0.17241, 1,  1.0, 0.0,  0.0, 0.0),
    term( 0.01608, 0,  0.0, 2.0,  0.0, 0.0),
    term( 0.01039, 0,  0.0, 0.0,  2.0, 0.0),
    term( 0.00739, 1, -1.0, 1.0,  0.0, 0.0),
    term(-0.00514, 1,  1.0, 1.0,  0.0, 0.0),
    term( 0.00208, 2,  2.0, 0.0,  0.0, 0.0),
    term(-0.00111, 0,  0.0, 1.0, -2.0, 0.0),
    term(-0.00057, 0,  0.0, 1.0,  2.0, 0.0),
    term( 0.00056, 1,  1.0, 2.0,  0.0, 0.0),
    term(-0.00042, 0,  0.0, 3.0,  0.0, 0.0),
    term( 0.00042, 1,  1.0, 0.0,  2.0, 0.0),
    term( 0.00038, 1,  1.0, 0.0, -2.0, 0.0),
    term(-0.00024, 1, -1.0, 2.0,  0.0, 0.0),
    term(-0.00017, 0,  0.0, 0.0,  0.0, 1.0),
    term(-0.00007, 0,  2.0, 1.0,  0.0, 0.0),
    term( 0.00004, 0,  0.0, 2.0, -2.0, 0.0),
    term( 0.00004, 0,  3.0, 0.0,  0.0, 0.0),
    term( 0.00003, 0,  1.0, 1.0, -2.0, 0.0),
    term( 0.00003, 0,  0.0, 2.0,  2.0, 0.0),
    term(-0.00003, 0,  1.0, 1.0,  2.0, 0.0),
    term( 0.00003, 0, -1.0, 1.0,  2.0, 0.0),
    term(-0.00002, 0, -1.0, 1.0, -2.0, 0.0),
    term(-0.00002, 0,  1.0, 3.0,  0.0, 0.0),
    term( 0.00002, 0,  0.0, 4.0,  0.0, 0.0),
];

#[rustfmt::skip]
const FULL_MOON_TERMS: [PeriodicTerm; 25] = [
    term(-0.40614, 0,  0.0, 1.0,  0.0, 0.0),
    term( 0.17302, 1,  1.0, 0.0,  0.0, 0.0),
    term( 0.01614, 0,  0.0, 2.0,  0.0, 0.0),
    term( 0.01043, 0,  0.0, 0.0,  2.0, 0.0),
    term( 0.00734, 1, -1.0, 1.0,  0.0, 0.0),
    term(-0.00515, 1,  1.0, 1.0,  0.0, 0.0),
    term( 0.00209, 2,  2.0, 0.0,  0.0, 0.0),
    term(-0.00111, 0,  0.0, 1.0, -2.0, 0.0),
    term(-0.00057, 0,  0.0, 1.0,  2.0, 0.0),
    term( 0.00056, 1,  1.0, 2.0,  0.0, 0.0),
    term(-0.00042, 0,  0.0, 3.0,  0.0, 0.0),
    term( 0.00042, 1,  1.0, 0.0,  2.0, 0.0),
    term( 0.00038, 1,  1.0, 0.0, -2.0, 0.0),
    term(-0.00024, 1, -1.0, 2.0,  0.0, 0.0),
    term(-0.00017, 0,  0.0, 0.0,  0.0, 1.0),
    term(-0.00007, 0,  2.0, 1.0,  0.0, 0.0),
    term( 0.00004, 0,  0.0, 2.0, -2.0, 0.0),
    term( 0.00004, 0,  3.0, 0.0,  0.0, 0.0),
    term( 0.00003, 0,  1.0, 1.0, -2.0, 0.0),
    term( 0.00003, 0,  0.0, 2.0,  2.0, 0.0),
    term(-0.00003, 0,  1.0, 1.0,  2.0, 0.0),
    term( 0.00003, 0, -1.0, 1.0,  2.0, 0.0),
    term(-0.00002, 0, -1.0, 1.0, -2.0, 0.0),
    term(-0.00002, 0,  1.0, 3.0,  0.0, 0.0),
    term( 0.00002, 0,  0.0, 4.0,  0.0, 0.0),
];

#[rustfmt::skip]
const QUARTER_TERMS: [PeriodicTerm; 25] = [
    term(-0.62801, 0,  0.0, 1.0,  0.0, 0.0),
    term( 0.17172, 1,  1.0, 0.0,  0.0, 0.0),
    term(-0.01183, 1,  1.0, 1.0,  0.0, 0.0),
    term( 0.00862, 0,  0.0, 2.0,  0.0, 0.0),
    term( 0.00804, 0,  0.0, 0.0,  2.0, 0.0),
    term( 0.00454, 1, -1.0, 1.0,  0.0, 0.0),
    term( 0.00204, 2,  2.0, 0.0,  0.0, 0.0),
    term(-0.00180, 0,  0.0, 1.0, -2.0, 0.0),
    term(-0.00070, 0,  0.0, 1.0,  2.0, 0.0),
    term(-0.00040, 0,  0.0, 3.0,  0.0, 0.0),
    term(-0.00034, 1, -1.0, 2.0,  0.0, 0.0),
    term( 0.00032, 1,  1.0, 0.0,  2.0, 0.0),
    term( 0.00032, 1,  1.0, 0.0, -2.0, 0.0),
    term(-0.00028, 2,  2.0, 1.0,  0.0, 0.0),
    term( 0.00027, 1,  1.0, 2.0,  0.0, 0.0),
    term(-0.00017, 0,  0.0, 0.0,  0.0, 1.0),
    term(-0.00005, 0, -1.0, 1.0, -2.0, 0.0),
    term( 0.00004, 0,  0.0, 2.0,  2.0, 0.0),
    term(-0.00004, 0,  1.0, 1.0,  2.0, 0.0),
    term( 0.00004, 0, -2.0, 1.0,  0.0, 0.0),
    term( 0.00003, 0,  1.0, 1.0, -2.0, 0.0),
    term( 0.00003, 0,  3.0, 0.0,  0.0, 0.0),
    term( 0.00002, 0,  0.0, 2.0, -2.0, 0.0),
    term( 0.00002, 0, -1.0, 1.0,  2.0, 0.0),
    term(-0.00002, 0,  1.0, 3.0,  0.0, 0.0),
];

/// Planetary arguments A1–A14: `(base, rate per lunation, coefficient)`.
/// A1 also carries `−0.009173·T²`.
#[rustfmt::skip]
const PLANETARY_TERMS: [(f64, f64, f64); 14] = [
    (299.77,  0.107_408, 0.000_325),
    (251.88,  0.016_321, 0.000_165),
    (251.83, 26.651_886, 0.000_164),
    (349.42, 36.412_478, 0.000_126),
    ( 84.66, 18.206_239, 0.000_110),
    (141.74, 53.303_771, 0.000_062),
    (207.14,  2.453_732, 0.000_060),
    (154.84,  7.306_860, 0.000_056),
    ( 34.52, 27.261_239, 0.000_047),
    (207.19,  0.121_824, 0.000_042),
    (291.34,  1.844_379, 0.000_040),
    (161.72, 24.198_154, 0.000_037),
    (239.56, 25.513_099, 0.000_035),
    (331.55,  3.592_518, 0.000_023),
];

#[inline]
fn radians(degrees: f64) -> f64 {
    deg_to_rad(normalize_degrees(degrees))
}

/// Mean phase for lunation number `K` (JDE).
fn mean_phase_jde(k: f64) -> f64 {
    let t = k / LUNATIONS_PER_CENTURY;
    2_451_550.097_65 + 29.530_588_853 * k + 0.000_133_7 * t.powi(2) - 0.000_000_15 * t.powi(3)
        + 0.000_000_000_73 * t.powi(4)
}

/// Refined phase instant for `K`, on the civil axis.
fn refined_phase(phase: MoonPhase, k: f64) -> Time<JD> {
    let mean = mean_phase_jde(k);
    let t = k / LUNATIONS_PER_CENTURY;
    let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);

    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let m = radians(2.5534 + 29.105_356_69 * k - 0.000_021_8 * t2 - 0.000_000_11 * t3);
    let ms = radians(
        201.5643 + 385.816_935_28 * k + 0.010_743_8 * t2 + 0.000_012_39 * t3
            - 0.000_000_058 * t4,
    );
    let f = radians(
        160.7108 + 390.670_502_74 * k - 0.001_634_1 * t2 - 0.000_002_27 * t3
            + 0.000_000_011 * t4,
    );
    let om = radians(124.7746 - 1.563_755_8 * k + 0.002_069_1 * t2 + 0.000_002_15 * t3);

    let planetary: f64 = PLANETARY_TERMS
        .iter()
        .enumerate()
        .map(|(i, &(base, rate, coeff))| {
            let quadratic = if i == 0 { -0.009_173 * t2 } else { 0.0 };
            coeff * radians(base + rate * k + quadratic).sin()
        })
        .sum();

    let table: &[PeriodicTerm] = match phase {
        MoonPhase::New => &NEW_MOON_TERMS,
        MoonPhase::Full => &FULL_MOON_TERMS,
        MoonPhase::WaxingQuarter | MoonPhase::WaningQuarter => &QUARTER_TERMS,
    };
    let periodic: f64 = table
        .iter()
        .map(|p| {
            let arg = p.m * m + p.ms * ms + p.f * f + p.om * om;
            p.coeff * e.powi(p.e_power) * arg.sin()
        })
        .sum();

    let w = match phase {
        MoonPhase::New | MoonPhase::Full => 0.0,
        MoonPhase::WaxingQuarter | MoonPhase::WaningQuarter => {
            let w = 0.003_06 - 0.000_38 * e * m.cos() + 0.000_26 * ms.cos()
                - 0.000_02 * (ms - m).cos()
                + 0.000_02 * (ms + m).cos()
                + 0.000_02 * (2.0 * f).cos();
            if phase == MoonPhase::WaningQuarter {
                -w
            } else {
                w
            }
        }
    };

    let jde = Time::<JDE>::new(mean + planetary + periodic + w);
    log::trace!(
        "{phase} K = {k}: mean JDE = {mean:.5}, planetary = {planetary:.6}, periodic = {periodic:.6}, W = {w:.6}, ΔT = {}",
        jde.delta_t()
    );
    jde.to::<JD>()
}

/// Lunation number `K` of the first `phase` whose refined instant is at or
/// after `julian`.
fn lunation_for_next(phase: MoonPhase, julian: Time<JD>) -> f64 {
    let estimate = ((julian.decimal_year() - 2000.0) * LUNATIONS_PER_YEAR).floor();
    let mut k = estimate + phase.k_offset();

    for _ in 0..MAX_K_STEPS {
        if refined_phase(phase, k) >= julian {
            break;
        }
        k += 1.0;
    }
    for _ in 0..MAX_K_STEPS {
        if refined_phase(phase, k - 1.0) < julian {
            break;
        }
        k -= 1.0;
    }
    log::debug!("next {phase} after {}: K = {k}", julian.value());
    k
}

/// Instant of the first `phase` at or after `julian`.
pub fn next_phase_instant(phase: MoonPhase, julian: Time<JD>) -> Time<JD> {
    refined_phase(phase, lunation_for_next(phase, julian))
}

/// The principal phase whose refined instant comes first at or after `julian`.
///
/// Unlike [`MoonPhaseSample::upcoming_phase`], which reads the mean synodic
/// age, this never passes over a phase that is only hours away.
pub fn next_principal_phase(julian: Time<JD>) -> MoonPhase {
    MoonPhase::ALL
        .into_iter()
        .map(|phase| (phase, next_phase_instant(phase, julian)))
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .map_or(MoonPhase::New, |(phase, _)| phase)
}

// ═══════════════════════════════════════════════════════════════════════════
// Phase calendar
// ═══════════════════════════════════════════════════════════════════════════

/// How [`phase_calendar`] walks the lunations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseCalendarOptions {
    /// Number of events to list.
    pub count: usize,
    /// List successive occurrences of the starting phase only.
    pub lock_phase: bool,
    /// Whole lunations added to the first event (may be negative).
    pub cycle_offset: i32,
}

impl Default for PhaseCalendarOptions {
    fn default() -> Self {
        Self {
            count: 4,
            lock_phase: false,
            cycle_offset: 0,
        }
    }
}

/// One predicted principal phase.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PhaseEvent {
    pub phase: MoonPhase,
    /// Lunation number (plus phase quarter) since the new moon of 2000-01-06.
    pub lunation: f64,
    pub at: Time<JD>,
}

/// Upcoming principal phases starting with the next `start` after `julian`.
pub fn phase_calendar(
    start: MoonPhase,
    julian: Time<JD>,
    options: PhaseCalendarOptions,
) -> Vec<PhaseEvent> {
    let mut phase = start;
    let mut k = lunation_for_next(start, julian) + f64::from(options.cycle_offset);
    let mut events = Vec::with_capacity(options.count);

    for i in 0..options.count {
        if i > 0 {
            if options.lock_phase {
                k += 1.0;
            } else {
                phase = phase.next();
                k += 0.25;
            }
        }
        events.push(PhaseEvent {
            phase,
            lunation: k,
            at: refined_phase(phase, k),
        });
    }
    events
}

// ═══════════════════════════════════════════════════════════════════════════
// Low-precision positions
// ═══════════════════════════════════════════════════════════════════════════

const ARCSEC_PER_RADIAN: f64 = 206_264.806_2;
const COS_OBLIQUITY: f64 = 0.917_48;
const SIN_OBLIQUITY: f64 = 0.397_78;

/// Ecliptic (longitude, latitude) in radians → equatorial, fixed obliquity.
fn ecliptic_to_equatorial(longitude: f64, latitude: f64) -> Equatorial {
    let cb = latitude.cos();
    let x = cb * longitude.cos();
    let v = cb * longitude.sin();
    let w = latitude.sin();
    let y = COS_OBLIQUITY * v - SIN_OBLIQUITY * w;
    let z = SIN_OBLIQUITY * v + COS_OBLIQUITY * w;
    let rho = (1.0 - z * z).sqrt();

    let dec_deg = (z / rho).atan().to_degrees();
    let mut ra_hours = (48.0 / TAU) * (y / (x + rho)).atan();
    if ra_hours < 0.0 {
        ra_hours += 24.0;
    }
    Equatorial { ra_hours, dec_deg }
}

/// Moon position to about 5′ in RA and 1′ in declination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowPrecisionMoon;

impl EquatorialSource for LowPrecisionMoon {
    fn equatorial(&self, t: Centuries) -> Equatorial {
        let t = t.value();
        let l0 = fractional_part(0.606_433 + 1_336.855_225 * t);
        let l = TAU * fractional_part(0.374_897 + 1_325.552_41 * t);
        let ls = TAU * fractional_part(0.993_133 + 99.997_361 * t);
        let d = TAU * fractional_part(0.827_361 + 1_236.853_086 * t);
        let f = TAU * fractional_part(0.259_086 + 1_342.227_825 * t);

        let dl = 22_640.0 * l.sin() - 4_586.0 * (l - 2.0 * d).sin()
            + 2_370.0 * (2.0 * d).sin()
            + 769.0 * (2.0 * l).sin()
            - 668.0 * ls.sin()
            - 412.0 * (2.0 * f).sin()
            - 212.0 * (2.0 * l - 2.0 * d).sin()
            - 206.0 * (l + ls - 2.0 * d).sin()
            + 192.0 * (l + 2.0 * d).sin()
            - 165.0 * (ls - 2.0 * d).sin()
            - 125.0 * d.sin()
            - 110.0 * (l + ls).sin()
            + 148.0 * (l - ls).sin()
            - 55.0 * (2.0 * f - 2.0 * d).sin();

        let s = f + (dl + 412.0 * (2.0 * f).sin() + 541.0 * ls.sin()) / ARCSEC_PER_RADIAN;
        let h = f - 2.0 * d;
        let n = -526.0 * h.sin() + 44.0 * (l + h).sin() - 31.0 * (h - l).sin()
            - 23.0 * (ls + h).sin()
            + 11.0 * (h - ls).sin()
            - 25.0 * (f - 2.0 * l).sin()
            + 21.0 * (f - l).sin();

        let longitude = TAU * fractional_part(l0 + dl / 1_296_000.0);
        let latitude = (18_520.0 * s.sin() + n) / ARCSEC_PER_RADIAN;
        ecliptic_to_equatorial(longitude, latitude)
    }
}

/// Sun position to about 1′.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowPrecisionSun;

impl EquatorialSource for LowPrecisionSun {
    fn equatorial(&self, t: Centuries) -> Equatorial {
        let t = t.value();
        let m = TAU * fractional_part(0.993_133 + 99.997_361 * t);
        let dl = 6_893.0 * m.sin() + 72.0 * (2.0 * m).sin();
        let longitude =
            TAU * fractional_part(0.785_945_3 + m / TAU + (6_191.2 * t + dl) / 1_296_000.0);
        ecliptic_to_equatorial(longitude, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::date_to_julian_noon;

    #[test]
    fn phase_cycle_wraps() {
        assert_eq!(MoonPhase::WaningQuarter.next(), MoonPhase::New);
        assert_eq!(MoonPhase::from_index(6), MoonPhase::Full);
        assert_eq!(MoonPhase::Full.index(), 2);
    }

    #[test]
    fn sample_at_reference_is_new() {
        let s = MoonPhaseSample::at(Time::new(REFERENCE_NEW_MOON_JD));
        assert_eq!(s.days_since, 0);
        assert_eq!(s.phase_percent, 0.0);
        assert_eq!(s.upcoming_phase(), MoonPhase::WaxingQuarter);
        assert!(matches!(s.state(), PhaseState::New { .. }));
    }

    #[test]
    fn sample_before_reference_is_in_range() {
        let s = MoonPhaseSample::at(Time::new(REFERENCE_NEW_MOON_JD - 10.0));
        assert!((0.0..SYNODIC_MONTH).contains(&s.days_from_new));
        assert!((s.days_from_new - (SYNODIC_MONTH - 10.0)).abs() < 1e-9);
    }

    #[test]
    fn percent_monotonic_with_wrap() {
        let start = date_to_julian_noon(2017, 3, 1).value();
        let mut prev = MoonPhaseSample::at(Time::new(start)).phase_percent;
        let mut wraps = 0;
        for day in 1..60 {
            let p = MoonPhaseSample::at(Time::new(start + day as f64)).phase_percent;
            assert!((0.0..100.0).contains(&p));
            if p < prev {
                wraps += 1;
                assert!(p < 10.0 && prev > 90.0);
            }
            prev = p;
        }
        assert_eq!(wraps, 2);
    }

    #[test]
    fn state_describes_full_and_quarters() {
        let full = MoonPhaseSample::at(Time::new(REFERENCE_NEW_MOON_JD + 15.0));
        assert!(matches!(full.state(), PhaseState::Full { percent } if percent > 95.0));

        let waxing = MoonPhaseSample::at(Time::new(REFERENCE_NEW_MOON_JD + 7.0));
        match waxing.state() {
            PhaseState::Waxing { days_to_full, .. } => {
                assert!((days_to_full - (FULL_AGE - 7.0)).abs() < 1e-9)
            }
            other => panic!("expected waxing, got {other:?}"),
        }

        let waning = MoonPhaseSample::at(Time::new(REFERENCE_NEW_MOON_JD + 22.0));
        assert!(matches!(waning.state(), PhaseState::Waning { .. }));
        assert_eq!(waning.upcoming_phase(), MoonPhase::WaningQuarter);
    }

    #[test]
    fn new_moon_january_2000() {
        // 2000-01-06 18:14 UT
        let jd = next_phase_instant(MoonPhase::New, Time::new(2_451_545.0));
        assert!((jd.value() - 2_451_550.26).abs() < 0.01, "{}", jd.value());
    }

    #[test]
    fn full_moon_january_2000() {
        // 2000-01-21 04:40 UT
        let jd = next_phase_instant(MoonPhase::Full, Time::new(2_451_545.0));
        assert!((jd.value() - 2_451_564.694).abs() < 0.01, "{}", jd.value());
    }

    #[test]
    fn next_phase_not_before_query() {
        let query = Time::<JD>::new(2_451_550.5);
        let jd = next_phase_instant(MoonPhase::New, query);
        assert!(jd >= query);
        assert!((jd.value() - 2_451_580.04).abs() < 0.05, "{}", jd.value());
    }

    #[test]
    fn query_at_exact_phase_returns_it() {
        let first = next_phase_instant(MoonPhase::Full, Time::new(2_451_545.0));
        let again = next_phase_instant(MoonPhase::Full, first);
        assert!((again.value() - first.value()).abs() < 1e-9);
    }

    #[test]
    fn successive_phases_quarter_month_apart() {
        let events = phase_calendar(
            MoonPhase::New,
            Time::new(2_457_813.5),
            PhaseCalendarOptions::default(),
        );
        let phases: Vec<_> = events.iter().map(|e| e.phase).collect();
        assert_eq!(phases, MoonPhase::ALL.to_vec());
        for pair in events.windows(2) {
            let gap = pair[1].at.value() - pair[0].at.value();
            assert!((5.5..9.5).contains(&gap), "gap {gap}");
        }
    }

    #[test]
    fn locked_phase_steps_one_lunation() {
        let opts = PhaseCalendarOptions {
            count: 3,
            lock_phase: true,
            cycle_offset: 0,
        };
        let events = phase_calendar(MoonPhase::Full, Time::new(2_457_813.5), opts);
        assert!(events.iter().all(|e| e.phase == MoonPhase::Full));
        for pair in events.windows(2) {
            let gap = pair[1].at.value() - pair[0].at.value();
            assert!((gap - SYNODIC_MONTH).abs() < 0.6, "gap {gap}");
        }
    }

    #[test]
    fn cycle_offset_shifts_by_lunations() {
        let base = phase_calendar(MoonPhase::New, Time::new(2_457_813.5), PhaseCalendarOptions::default());
        let back = phase_calendar(
            MoonPhase::New,
            Time::new(2_457_813.5),
            PhaseCalendarOptions {
                cycle_offset: -2,
                ..Default::default()
            },
        );
        assert_eq!(back[0].lunation, base[0].lunation - 2.0);
        assert!(back[0].at < base[0].at);
    }

    #[test]
    fn low_precision_sun_at_j2000() {
        let eq = LowPrecisionSun.equatorial(Centuries::new(0.0));
        // RA 18h 45m, Dec −23° 01′
        assert!((eq.ra_hours - 18.75).abs() < 0.05, "{eq:?}");
        assert!((eq.dec_deg + 23.03).abs() < 0.1, "{eq:?}");
    }

    #[test]
    fn low_precision_moon_is_near_ecliptic() {
        for i in 0..20 {
            let eq = LowPrecisionMoon.equatorial(Centuries::new(i as f64 * 0.001));
            assert!((0.0..24.0).contains(&eq.ra_hours));
            assert!(eq.dec_deg.abs() < 29.0, "{eq:?}");
        }
    }
}
