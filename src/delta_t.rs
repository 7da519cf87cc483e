// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T): TT↔UT correction
//!
//! Piecewise model for **ΔT = TT − UT** as a function of the decimal year,
//! used to bring Moon-phase predictions (computed in dynamical time) back onto
//! the civil axis.
//!
//! | Years | Model |
//! |-------|-------|
//! | < 948 | Quadratic, Stephenson & Houlden (1986) |
//! | 948–1600 | Quadratic, Stephenson & Houlden (1986) |
//! | 1600–1800 | Biennial table (Meeus ch. 9), quadratic interpolation |
//! | 1800–1900 | Degree-10 polynomial |
//! | 1900–1988 | Degree-7 polynomial |
//! | 1988–2051 | Linear, +0.733 s/yr from 56.86 s at 1990 |
//! | > 2051 | Same line, extrapolated |
//!
//! The correction is applied **automatically** by the [`JDE`](super::JDE)
//! time scale marker.
//!
//! ## Valid Time Range
//! Beyond 2051 the linear term is an extrapolation; a debug diagnostic is
//! logged and the value is still returned.

use super::instant::Time;
use super::scales::JDE;
use qtty::Seconds;

/// Number of tabulated terms (biennial 1620–1800).
const TERMS: usize = 91;

/// Biennial ΔT table from 1620 to 1800 (in seconds), compiled by J. Meeus.
#[rustfmt::skip]
const DELTA_T: [Seconds; TERMS] = qtty::qtty_vec!(
    Seconds;
    124.0,115.0,106.0, 98.0, 91.0, 85.0, 79.0, 74.0, 70.0, 65.0,
     62.0, 58.0, 55.0, 53.0, 50.0, 48.0, 46.0, 44.0, 42.0, 40.0,
     37.0, 35.0, 33.0, 31.0, 28.0, 26.0, 24.0, 22.0, 20.0, 18.0,
     16.0, 14.0, 13.0, 12.0, 11.0, 10.0,  9.0,  9.0,  9.0,  9.0,
      9.0,  9.0,  9.0,  9.0, 10.0, 10.0, 10.0, 10.0, 10.0, 11.0,
     11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 12.0, 12.0, 12.0, 12.0,
     12.0, 12.0, 13.0, 13.0, 13.0, 13.0, 14.0, 14.0, 14.0, 15.0,
     15.0, 15.0, 15.0, 16.0, 16.0, 16.0, 16.0, 16.0, 17.0, 17.0,
     17.0, 17.0, 17.0, 17.0, 17.0, 17.0, 16.0, 16.0, 15.0, 14.0,
     13.7,
);

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Decimal year of a Julian Day, counted in Julian years from J2000.0.
#[inline]
pub fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - 2_451_545.0) / 365.25
}

// ------------------------------------------------------------------------------------
// ΔT Approximation Sections by Time Interval
// ------------------------------------------------------------------------------------

/// **Years < 948 CE**
#[inline]
fn delta_t_ancient(year: f64) -> Seconds {
    let t = (year - 2000.0) / 100.0;
    Seconds::new(2_715.6 + 573.36 * t + 46.5 * t * t)
}

/// **Years 948–1600 CE**
#[inline]
fn delta_t_medieval(year: f64) -> Seconds {
    let t = (year - 2000.0) / 100.0;
    Seconds::new(50.6 + 67.5 * t + 22.5 * t * t)
}

/// **Years 1600–1800**
/// Three-point interpolation in the biennial `DELTA_T` table.  Years before
/// the first entry take the 1620 value.
#[inline]
fn delta_t_table(year: f64) -> Seconds {
    const TABLE_START: f64 = 1_620.0;
    const STEP_YEARS: f64 = 2.0;

    let offset = (year.max(TABLE_START) - TABLE_START) / STEP_YEARS;
    let i = (offset.floor() as usize).min(TERMS - 3);
    let a: Seconds = DELTA_T[i + 1] - DELTA_T[i];
    let b: Seconds = DELTA_T[i + 2] - DELTA_T[i + 1];
    let c: Seconds = b - a;
    // Interpolation factor relative to the middle entry.
    let n = offset - (i + 1) as f64;
    DELTA_T[i + 1] + n / 2.0 * (a + b + n * c)
}

/// **Years 1800–1900**
#[inline]
fn delta_t_nineteenth(year: f64) -> Seconds {
    const C: [f64; 11] = [
        -0.000009, 0.003844, 0.083563, 0.865736, 4.867575, 15.845535, 31.332267, 38.291999,
        28.316289, 11.636204, 2.043794,
    ];
    let t = (year - 1900.0) / 100.0;
    Seconds::new(horner(&C, t) * SECONDS_PER_DAY)
}

/// **Years 1900–1988**
#[inline]
fn delta_t_twentieth(year: f64) -> Seconds {
    const C: [f64; 8] = [
        -0.00002, 0.000297, 0.025184, -0.181133, 0.55304, -0.861938, 0.677066, -0.212591,
    ];
    let t = (year - 1900.0) / 100.0;
    Seconds::new(horner(&C, t) * SECONDS_PER_DAY)
}

/// **Years ≥ 1988**
#[inline]
fn delta_t_modern(year: f64) -> Seconds {
    Seconds::new((year - 1990.0) * 6.6 / 9.0 + 56.86)
}

/// Evaluates `c[0] + c[1]·t + c[2]·t² + …`.
#[inline]
fn horner(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * t + c)
}

/// Returns **ΔT** in seconds for a decimal year.
pub fn delta_t_seconds(year: f64) -> Seconds {
    match year {
        y if y < 948.0 => delta_t_ancient(y),
        y if y <= 1_600.0 => delta_t_medieval(y),
        y if y < 1_800.0 => delta_t_table(y),
        y if y < 1_900.0 => delta_t_nineteenth(y),
        y if y < 1_988.0 => delta_t_twentieth(y),
        y if y < 2_051.0 => delta_t_modern(y),
        y => {
            log::debug!("ΔT for {y:.1} extrapolated past 2051");
            delta_t_modern(y)
        }
    }
}

// ── Time<JDE> convenience method ──────────────────────────────────────────

impl Time<JDE> {
    /// Returns **ΔT = TT − UT** in seconds for this dynamical epoch.
    #[inline]
    pub fn delta_t(&self) -> Seconds {
        delta_t_seconds(decimal_year(self.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(dt: Seconds, expected: f64, tol: f64) -> bool {
        (dt - Seconds::new(expected)).abs() < Seconds::new(tol)
    }

    #[test]
    fn delta_t_ancient_sample() {
        // T = -15 → 2715.6 − 8600.4 + 10462.5
        assert!(close(delta_t_seconds(500.0), 4_577.7, 1e-6));
    }

    #[test]
    fn delta_t_medieval_sample() {
        // T = -5 → 50.6 − 337.5 + 562.5
        assert!(close(delta_t_seconds(1_500.0), 275.6, 1e-6));
    }

    #[test]
    fn delta_t_table_hits_nodes() {
        assert!(close(delta_t_seconds(1_620.0), 124.0, 1e-9));
        assert!(close(delta_t_seconds(1_700.0), 9.0, 1e-9));
        assert!(close(delta_t_seconds(1_798.0), 14.0, 1e-9));
    }

    #[test]
    fn delta_t_table_before_first_entry() {
        assert!(close(delta_t_seconds(1_610.0), 124.0, 1e-9));
    }

    #[test]
    fn delta_t_continuous_at_1800() {
        let before = delta_t_seconds(1_799.999);
        let after = delta_t_seconds(1_800.0);
        assert!((before - after).abs() < Seconds::new(0.5));
    }

    #[test]
    fn delta_t_continuous_at_1988() {
        let before = delta_t_seconds(1_987.999);
        let after = delta_t_seconds(1_988.0);
        assert!((before - after).abs() < Seconds::new(1.0));
    }

    #[test]
    fn delta_t_2000() {
        // IERS reference value: ~63.83 s
        assert!(close(delta_t_seconds(2_000.0), 63.83, 0.5));
    }

    #[test]
    fn delta_t_extrapolated_keeps_line() {
        let y = 2_100.0;
        assert!(close(delta_t_seconds(y), (y - 1990.0) * 6.6 / 9.0 + 56.86, 1e-9));
    }

    #[test]
    fn delta_t_convenience_method() {
        let jde = Time::<JDE>::new(2_451_545.0);
        assert!(close(jde.delta_t(), 63.83, 0.5));
    }
}
