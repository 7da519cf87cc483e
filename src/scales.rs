// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! Each zero-sized type identifies a day count and encodes how values in
//! that count relate to the canonical **civil Julian Date**.
//!
//! | Marker | Description | Epoch (JD) |
//! |--------|-------------|------------|
//! | [`JD`] | Julian Date | 0.0 |
//! | [`MJD`] | Modified Julian Date | 2 400 000.5 |
//! | [`J2K`] | Days since J2000.0 noon | 2 451 545.0 |
//! | [`JDE`] | Julian Ephemeris Day | 0.0 + ΔT |

use super::instant::TimeScale;
use qtty::Days;

// ---------------------------------------------------------------------------
// Epoch counters
// ---------------------------------------------------------------------------

/// Julian Date, the identity scale.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl TimeScale for JD {
    const LABEL: &'static str = "Julian Day:";

    #[inline(always)]
    fn to_jd(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd(jd: Days) -> Days {
        jd
    }
}

/// Modified Julian Date: JD minus 2 400 000.5, i.e. days since
/// 1858-11-17T00:00.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct MJD;

/// The constant offset between JD and MJD: `JD = MJD + MJD_EPOCH`.
const MJD_EPOCH: Days = Days::new(2_400_000.5);

impl TimeScale for MJD {
    const LABEL: &'static str = "MJD";

    #[inline(always)]
    fn to_jd(value: Days) -> Days {
        value + MJD_EPOCH
    }

    #[inline(always)]
    fn from_jd(jd: Days) -> Days {
        jd - MJD_EPOCH
    }
}

/// Days elapsed since 2000-01-01T12:00 (J2000.0).
///
/// This is the `d` argument of the orbital-element and sunrise formulas.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct J2K;

const J2000_EPOCH: Days = Days::new(2_451_545.0);

impl TimeScale for J2K {
    const LABEL: &'static str = "J2000 +";

    #[inline(always)]
    fn to_jd(value: Days) -> Days {
        value + J2000_EPOCH
    }

    #[inline(always)]
    fn from_jd(jd: Days) -> Days {
        jd - J2000_EPOCH
    }
}

// ---------------------------------------------------------------------------
// Dynamical time
// ---------------------------------------------------------------------------

/// Julian Ephemeris Day: a Julian day on the uniform (TT) axis.
///
/// Converting to the civil axis subtracts **ΔT**; the inverse uses a
/// three-iteration fixed-point solver.  ΔT changes by well under a second per
/// year, so convergence is immediate.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JDE;

impl TimeScale for JDE {
    const LABEL: &'static str = "JDE";

    #[inline]
    fn to_jd(jde: Days) -> Days {
        let dt = super::delta_t::delta_t_seconds(super::delta_t::decimal_year(jde.value()));
        jde - dt.to::<qtty::Day>()
    }

    #[inline]
    fn from_jd(jd: Days) -> Days {
        // Solve jde − ΔT(jde) = jd.
        let mut jde = jd;
        for _ in 0..3 {
            let dt = super::delta_t::delta_t_seconds(super::delta_t::decimal_year(jde.value()));
            jde = jd + dt.to::<qtty::Day>();
        }
        jde
    }
}

// ---------------------------------------------------------------------------
// Cross-scale From/Into  (generated by macro)
// ---------------------------------------------------------------------------

/// Generate pairwise `From<Time<A>> for Time<B>` implementations.
macro_rules! impl_time_conversions {
    ($single:ty) => {};

    ($first:ty, $($rest:ty),+ $(,)?) => {
        $(
            impl From<super::instant::Time<$first>> for super::instant::Time<$rest> {
                #[inline]
                fn from(t: super::instant::Time<$first>) -> Self {
                    t.to::<$rest>()
                }
            }

            impl From<super::instant::Time<$rest>> for super::instant::Time<$first> {
                #[inline]
                fn from(t: super::instant::Time<$rest>) -> Self {
                    t.to::<$first>()
                }
            }
        )+

        impl_time_conversions!($($rest),+);
    };
}

impl_time_conversions!(JD, MJD, J2K, JDE);

#[cfg(test)]
mod tests {
    use super::super::instant::Time;
    use super::*;
    use qtty::{Second, Seconds};

    #[test]
    fn jd_mjd_roundtrip() {
        let jd = Time::<JD>::new(2_451_545.0);
        let mjd: Time<MJD> = jd.to::<MJD>();
        assert!((mjd.quantity() - Days::new(51_544.5)).abs() < Days::new(1e-10));
        let back: Time<JD> = mjd.to::<JD>();
        assert!((back.quantity() - Days::new(2_451_545.0)).abs() < Days::new(1e-10));
    }

    #[test]
    fn mjd_epoch_is_1858_midnight() {
        let mjd_zero = Time::<MJD>::new(0.0);
        assert!((mjd_zero.julian_day_value() - 2_400_000.5).abs() < 1e-12);
    }

    #[test]
    fn j2k_from_into() {
        let jd = Time::<JD>::new(2_457_813.5);
        let d: Time<J2K> = jd.into();
        assert!((d.value() - 6_268.5).abs() < 1e-9);
    }

    #[test]
    fn jde_is_ahead_of_civil_by_delta_t() {
        let jde = Time::<JDE>::new(2_451_545.0);
        let jd: Time<JD> = jde.to::<JD>();
        let offset = (jde.quantity() - jd.quantity()).to::<Second>();
        assert!(
            (offset - Seconds::new(64.19)).abs() < Seconds::new(1.0),
            "JDE−JD offset = {} s",
            offset
        );
    }

    #[test]
    fn jde_jd_roundtrip() {
        let jd = Time::<JD>::new(2_457_813.5);
        let jde: Time<JDE> = jd.to::<JDE>();
        let back: Time<JD> = jde.to::<JD>();
        assert!((back.quantity() - jd.quantity()).abs() < Days::new(1e-9));
    }
}
