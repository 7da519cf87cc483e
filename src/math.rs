// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Angle helpers and the three-point quadratic fit.
//!
//! Angles are plain `f64` in this crate; the helpers here are the only place
//! that converts between degrees and radians.

use std::f64::consts::{PI, TAU};

/// Fractional part of `x`, always in `[0, 1)`, also for negative input.
#[inline]
pub fn fractional_part(x: f64) -> f64 {
    let part = x - x.floor();
    // floor() of a tiny negative value can round `part` up to exactly 1.0
    if part >= 1.0 {
        0.0
    } else {
        part
    }
}

/// Reduce an angle in degrees to `[0, 360)`.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    360.0 * fractional_part(degrees / 360.0)
}

/// Reduce an angle in radians to `[0, 2π)`.
#[inline]
pub fn normalize_radians(radians: f64) -> f64 {
    TAU * fractional_part(radians / TAU)
}

#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * 180.0 / PI
}

#[inline]
pub fn sin_deg(degrees: f64) -> f64 {
    deg_to_rad(degrees).sin()
}

#[inline]
pub fn cos_deg(degrees: f64) -> f64 {
    deg_to_rad(degrees).cos()
}

/// Arc tangent of `y / x` placed in `[0, 2π)` by the signs of both inputs.
pub fn atan2_positive(y: f64, x: f64) -> f64 {
    if x == 0.0 {
        return match y.partial_cmp(&0.0) {
            Some(std::cmp::Ordering::Greater) => PI / 2.0,
            Some(std::cmp::Ordering::Less) => 3.0 * PI / 2.0,
            _ => 0.0,
        };
    }
    let mut a = (y / x).atan();
    if x < 0.0 {
        a += PI;
    }
    if y < 0.0 && x > 0.0 {
        a += TAU;
    }
    a
}

// ═══════════════════════════════════════════════════════════════════════════
// Quadratic interpolation
// ═══════════════════════════════════════════════════════════════════════════

/// Parabola through three equally spaced samples at `x = −1, 0, +1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticFit {
    /// Abscissa of the vertex (axis of symmetry).
    pub x_extreme: f64,
    /// Ordinate at the vertex; negative means a minimum below zero.
    pub y_extreme: f64,
    /// Left root.  Replaced by the right root when the left one lies below −1.
    pub root1: f64,
    /// Right root.
    pub root2: f64,
    /// Number of roots within `[−1, +1]` (0, 1 or 2).
    pub count: u8,
}

/// Fits `y = a·x² + b·x + c` through `(−1, y_minus)`, `(0, y0)`, `(+1, y_plus)`
/// and locates its extremum and roots.
///
/// Collinear samples (`a = 0`) fall back to the straight line: at most one
/// root, and the "extreme" is reported at `x = 0`.
pub fn quad(y_minus: f64, y0: f64, y_plus: f64) -> QuadraticFit {
    let a = 0.5 * (y_plus + y_minus) - y0;
    let b = 0.5 * (y_plus - y_minus);
    let c = y0;

    if a.abs() < f64::EPSILON * (b.abs() + c.abs()).max(1e-300) {
        return linear_fit(b, c);
    }

    let x_extreme = -b / (2.0 * a);
    let y_extreme = (a * x_extreme + b) * x_extreme + c;

    let mut fit = QuadraticFit {
        x_extreme,
        y_extreme,
        root1: 0.0,
        root2: 0.0,
        count: 0,
    };

    let dis = b * b - 4.0 * a * c;
    if dis > 0.0 {
        let dx = 0.5 * dis.sqrt() / a.abs();
        fit.root1 = x_extreme - dx;
        fit.root2 = x_extreme + dx;
        if fit.root1.abs() <= 1.0 {
            fit.count += 1;
        }
        if fit.root2.abs() <= 1.0 {
            fit.count += 1;
        }
        if fit.root1 < -1.0 {
            fit.root1 = fit.root2;
        }
    }
    fit
}

fn linear_fit(b: f64, c: f64) -> QuadraticFit {
    let mut fit = QuadraticFit {
        x_extreme: 0.0,
        y_extreme: c,
        root1: 0.0,
        root2: 0.0,
        count: 0,
    };
    if b != 0.0 {
        let root = -c / b;
        fit.root1 = root;
        fit.root2 = root;
        if root.abs() <= 1.0 {
            fit.count = 1;
        }
    }
    fit
}
