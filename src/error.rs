// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`Parse`](SkyError::Parse) | date, clock and Julian-date string parsing |
//! | [`InvalidDate`](SkyError::InvalidDate) | calendar validation |
//! | [`KeplerNotConverged`](SkyError::KeplerNotConverged) | the Newton solver in [`planets`](crate::planets) |
//! | [`ObserverBody`](SkyError::ObserverBody) | geocentric queries for the Earth itself |
//! | [`Config`](SkyError::Config) | observer configuration load and validation |
//!
//! Polar "always above / always below" outcomes are ordinary values, not
//! errors.

use thiserror::Error;

/// What kind of text a [`SkyError::Parse`] failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseKind {
    /// `YYYY-MM-DD`
    Date,
    /// `HH:MM[:SS][am|pm]` or seconds since midnight.
    Clock,
    /// Decimal Julian Date.
    JulianDate,
}

impl std::fmt::Display for ParseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ParseKind::Date => "date",
            ParseKind::Clock => "clock time",
            ParseKind::JulianDate => "Julian date",
        })
    }
}

/// Unified error type for the crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkyError {
    /// Input text did not match the expected format.
    #[error("cannot parse {kind} from {input:?}: {reason}")]
    Parse {
        kind: ParseKind,
        input: String,
        reason: String,
    },

    /// Calendar date that does not exist (e.g. February 30, month 13).
    #[error("invalid date {year}-{month:02}-{day:02}: {reason}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        reason: &'static str,
    },

    /// Kepler's equation did not settle within the iteration cap.
    #[error("Kepler solver did not converge for e = {eccentricity} after {iterations} iterations (|ΔE| = {residual:e})")]
    KeplerNotConverged {
        eccentricity: f64,
        iterations: usize,
        residual: f64,
    },

    /// A geocentric position was requested for the observer's own planet.
    #[error("{planet} is the observer's body and has no geocentric position")]
    ObserverBody { planet: &'static str },

    /// Observer configuration could not be read or is out of range.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SkyError {
    pub(crate) fn parse(kind: ParseKind, input: &str, reason: impl Into<String>) -> Self {
        SkyError::Parse {
            kind,
            input: input.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type SkyResult<T> = Result<T, SkyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_message() {
        let err = SkyError::parse(ParseKind::Date, "2017-13", "expected three fields");
        assert_eq!(
            err.to_string(),
            "cannot parse date from \"2017-13\": expected three fields"
        );
    }

    #[test]
    fn invalid_date_message_pads_fields() {
        let err = SkyError::InvalidDate {
            year: 2023,
            month: 2,
            day: 29,
            reason: "day out of range for month",
        };
        assert_eq!(
            err.to_string(),
            "invalid date 2023-02-29: day out of range for month"
        );
    }
}
