// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer configuration.
//!
//! Every engine takes the observer explicitly; nothing here is global.
//! With the `serde` feature the configuration can be read from TOML:
//!
//! ```toml
//! utc_offset_hours = -5.0
//!
//! [location]
//! latitude_deg = 42.81751
//! longitude_deg = -71.2781
//! elevation_ft = 400.0
//! ```

use crate::error::{SkyError, SkyResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the observer stands.
///
/// Longitude is **positive east**.  Elevation is in feet above sea level and
/// only affects the Sun's horizon dip.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoLocation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub elevation_ft: f64,
}

impl GeoLocation {
    /// Validated constructor.
    pub fn new(latitude_deg: f64, longitude_deg: f64, elevation_ft: f64) -> SkyResult<Self> {
        let loc = Self {
            latitude_deg,
            longitude_deg,
            elevation_ft,
        };
        loc.validate()?;
        Ok(loc)
    }

    /// Checks latitude, longitude and elevation ranges.
    pub fn validate(&self) -> SkyResult<()> {
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err(SkyError::Config(format!(
                "latitude {} outside [-90, 90]",
                self.latitude_deg
            )));
        }
        if !self.longitude_deg.is_finite() || self.longitude_deg.abs() > 180.0 {
            return Err(SkyError::Config(format!(
                "longitude {} outside [-180, 180]",
                self.longitude_deg
            )));
        }
        if !self.elevation_ft.is_finite() || self.elevation_ft < 0.0 {
            return Err(SkyError::Config(format!(
                "elevation {} ft must be non-negative",
                self.elevation_ft
            )));
        }
        Ok(())
    }
}

impl Default for GeoLocation {
    /// Nashua, New Hampshire.
    fn default() -> Self {
        Self {
            latitude_deg: 42.81751,
            longitude_deg: -71.2781,
            elevation_ft: 400.0,
        }
    }
}

/// Location plus the civil time-zone offset used to anchor "today".
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObserverConfig {
    pub location: GeoLocation,
    /// Hours east of UTC (EST is −5).
    #[cfg_attr(feature = "serde", serde(default))]
    pub utc_offset_hours: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            location: GeoLocation::default(),
            utc_offset_hours: -5.0,
        }
    }
}

impl ObserverConfig {
    /// Validated constructor.
    pub fn new(location: GeoLocation, utc_offset_hours: f64) -> SkyResult<Self> {
        let config = Self {
            location,
            utc_offset_hours,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SkyResult<()> {
        self.location.validate()?;
        if !self.utc_offset_hours.is_finite() || self.utc_offset_hours.abs() > 14.0 {
            return Err(SkyError::Config(format!(
                "UTC offset {} h outside [-14, 14]",
                self.utc_offset_hours
            )));
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> SkyResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| SkyError::Config(e.to_string()))?;
        config.validate()?;
        log::debug!(
            "observer at lat {:.4}, lon {:.4}, {} ft, UTC{:+}",
            config.location.latitude_deg,
            config.location.longitude_deg,
            config.location.elevation_ft,
            config.utc_offset_hours
        );
        Ok(config)
    }

    /// Reads and validates a TOML file.
    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<std::path::Path>) -> SkyResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SkyError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_location() {
        assert!(GeoLocation::new(91.0, 0.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, -180.5, 0.0).is_err());
        assert!(GeoLocation::new(0.0, 0.0, -1.0).is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0, 0.0).is_err());
        assert!(GeoLocation::new(-90.0, 180.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_offset() {
        assert!(ObserverConfig::new(GeoLocation::default(), 14.5).is_err());
        assert!(ObserverConfig::new(GeoLocation::default(), -12.0).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parses_toml() {
        let text = r#"
            utc_offset_hours = -5.0

            [location]
            latitude_deg = 42.81751
            longitude_deg = -71.2781
            elevation_ft = 400.0
        "#;
        let config = ObserverConfig::from_toml_str(text).unwrap();
        assert_eq!(config, ObserverConfig::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn toml_defaults_elevation_and_offset() {
        let text = "[location]\nlatitude_deg = 10.0\nlongitude_deg = 20.0\n";
        let config = ObserverConfig::from_toml_str(text).unwrap();
        assert_eq!(config.location.elevation_ft, 0.0);
        assert_eq!(config.utc_offset_hours, 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn toml_validation_error_is_config() {
        let text = "[location]\nlatitude_deg = 100.0\nlongitude_deg = 0.0\n";
        assert!(matches!(
            ObserverConfig::from_toml_str(text),
            Err(SkyError::Config(_))
        ));
    }
}
