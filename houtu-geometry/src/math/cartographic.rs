use std::fmt;

use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use crate::ellipsoid::Ellipsoid;

/// A position defined by longitude, latitude (radians) and height above the
/// ellipsoid (meters).
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cartographic {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
}
impl Cartographic {
    pub fn new(longitude: f64, latitude: f64, height: f64) -> Self {
        Cartographic::from_radians(longitude, latitude, height)
    }
    pub fn from_radians(longitude: f64, latitude: f64, height: f64) -> Self {
        Cartographic {
            longitude,
            latitude,
            height,
        }
    }
    pub fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Self {
        Cartographic {
            longitude: longitude.to_radians(),
            latitude: latitude.to_radians(),
            height,
        }
    }
    /// Same position with longitude and latitude in degrees.
    pub fn to_degrees(&self) -> Self {
        Cartographic {
            longitude: self.longitude.to_degrees(),
            latitude: self.latitude.to_degrees(),
            height: self.height,
        }
    }
    pub fn from_cartesian(cartesian: &DVec3, ellipsoid: Option<&Ellipsoid>) -> Option<Self> {
        let ellipsoid = ellipsoid.unwrap_or(&Ellipsoid::WGS84);
        ellipsoid.cartesian_to_cartographic(cartesian)
    }
    pub fn to_cartesian(&self, ellipsoid: Option<&Ellipsoid>) -> DVec3 {
        let ellipsoid = ellipsoid.unwrap_or(&Ellipsoid::WGS84);
        ellipsoid.cartographic_to_cartesian(self)
    }
    /// Component-wise absolute comparison.
    pub fn equals_epsilon(&self, right: &Cartographic, epsilon: f64) -> bool {
        (self.longitude - right.longitude).abs() <= epsilon
            && (self.latitude - right.latitude).abs() <= epsilon
            && (self.height - right.height).abs() <= epsilon
    }
}
impl fmt::Display for Cartographic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.longitude, self.latitude, self.height)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::math::{Cartesian3, EPSILON6};

    const SURFACE_CARTOGRAPHIC: Cartographic = Cartographic {
        longitude: 25.0 * PI / 180.0,
        latitude: 45.0 * PI / 180.0,
        height: 0.0,
    };
    const SURFACE_CARTESIAN: DVec3 = DVec3::new(
        4094327.7921465295,
        1909216.4044747739,
        4487348.4088659193,
    );

    #[test]
    fn to_cartesian_matches_ellipsoid() {
        let lon = 150.0_f64.to_radians();
        let lat = -40.0_f64.to_radians();
        let height = 100000.0;
        let ellipsoid = Ellipsoid::WGS84;
        let actual = Cartographic::new(lon, lat, height).to_cartesian(None);
        let expected = ellipsoid.cartographic_to_cartesian(&Cartographic::new(lon, lat, height));
        assert_eq!(actual, expected);
    }

    #[test]
    fn from_cartesian_work() {
        let c = Cartographic::from_cartesian(&SURFACE_CARTESIAN, None).unwrap();
        assert!(c.equals_epsilon(&SURFACE_CARTOGRAPHIC, EPSILON6));
        let back = c.to_cartesian(None);
        assert!(back.equals_epsilon(SURFACE_CARTESIAN, Some(0.0), Some(EPSILON6)));
    }

    #[test]
    fn from_cartesian_at_center_is_none() {
        assert!(Cartographic::from_cartesian(&DVec3::ZERO, None).is_none());
    }

    #[test]
    fn degrees_round_trip() {
        let c = Cartographic::from_degrees(-75.5, 40.25, 12.0);
        let degrees = c.to_degrees();
        assert!((degrees.longitude + 75.5).abs() < 1e-12);
        assert!((degrees.latitude - 40.25).abs() < 1e-12);
        assert_eq!(degrees.height, 12.0);
    }

    #[test]
    fn serializes_as_named_fields() {
        let c = Cartographic::new(0.5, -0.25, 100.0);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"longitude":0.5,"latitude":-0.25,"height":100.0}"#);
        let parsed: Cartographic = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, c);
    }
}
