use bevy::math::{DVec3, DVec4};

use crate::ellipsoid::Ellipsoid;

use super::{equals_epsilon, Cartographic};

/// Cesium-style helpers on top of glam's `DVec3`.
pub trait Cartesian3 {
    fn from_radians(
        longitude: f64,
        latitude: f64,
        height: Option<f64>,
        radii_squared: Option<DVec3>,
    ) -> DVec3;
    fn from_degrees(
        longitude: f64,
        latitude: f64,
        height: Option<f64>,
        radii_squared: Option<DVec3>,
    ) -> DVec3;
    fn from_cartesian4(vec4: DVec4) -> DVec3;
    fn equals_epsilon(
        &self,
        right: DVec3,
        relative_epsilon: Option<f64>,
        absolute_epsilon: Option<f64>,
    ) -> bool;
}
impl Cartesian3 for DVec3 {
    fn from_radians(
        longitude: f64,
        latitude: f64,
        height: Option<f64>,
        radii_squared: Option<DVec3>,
    ) -> DVec3 {
        let ellipsoid = radii_squared.map_or(Ellipsoid::WGS84, |r| {
            Ellipsoid::new(r.x.sqrt(), r.y.sqrt(), r.z.sqrt())
        });
        ellipsoid.cartographic_to_cartesian(&Cartographic::new(
            longitude,
            latitude,
            height.unwrap_or(0.0),
        ))
    }
    fn from_degrees(
        longitude: f64,
        latitude: f64,
        height: Option<f64>,
        radii_squared: Option<DVec3>,
    ) -> DVec3 {
        DVec3::from_radians(
            longitude.to_radians(),
            latitude.to_radians(),
            height,
            radii_squared,
        )
    }
    fn from_cartesian4(vec4: DVec4) -> DVec3 {
        vec4.truncate()
    }
    fn equals_epsilon(
        &self,
        right: DVec3,
        relative_epsilon: Option<f64>,
        absolute_epsilon: Option<f64>,
    ) -> bool {
        *self == right
            || equals_epsilon(self.x, right.x, relative_epsilon, absolute_epsilon)
                && equals_epsilon(self.y, right.y, relative_epsilon, absolute_epsilon)
                && equals_epsilon(self.z, right.z, relative_epsilon, absolute_epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPSILON1;

    #[test]
    fn from_degrees_matches_ellipsoid() {
        let lon = -115.0;
        let lat = 37.0;
        let height = 100000.0;
        let ellipsoid = Ellipsoid::WGS84;
        let actual = DVec3::from_degrees(lon, lat, Some(height), None);
        let expected =
            ellipsoid.cartographic_to_cartesian(&Cartographic::from_degrees(lon, lat, height));
        assert!(actual.equals_epsilon(expected, Some(0.0), Some(1e-8)));
    }

    #[test]
    fn from_radians_uses_radii() {
        let actual = DVec3::from_radians(0.0, 0.0, Some(1.0), Some(DVec3::ONE));
        assert_eq!(actual, DVec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn equals_epsilon_work() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        assert!(a.equals_epsilon(DVec3::new(1.0, 2.0, 3.0), Some(0.0), None));
        assert!(a.equals_epsilon(DVec3::new(1.05, 2.0, 3.0), Some(EPSILON1), None));
        assert!(!a.equals_epsilon(DVec3::new(2.0, 2.0, 3.0), Some(EPSILON1), None));
    }
}
