use std::str::FromStr;

use bevy::log::warn;
use bevy::math::DVec3;

use crate::error::GeometryError;
use crate::math::{self, Cartographic, EPSILON1, EPSILON12, EPSILON14, EPSILON15, LUNAR_RADIUS};

/// Upper bound on Newton steps in [`Ellipsoid::scale_to_geodetic_surface`].
/// Well-conditioned input converges in a handful of steps.
pub const MAX_NEWTON_ITERATIONS: usize = 50;

/// A quadratic surface defined in Cartesian coordinates by
/// `(x / a)^2 + (y / b)^2 + (z / c)^2 = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    pub radii: DVec3,
    pub radii_squared: DVec3,
    pub one_over_radii: DVec3,
    pub one_over_radii_squared: DVec3,
    pub center_tolerance_squared: f64,
}
impl Default for Ellipsoid {
    fn default() -> Self {
        Ellipsoid::WGS84
    }
}
impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid::new(6378137.0, 6378137.0, 6356752.3142451793);
    pub const UNIT_SPHERE: Ellipsoid = Ellipsoid::new(1.0, 1.0, 1.0);
    pub const MOON: Ellipsoid = Ellipsoid::new(LUNAR_RADIUS, LUNAR_RADIUS, LUNAR_RADIUS);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Ellipsoid {
            radii: DVec3::new(x, y, z),
            radii_squared: DVec3::new(x * x, y * y, z * z),
            one_over_radii: DVec3::new(1.0 / x, 1.0 / y, 1.0 / z),
            one_over_radii_squared: DVec3::new(1.0 / (x * x), 1.0 / (y * y), 1.0 / (z * z)),
            center_tolerance_squared: EPSILON1,
        }
    }
    pub fn from_vec3(radii: DVec3) -> Self {
        Ellipsoid::new(radii.x, radii.y, radii.z)
    }
    pub fn minimum_radius(&self) -> f64 {
        self.radii.min_element()
    }
    pub fn maximum_radius(&self) -> f64 {
        self.radii.max_element()
    }
    /// Whether the x and y radii agree, i.e. the ellipsoid is a solid of
    /// revolution around its z axis.
    pub fn is_revolution_solid(&self) -> bool {
        math::equals_epsilon(self.radii.x, self.radii.y, Some(EPSILON15), None)
    }
    pub fn geocentric_surface_normal(&self, cartesian: &DVec3) -> DVec3 {
        cartesian.normalize()
    }
    pub fn geodetic_surface_normal_cartographic(&self, cartographic: &Cartographic) -> DVec3 {
        let longitude = cartographic.longitude;
        let latitude = cartographic.latitude;
        let cos_latitude = latitude.cos();
        DVec3::new(
            cos_latitude * longitude.cos(),
            cos_latitude * longitude.sin(),
            latitude.sin(),
        )
        .normalize()
    }
    /// Normal to the tangent plane of the surface at `cartesian`. `None` for
    /// the origin, where the direction is undefined.
    pub fn geodetic_surface_normal(&self, cartesian: &DVec3) -> Option<DVec3> {
        if cartesian.abs_diff_eq(DVec3::ZERO, EPSILON14) {
            return None;
        }
        Some((*cartesian * self.one_over_radii_squared).normalize())
    }
    pub fn cartographic_to_cartesian(&self, cartographic: &Cartographic) -> DVec3 {
        let n = self.geodetic_surface_normal_cartographic(cartographic);
        let k = self.radii_squared * n;
        let gamma = n.dot(k).sqrt();
        k / gamma + n * cartographic.height
    }
    pub fn cartographic_array_to_cartesian_array(
        &self,
        cartographics: &[Cartographic],
    ) -> Vec<DVec3> {
        cartographics
            .iter()
            .map(|c| self.cartographic_to_cartesian(c))
            .collect()
    }
    /// `None` when the position is too close to the center for a surface
    /// projection to be resolved.
    pub fn cartesian_to_cartographic(&self, cartesian: &DVec3) -> Option<Cartographic> {
        let p = self.scale_to_geodetic_surface(cartesian)?;
        let n = self.geodetic_surface_normal(&p)?;
        let h = *cartesian - p;
        let longitude = n.y.atan2(n.x);
        let latitude = n.z.asin();
        let height = math::sign(h.dot(*cartesian)) * h.length();
        Some(Cartographic::new(longitude, latitude, height))
    }
    /// Scales `cartesian` along the geodetic surface normal so that it lies on
    /// the surface of this ellipsoid.
    ///
    /// Within `center_tolerance_squared` of the center the Newton iteration is
    /// skipped and the geocentric projection is returned instead; that answer
    /// is only approximate. `None` if the point is the center itself or the
    /// iteration does not converge within [`MAX_NEWTON_ITERATIONS`].
    pub fn scale_to_geodetic_surface(&self, cartesian: &DVec3) -> Option<DVec3> {
        let position_x = cartesian.x;
        let position_y = cartesian.y;
        let position_z = cartesian.z;

        let one_over_radii = self.one_over_radii;
        let x2 = position_x * position_x * one_over_radii.x * one_over_radii.x;
        let y2 = position_y * position_y * one_over_radii.y * one_over_radii.y;
        let z2 = position_z * position_z * one_over_radii.z * one_over_radii.z;

        // Compute the squared ellipsoid norm.
        let squared_norm = x2 + y2 + z2;
        let ratio = (1.0 / squared_norm).sqrt();

        // As an initial approximation, assume that the radial intersection is the projection point.
        let intersection = *cartesian * ratio;

        // If the position is near the center, the iteration will not converge.
        if squared_norm < self.center_tolerance_squared {
            return if ratio.is_finite() {
                Some(intersection)
            } else {
                None
            };
        }

        let one_over_radii_squared = self.one_over_radii_squared;

        // Use the gradient at the intersection point in place of the true unit normal.
        // The difference in magnitude will be absorbed in the multiplier.
        let gradient = intersection * one_over_radii_squared * 2.0;

        // Compute the initial guess at the normal vector multiplier, lambda.
        let mut lambda = ((1.0 - ratio) * cartesian.length()) / (0.5 * gradient.length());
        let mut correction = 0.0;

        let mut x_multiplier;
        let mut y_multiplier;
        let mut z_multiplier;
        let mut iterations = 0;
        loop {
            lambda -= correction;

            x_multiplier = 1.0 / (1.0 + lambda * one_over_radii_squared.x);
            y_multiplier = 1.0 / (1.0 + lambda * one_over_radii_squared.y);
            z_multiplier = 1.0 / (1.0 + lambda * one_over_radii_squared.z);

            let x_multiplier2 = x_multiplier * x_multiplier;
            let y_multiplier2 = y_multiplier * y_multiplier;
            let z_multiplier2 = z_multiplier * z_multiplier;

            let x_multiplier3 = x_multiplier2 * x_multiplier;
            let y_multiplier3 = y_multiplier2 * y_multiplier;
            let z_multiplier3 = z_multiplier2 * z_multiplier;

            let func = x2 * x_multiplier2 + y2 * y_multiplier2 + z2 * z_multiplier2 - 1.0;
            if func.abs() <= EPSILON12 {
                break;
            }
            iterations += 1;
            if iterations > MAX_NEWTON_ITERATIONS || !func.is_finite() {
                warn!(
                    "scale_to_geodetic_surface did not converge for {:?} after {} iterations",
                    cartesian, iterations
                );
                return None;
            }

            // "denominator" here refers to the use of this expression in the velocity and acceleration
            // computations in the sections to follow.
            let denominator = x2 * x_multiplier3 * one_over_radii_squared.x
                + y2 * y_multiplier3 * one_over_radii_squared.y
                + z2 * z_multiplier3 * one_over_radii_squared.z;

            let derivative = -2.0 * denominator;
            correction = func / derivative;
        }

        Some(DVec3::new(
            position_x * x_multiplier,
            position_y * y_multiplier,
            position_z * z_multiplier,
        ))
    }
    /// Scales `cartesian` along the geocentric (radial) direction onto the
    /// surface.
    pub fn scale_to_geocentric_surface(&self, cartesian: &DVec3) -> DVec3 {
        let one_over_radii_squared = self.one_over_radii_squared;
        let beta = 1.0
            / (cartesian.x * cartesian.x * one_over_radii_squared.x
                + cartesian.y * cartesian.y * one_over_radii_squared.y
                + cartesian.z * cartesian.z * one_over_radii_squared.z)
                .sqrt();
        *cartesian * beta
    }
    /// Maps a position into the space where this ellipsoid is a unit sphere.
    pub fn transform_position_to_scaled_space(&self, position: &DVec3) -> DVec3 {
        *position * self.one_over_radii
    }
    pub fn transform_position_from_scaled_space(&self, position: &DVec3) -> DVec3 {
        *position * self.radii
    }
}
impl FromStr for Ellipsoid {
    type Err = GeometryError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WGS84" => Ok(Ellipsoid::WGS84),
            "UNIT_SPHERE" => Ok(Ellipsoid::UNIT_SPHERE),
            "MOON" => Ok(Ellipsoid::MOON),
            _ => Err(GeometryError::UnknownEllipsoid(s.to_string())),
        }
    }
}
