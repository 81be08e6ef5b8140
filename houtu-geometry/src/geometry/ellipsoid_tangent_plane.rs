use bevy::math::{DVec2, DVec3};

use crate::{ellipsoid::Ellipsoid, math::*};

use super::{intersection_tests::ray_plane, Plane, Ray};

/// A plane tangent to the ellipsoid at `origin`, with a local 2D coordinate
/// system whose x axis points east and y axis points north.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipsoidTangentPlane {
    pub plane: Plane,
    pub origin: DVec3,
    pub x_axis: DVec3,
    pub y_axis: DVec3,
    pub z_axis: DVec3,
    pub ellipsoid: Ellipsoid,
}
impl EllipsoidTangentPlane {
    /// Snaps `origin` onto the ellipsoid surface and builds the plane there.
    /// `None` if `origin` is too close to the ellipsoid center.
    pub fn new(origin: &DVec3, ellipsoid: Option<&Ellipsoid>) -> Option<Self> {
        let ellipsoid = *ellipsoid.unwrap_or(&Ellipsoid::WGS84);
        let origin = ellipsoid.scale_to_geodetic_surface(origin)?;
        let east_north_up = east_north_up_to_fixed_frame(&origin, Some(&ellipsoid));
        let x_axis = DVec3::from_cartesian4(east_north_up.col(0));
        let y_axis = DVec3::from_cartesian4(east_north_up.col(1));
        let z_axis = DVec3::from_cartesian4(east_north_up.col(2));
        let plane = Plane::from_point_normal(&origin, &z_axis);
        Some(Self {
            plane,
            origin,
            x_axis,
            y_axis,
            z_axis,
            ellipsoid,
        })
    }
    /// Tangent plane at the center of the axis-aligned box around `cartesians`.
    pub fn from_points(cartesians: &[DVec3], ellipsoid: Option<&Ellipsoid>) -> Option<Self> {
        let (first, rest) = cartesians.split_first()?;
        let (minimum, maximum) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        EllipsoidTangentPlane::new(&((minimum + maximum) * 0.5), ellipsoid)
    }
    pub fn normal(&self) -> DVec3 {
        self.plane.normal
    }
    /// Projects `cartesian` along the plane normal onto the plane and returns
    /// its coordinates in the plane's 2D system.
    pub fn project_point_to_nearest_on_plane(&self, cartesian: DVec3) -> DVec2 {
        let mut ray = Ray::new(cartesian, self.plane.normal);
        let mut intersection_point = ray_plane(&ray, &self.plane);
        if intersection_point.is_none() {
            ray.direction = -ray.direction;
            intersection_point = ray_plane(&ray, &self.plane);
        }
        let v = intersection_point.unwrap_or(cartesian) - self.origin;
        DVec2::new(self.x_axis.dot(v), self.y_axis.dot(v))
    }
    pub fn project_points_to_nearest_on_plane(&self, cartesians: &[DVec3]) -> Vec<DVec2> {
        cartesians
            .iter()
            .map(|cartesian| self.project_point_to_nearest_on_plane(*cartesian))
            .collect()
    }
    /// Maps 2D plane coordinates back onto the ellipsoid surface along the
    /// geocentric direction.
    pub fn project_point_onto_ellipsoid(&self, cartesian: DVec2) -> DVec3 {
        let position = self.origin + self.x_axis * cartesian.x + self.y_axis * cartesian.y;
        self.ellipsoid.scale_to_geocentric_surface(&position)
    }
    pub fn project_points_onto_ellipsoid(&self, cartesians: &[DVec2]) -> Vec<DVec3> {
        cartesians
            .iter()
            .map(|cartesian| self.project_point_onto_ellipsoid(*cartesian))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_snaps_origin_to_surface() {
        let ellipsoid = Ellipsoid::UNIT_SPHERE;
        let tangent_plane =
            EllipsoidTangentPlane::new(&DVec3::new(2.0, 0.0, 0.0), Some(&ellipsoid)).unwrap();
        assert!(tangent_plane
            .origin
            .equals_epsilon(DVec3::X, Some(0.0), Some(EPSILON14)));
        assert!(tangent_plane
            .normal()
            .equals_epsilon(DVec3::X, Some(0.0), Some(EPSILON14)));
        assert!(tangent_plane
            .x_axis
            .equals_epsilon(DVec3::Y, Some(0.0), Some(EPSILON14)));
        assert!(tangent_plane
            .y_axis
            .equals_epsilon(DVec3::Z, Some(0.0), Some(EPSILON14)));
        assert!(tangent_plane
            .x_axis
            .cross(tangent_plane.y_axis)
            .equals_epsilon(tangent_plane.normal(), Some(0.0), Some(EPSILON14)));
    }

    #[test]
    fn constructor_at_center_is_none() {
        assert!(EllipsoidTangentPlane::new(&DVec3::ZERO, None).is_none());
    }

    #[test]
    fn project_point_to_nearest_on_plane_from_either_side() {
        let ellipsoid = Ellipsoid::UNIT_SPHERE;
        let tangent_plane =
            EllipsoidTangentPlane::new(&DVec3::X, Some(&ellipsoid)).unwrap();
        let above = tangent_plane.project_point_to_nearest_on_plane(DVec3::new(3.0, 0.5, -0.25));
        assert!(above.abs_diff_eq(DVec2::new(0.5, -0.25), EPSILON14));
        let below = tangent_plane.project_point_to_nearest_on_plane(DVec3::new(-1.0, 0.5, 0.75));
        assert!(below.abs_diff_eq(DVec2::new(0.5, 0.75), EPSILON14));
        let on_plane = tangent_plane.project_point_to_nearest_on_plane(DVec3::new(1.0, -2.0, 1.0));
        assert!(on_plane.abs_diff_eq(DVec2::new(-2.0, 1.0), EPSILON14));
    }

    #[test]
    fn project_points_to_nearest_on_plane_keeps_order() {
        let tangent_plane =
            EllipsoidTangentPlane::new(&DVec3::X, Some(&Ellipsoid::UNIT_SPHERE)).unwrap();
        let projected = tangent_plane.project_points_to_nearest_on_plane(&[
            DVec3::new(2.0, 1.0, 0.0),
            DVec3::new(2.0, 0.0, 1.0),
        ]);
        assert_eq!(projected.len(), 2);
        assert!(projected[0].abs_diff_eq(DVec2::new(1.0, 0.0), EPSILON14));
        assert!(projected[1].abs_diff_eq(DVec2::new(0.0, 1.0), EPSILON14));
    }

    #[test]
    fn from_points_uses_box_center() {
        let points = [
            DVec3::new(1.0, -0.5, 0.0),
            DVec3::new(1.0, 0.5, 0.0),
            DVec3::new(1.0, 0.0, -0.25),
            DVec3::new(1.0, 0.0, 0.25),
        ];
        let tangent_plane =
            EllipsoidTangentPlane::from_points(&points, Some(&Ellipsoid::UNIT_SPHERE)).unwrap();
        assert!(tangent_plane
            .origin
            .equals_epsilon(DVec3::X, Some(0.0), Some(EPSILON14)));
        assert!(EllipsoidTangentPlane::from_points(&[], None).is_none());
    }

    #[test]
    fn project_point_onto_ellipsoid_work() {
        let ellipsoid = Ellipsoid::UNIT_SPHERE;
        let tangent_plane = EllipsoidTangentPlane::new(&DVec3::X, Some(&ellipsoid)).unwrap();
        let on_surface = tangent_plane.project_point_onto_ellipsoid(DVec2::new(1.0, 0.0));
        let expected = DVec3::new(1.0, 1.0, 0.0).normalize();
        assert!(on_surface.equals_epsilon(expected, Some(0.0), Some(EPSILON14)));
        let points = tangent_plane.project_points_onto_ellipsoid(&[DVec2::ZERO]);
        assert!(points[0].equals_epsilon(DVec3::X, Some(0.0), Some(EPSILON14)));
    }
}
