use bevy::math::DVec3;

use crate::math::EPSILON15;

use super::{Plane, Ray};

/// Point where `ray` crosses `plane`, or `None` if the ray is parallel to
/// the plane or the crossing lies behind the ray origin.
pub fn ray_plane(ray: &Ray, plane: &Plane) -> Option<DVec3> {
    let origin = ray.origin;
    let direction = ray.direction;
    let normal = plane.normal;
    let denominator = normal.dot(direction);

    if denominator.abs() < EPSILON15 {
        // Ray is parallel to plane. The ray may be in the polygon's plane.
        return None;
    }

    let t = (-plane.distance - normal.dot(origin)) / denominator;

    if t < 0.0 {
        return None;
    }

    Some(origin + direction * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_plane_intersects() {
        let ray = Ray::new(DVec3::new(2.0, 0.0, 0.0), DVec3::NEG_X);
        let plane = Plane::new(DVec3::X, -1.0);
        assert_eq!(ray_plane(&ray, &plane), Some(DVec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn ray_plane_with_unnormalized_direction() {
        let ray = Ray::new(DVec3::new(2.0, 3.0, 0.0), DVec3::new(-4.0, 0.0, 0.0));
        let plane = Plane::new(DVec3::X, -1.0);
        assert_eq!(ray_plane(&ray, &plane), Some(DVec3::new(1.0, 3.0, 0.0)));
    }

    #[test]
    fn ray_plane_parallel_is_none() {
        let ray = Ray::new(DVec3::new(2.0, 0.0, 0.0), DVec3::Y);
        let plane = Plane::new(DVec3::X, -1.0);
        assert_eq!(ray_plane(&ray, &plane), None);
    }

    #[test]
    fn ray_plane_behind_origin_is_none() {
        let ray = Ray::new(DVec3::new(2.0, 0.0, 0.0), DVec3::X);
        let plane = Plane::new(DVec3::X, -1.0);
        assert_eq!(ray_plane(&ray, &plane), None);
    }

    #[test]
    fn ray_plane_origin_on_plane() {
        let ray = Ray::new(DVec3::new(1.0, 5.0, 0.0), DVec3::X);
        let plane = Plane::new(DVec3::X, -1.0);
        assert_eq!(ray_plane(&ray, &plane), Some(DVec3::new(1.0, 5.0, 0.0)));
    }
}
