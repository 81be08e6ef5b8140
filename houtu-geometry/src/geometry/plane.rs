use bevy::math::{DVec3, DVec4};

/// A plane in Hessian normal form: `normal . p + distance = 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Plane {
    pub normal: DVec3,
    pub distance: f64,
}
impl Plane {
    /// `normal` must be unit length.
    pub fn new(normal: DVec3, distance: f64) -> Self {
        debug_assert!(
            (normal.length_squared() - 1.0).abs() < 1e-6,
            "plane normal must be normalized"
        );
        Self { normal, distance }
    }
    pub fn from_point_normal(point: &DVec3, normal: &DVec3) -> Self {
        Plane::new(*normal, -normal.dot(*point))
    }
    /// From `(normal.x, normal.y, normal.z, distance)`.
    pub fn from_vec4(coefficients: &DVec4) -> Self {
        Plane::new(coefficients.truncate(), coefficients.w)
    }
    /// Signed distance; positive on the side the normal points to.
    pub fn get_point_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.distance
    }
    pub fn project_point_onto_plane(&self, point: DVec3) -> DVec3 {
        point - self.normal * self.get_point_distance(point)
    }
}
