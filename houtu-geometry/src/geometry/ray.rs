use bevy::math::DVec3;

/// A half-line. The direction is not required to be normalized; `t` in
/// [`Ray::get_point`] is measured in multiples of it.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}
impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }
    pub fn get_point(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}
