use bevy::math::DVec4;

use crate::{
    bounding_volume::{BoundingVolume, CullingResult},
    geometry::Plane,
};

/// A set of planes, usually the six sides of a view frustum, whose positive
/// sides enclose the visible space.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CullingVolume {
    pub planes: Vec<Plane>,
}
impl CullingVolume {
    pub fn new(planes: Vec<Plane>) -> Self {
        Self { planes }
    }
    /// From `(normal.x, normal.y, normal.z, distance)` tuples.
    pub fn from_vec4_planes(planes: &[DVec4]) -> Self {
        Self {
            planes: planes.iter().map(Plane::from_vec4).collect(),
        }
    }
    /// Outside as soon as one plane has the volume on its negative side,
    /// Inside only if every plane has it on its positive side.
    pub fn compute_visibility<V: BoundingVolume + ?Sized>(&self, bounding_volume: &V) -> CullingResult {
        let mut intersecting = false;
        for plane in self.planes.iter() {
            match bounding_volume.intersect_plane(plane) {
                CullingResult::Outside => return CullingResult::Outside,
                CullingResult::Intersecting => intersecting = true,
                CullingResult::Inside => {}
            }
        }
        if intersecting {
            CullingResult::Intersecting
        } else {
            CullingResult::Inside
        }
    }
}
