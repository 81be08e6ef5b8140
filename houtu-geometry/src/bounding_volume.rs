use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use crate::{
    ellipsoid::Ellipsoid,
    error::GeometryError,
    geometry::{OrientedBoundingBox, Plane, Rectangle},
    tile_bounding_region::BoundingRegion,
};

/// Where a volume lies relative to a plane or a set of planes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CullingResult {
    /// Entirely on the negative side.
    Outside,
    Intersecting,
    /// Entirely on the positive side.
    Inside,
}

pub trait BoundingVolume {
    fn intersect_plane(&self, plane: &Plane) -> CullingResult;
    fn distance_squared_to(&self, position: &DVec3) -> f64;
}

/// The `boundingVolume` object of a 3D Tiles tile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingVolumeDescription {
    /// `[west, south, east, north, minimum height, maximum height]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<[f64; 6]>,
    /// Center followed by the x, y and z half-axes.
    #[serde(rename = "box", default, skip_serializing_if = "Option::is_none")]
    pub oriented_box: Option<[f64; 12]>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TileBoundingVolume {
    Region(BoundingRegion),
    Box(OrientedBoundingBox),
}
impl TileBoundingVolume {
    /// Builds the volume a tile declares. A region wins over a box when both
    /// are given.
    pub fn from_description(
        description: &BoundingVolumeDescription,
        ellipsoid: Option<&Ellipsoid>,
    ) -> Result<Self, GeometryError> {
        match (description.region, description.oriented_box) {
            (Some(region), oriented_box) => {
                if oriented_box.is_some() {
                    bevy::log::debug!("bounding volume has both a region and a box, using the region");
                }
                let [west, south, east, north, minimum_height, maximum_height] = region;
                let region = BoundingRegion::try_new(
                    &Rectangle::new(west, south, east, north),
                    minimum_height,
                    maximum_height,
                    ellipsoid,
                )?;
                Ok(TileBoundingVolume::Region(region))
            }
            (None, Some(oriented_box)) => Ok(TileBoundingVolume::Box(
                OrientedBoundingBox::from_box_array(&oriented_box),
            )),
            (None, None) => Err(GeometryError::MissingBoundingVolume),
        }
    }
    pub fn from_json(json: &str, ellipsoid: Option<&Ellipsoid>) -> Result<Self, GeometryError> {
        let description: BoundingVolumeDescription = serde_json::from_str(json)?;
        Self::from_description(&description, ellipsoid)
    }
    pub fn oriented_bounding_box(&self) -> &OrientedBoundingBox {
        match self {
            TileBoundingVolume::Region(region) => region.oriented_bounding_box(),
            TileBoundingVolume::Box(oriented_box) => oriented_box,
        }
    }
}
impl BoundingVolume for TileBoundingVolume {
    fn intersect_plane(&self, plane: &Plane) -> CullingResult {
        match self {
            TileBoundingVolume::Region(region) => region.intersect_plane(plane),
            TileBoundingVolume::Box(oriented_box) => oriented_box.intersect_plane(plane),
        }
    }
    fn distance_squared_to(&self, position: &DVec3) -> f64 {
        match self {
            TileBoundingVolume::Region(region) => region.compute_distance_squared_to_position(position),
            TileBoundingVolume::Box(oriented_box) => {
                oriented_box.compute_distance_squared_to_position(position)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::DMat3;

    use super::*;

    #[test]
    fn parse_box() {
        let volume = TileBoundingVolume::from_json(
            r#"{"box": [1, 2, 3, 4, 0, 0, 0, 5, 0, 0, 0, 6]}"#,
            None,
        )
        .unwrap();
        let TileBoundingVolume::Box(oriented_box) = volume else {
            panic!("expected a box, got {volume:?}");
        };
        assert_eq!(oriented_box.center, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            oriented_box.half_axes,
            DMat3::from_diagonal(DVec3::new(4.0, 5.0, 6.0))
        );
        assert_eq!(volume.distance_squared_to(&DVec3::new(1.0, 2.0, 3.0)), 0.0);
    }

    #[test]
    fn parse_region() {
        let volume = TileBoundingVolume::from_json(
            r#"{"region": [-0.001, -0.001, 0.001, 0.001, 0.0, 10.0]}"#,
            Some(&Ellipsoid::WGS84),
        )
        .unwrap();
        let TileBoundingVolume::Region(region) = volume else {
            panic!("expected a region, got {volume:?}");
        };
        assert_eq!(
            *region.rectangle(),
            Rectangle::new(-0.001, -0.001, 0.001, 0.001)
        );
        assert_eq!(region.maximum_height(), 10.0);
        assert_eq!(
            volume.oriented_bounding_box(),
            region.oriented_bounding_box()
        );
    }

    #[test]
    fn region_is_preferred_over_box() {
        let description = BoundingVolumeDescription {
            region: Some([0.0, 0.0, 0.1, 0.1, 0.0, 1.0]),
            oriented_box: Some([0.0; 12]),
        };
        let volume = TileBoundingVolume::from_description(&description, None).unwrap();
        assert!(matches!(volume, TileBoundingVolume::Region(_)));
    }

    #[test]
    fn missing_volume_is_an_error() {
        assert!(matches!(
            TileBoundingVolume::from_json(r#"{"sphere": [0, 0, 0, 1]}"#, None),
            Err(GeometryError::MissingBoundingVolume)
        ));
        assert!(matches!(
            TileBoundingVolume::from_json(r#"{"box": [1, 2, 3]}"#, None),
            Err(GeometryError::Json(_))
        ));
        assert!(matches!(
            TileBoundingVolume::from_json(r#"{"region": [0, 0.5, 0.1, 0.1, 0, 1]}"#, None),
            Err(GeometryError::InvalidRectangle(_))
        ));
    }

    #[test]
    fn description_serializes_box_under_its_json_name() {
        let description = BoundingVolumeDescription {
            region: None,
            oriented_box: Some([0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]),
        };
        let json = serde_json::to_string(&description).unwrap();
        assert_eq!(
            json,
            r#"{"box":[0.0,0.0,0.0,1.0,0.0,0.0,0.0,1.0,0.0,0.0,0.0,1.0]}"#
        );
    }
}
