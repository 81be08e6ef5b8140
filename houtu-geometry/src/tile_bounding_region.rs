use bevy::math::DVec3;

use crate::{
    bounding_volume::{BoundingVolume, CullingResult},
    ellipsoid::Ellipsoid,
    error::GeometryError,
    geometry::{intersection_tests::ray_plane, OrientedBoundingBox, Plane, Ray, Rectangle},
    math::Cartographic,
};

/// A longitude/latitude rectangle extruded between two heights, together with
/// the four vertical walls through its edges and a tight oriented box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingRegion {
    rectangle: Rectangle,
    minimum_height: f64,
    maximum_height: f64,
    oriented_bounding_box: OrientedBoundingBox,
    southwest_corner_cartesian: DVec3,
    northeast_corner_cartesian: DVec3,
    west_normal: DVec3,
    south_normal: DVec3,
    east_normal: DVec3,
    north_normal: DVec3,
    ellipsoid: Ellipsoid,
}
impl BoundingRegion {
    /// # Panics
    ///
    /// On the inputs [`BoundingRegion::try_new`] rejects.
    pub fn new(
        rectangle: &Rectangle,
        minimum_height: f64,
        maximum_height: f64,
        ellipsoid: Option<&Ellipsoid>,
    ) -> Self {
        match Self::try_new(rectangle, minimum_height, maximum_height, ellipsoid) {
            Ok(region) => region,
            Err(e) => panic!("{e}"),
        }
    }
    pub fn try_new(
        rectangle: &Rectangle,
        minimum_height: f64,
        maximum_height: f64,
        ellipsoid: Option<&Ellipsoid>,
    ) -> Result<Self, GeometryError> {
        let ellipsoid = *ellipsoid.unwrap_or(&Ellipsoid::WGS84);
        if minimum_height > maximum_height {
            return Err(GeometryError::InvalidHeightRange {
                minimum: minimum_height,
                maximum: maximum_height,
            });
        }
        let oriented_bounding_box = OrientedBoundingBox::try_from_rectangle(
            rectangle,
            Some(minimum_height),
            Some(maximum_height),
            Some(&ellipsoid),
        )?;
        let walls = Walls::compute(rectangle, &ellipsoid)?;
        Ok(Self {
            rectangle: *rectangle,
            minimum_height,
            maximum_height,
            oriented_bounding_box,
            southwest_corner_cartesian: walls.southwest_corner_cartesian,
            northeast_corner_cartesian: walls.northeast_corner_cartesian,
            west_normal: walls.west_normal,
            south_normal: walls.south_normal,
            east_normal: walls.east_normal,
            north_normal: walls.north_normal,
            ellipsoid,
        })
    }
    pub fn rectangle(&self) -> &Rectangle {
        &self.rectangle
    }
    pub fn minimum_height(&self) -> f64 {
        self.minimum_height
    }
    pub fn maximum_height(&self) -> f64 {
        self.maximum_height
    }
    pub fn oriented_bounding_box(&self) -> &OrientedBoundingBox {
        &self.oriented_bounding_box
    }
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
    pub fn southwest_corner_cartesian(&self) -> DVec3 {
        self.southwest_corner_cartesian
    }
    pub fn northeast_corner_cartesian(&self) -> DVec3 {
        self.northeast_corner_cartesian
    }
    pub fn west_normal(&self) -> DVec3 {
        self.west_normal
    }
    pub fn south_normal(&self) -> DVec3 {
        self.south_normal
    }
    pub fn east_normal(&self) -> DVec3 {
        self.east_normal
    }
    pub fn north_normal(&self) -> DVec3 {
        self.north_normal
    }
    pub fn intersect_plane(&self, plane: &Plane) -> CullingResult {
        self.oriented_bounding_box.intersect_plane(plane)
    }
    /// Squared distance from `position` to the region. 0 if the position is
    /// too close to the ellipsoid center to be converted to a cartographic.
    pub fn compute_distance_squared_to_position(&self, position: &DVec3) -> f64 {
        match self.ellipsoid.cartesian_to_cartographic(position) {
            Some(cartographic) => {
                self.compute_distance_squared_to_position_with_cartographic(&cartographic, position)
            }
            None => 0.0,
        }
    }
    /// Like [`BoundingRegion::compute_distance_squared_to_position`] when the
    /// cartographic of `position` is already known.
    pub fn compute_distance_squared_to_position_with_cartographic(
        &self,
        cartographic: &Cartographic,
        position: &DVec3,
    ) -> f64 {
        let mut result = 0.0;
        if !self.rectangle.contains(cartographic) {
            let vector_from_southwest_corner = *position - self.southwest_corner_cartesian;
            let distance_to_west_plane = vector_from_southwest_corner.dot(self.west_normal);
            let distance_to_south_plane = vector_from_southwest_corner.dot(self.south_normal);

            let vector_from_northeast_corner = *position - self.northeast_corner_cartesian;
            let distance_to_east_plane = vector_from_northeast_corner.dot(self.east_normal);
            let distance_to_north_plane = vector_from_northeast_corner.dot(self.north_normal);

            if distance_to_west_plane > 0.0 {
                result += distance_to_west_plane * distance_to_west_plane;
            } else if distance_to_east_plane > 0.0 {
                result += distance_to_east_plane * distance_to_east_plane;
            }

            if distance_to_south_plane > 0.0 {
                result += distance_to_south_plane * distance_to_south_plane;
            } else if distance_to_north_plane > 0.0 {
                result += distance_to_north_plane * distance_to_north_plane;
            }
        }

        let height = cartographic.height;
        if height > self.maximum_height {
            let distance_above_top = height - self.maximum_height;
            result += distance_above_top * distance_above_top;
        } else if height < self.minimum_height {
            let distance_below_bottom = self.minimum_height - height;
            result += distance_below_bottom * distance_below_bottom;
        }
        result
    }
    /// Distance used to rank the region for refinement: the larger of the
    /// distance to the region and the distance to its box.
    pub fn distance_to_camera(&self, position: &DVec3, cartographic: &Cartographic) -> f64 {
        let region_distance = self
            .compute_distance_squared_to_position_with_cartographic(cartographic, position)
            .sqrt();
        let box_distance = self
            .oriented_bounding_box
            .compute_distance_squared_to_position(position)
            .sqrt();
        region_distance.max(box_distance)
    }
}
impl BoundingVolume for BoundingRegion {
    fn intersect_plane(&self, plane: &Plane) -> CullingResult {
        BoundingRegion::intersect_plane(self, plane)
    }
    fn distance_squared_to(&self, position: &DVec3) -> f64 {
        self.compute_distance_squared_to_position(position)
    }
}

struct Walls {
    southwest_corner_cartesian: DVec3,
    northeast_corner_cartesian: DVec3,
    west_normal: DVec3,
    south_normal: DVec3,
    east_normal: DVec3,
    north_normal: DVec3,
}
impl Walls {
    fn compute(rectangle: &Rectangle, ellipsoid: &Ellipsoid) -> Result<Self, GeometryError> {
        let mut southwest_corner_cartesian =
            ellipsoid.cartographic_to_cartesian(&rectangle.south_west());
        let mut northeast_corner_cartesian =
            ellipsoid.cartographic_to_cartesian(&rectangle.north_east());

        let middle_latitude = (rectangle.south + rectangle.north) * 0.5;
        let western_midpoint_cartesian = ellipsoid
            .cartographic_to_cartesian(&Cartographic::new(rectangle.west, middle_latitude, 0.0));
        let west_normal = western_midpoint_cartesian.cross(DVec3::Z).normalize();

        let eastern_midpoint_cartesian = ellipsoid
            .cartographic_to_cartesian(&Cartographic::new(rectangle.east, middle_latitude, 0.0));
        let east_normal = DVec3::Z.cross(eastern_midpoint_cartesian).normalize();

        let mut west_vector = western_midpoint_cartesian - eastern_midpoint_cartesian;
        if west_vector.length() == 0.0 {
            west_vector = west_normal;
        }
        let east_west_normal = west_vector.normalize();
        let center_longitude = rectangle.compute_center().longitude;

        let south = rectangle.south;
        let south_surface_normal = if south > 0.0 {
            // move the anchor so the wall does not cut through the region
            let south_center = Cartographic::new(center_longitude, south, 0.0);
            let south_center_cartesian = ellipsoid.cartographic_to_cartesian(&south_center);
            let west_plane = Plane::from_point_normal(&southwest_corner_cartesian, &west_normal);
            southwest_corner_cartesian = line_plane(
                Ray::new(south_center_cartesian, east_west_normal),
                &west_plane,
                "south",
            )?;
            ellipsoid.geodetic_surface_normal_cartographic(&south_center)
        } else {
            ellipsoid.geodetic_surface_normal_cartographic(&rectangle.south_east())
        };
        let south_normal = south_surface_normal.cross(west_vector).normalize();

        let north = rectangle.north;
        let north_surface_normal = if north < 0.0 {
            let north_center = Cartographic::new(center_longitude, north, 0.0);
            let north_center_cartesian = ellipsoid.cartographic_to_cartesian(&north_center);
            let east_plane = Plane::from_point_normal(&northeast_corner_cartesian, &east_normal);
            northeast_corner_cartesian = line_plane(
                Ray::new(north_center_cartesian, -east_west_normal),
                &east_plane,
                "north",
            )?;
            ellipsoid.geodetic_surface_normal_cartographic(&north_center)
        } else {
            ellipsoid.geodetic_surface_normal_cartographic(&rectangle.north_west())
        };
        let north_normal = west_vector.cross(north_surface_normal).normalize();

        Ok(Self {
            southwest_corner_cartesian,
            northeast_corner_cartesian,
            west_normal,
            south_normal,
            east_normal,
            north_normal,
        })
    }
}

/// Where the line through `ray` meets `plane`, in either direction.
fn line_plane(ray: Ray, plane: &Plane, wall: &'static str) -> Result<DVec3, GeometryError> {
    if let Some(point) = ray_plane(&ray, plane) {
        return Ok(point);
    }
    bevy::log::debug!(
        "{} wall anchor lies behind {:?}, intersecting the reversed ray",
        wall,
        ray.origin
    );
    let reversed = Ray::new(ray.origin, -ray.direction);
    ray_plane(&reversed, plane).ok_or(GeometryError::DegenerateRegion(wall))
}
