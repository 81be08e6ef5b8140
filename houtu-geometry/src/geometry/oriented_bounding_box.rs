use std::f64::consts::{FRAC_PI_2, PI};

use bevy::math::{DMat3, DVec3};

use crate::{
    bounding_volume::{BoundingVolume, CullingResult},
    ellipsoid::Ellipsoid,
    error::GeometryError,
    math::*,
};

use super::{EllipsoidTangentPlane, Plane, Rectangle};

/// A box with arbitrary orientation. The columns of `half_axes` are the box
/// axes scaled by the half-extent along each of them.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct OrientedBoundingBox {
    pub center: DVec3,
    pub half_axes: DMat3,
}
impl Default for OrientedBoundingBox {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            half_axes: DMat3::ZERO,
        }
    }
}
impl OrientedBoundingBox {
    pub fn new(center: DVec3, half_axes: DMat3) -> Self {
        Self { center, half_axes }
    }
    /// From a 3D Tiles `box`: the center followed by the x, y and z half-axes.
    pub fn from_box_array(values: &[f64; 12]) -> Self {
        Self {
            center: DVec3::new(values[0], values[1], values[2]),
            half_axes: DMat3::from_cols(
                DVec3::new(values[3], values[4], values[5]),
                DVec3::new(values[6], values[7], values[8]),
                DVec3::new(values[9], values[10], values[11]),
            ),
        }
    }
    /// Box aligned with the given plane axes, spanning the given extents
    /// measured from `plane_origin` along each axis.
    pub fn from_plane_extents(
        plane_origin: DVec3,
        plane_x_axis: DVec3,
        plane_y_axis: DVec3,
        plane_z_axis: DVec3,
        minimum_x: f64,
        maximum_x: f64,
        minimum_y: f64,
        maximum_y: f64,
        minimum_z: f64,
        maximum_z: f64,
    ) -> Self {
        let axes = DMat3::from_cols(plane_x_axis, plane_y_axis, plane_z_axis);
        let center_offset = DVec3::new(
            (minimum_x + maximum_x) / 2.0,
            (minimum_y + maximum_y) / 2.0,
            (minimum_z + maximum_z) / 2.0,
        );
        let scale = DVec3::new(
            (maximum_x - minimum_x) / 2.0,
            (maximum_y - minimum_y) / 2.0,
            (maximum_z - minimum_z) / 2.0,
        );
        Self {
            center: plane_origin + axes * center_offset,
            half_axes: axes * DMat3::from_diagonal(scale),
        }
    }
    /// Tight box around a longitude/latitude rectangle between two heights.
    ///
    /// # Panics
    ///
    /// If the ellipsoid is not a solid of revolution or the rectangle is out
    /// of range. Use [`OrientedBoundingBox::try_from_rectangle`] to get the
    /// error instead.
    pub fn from_rectangle(
        rectangle: &Rectangle,
        minimum_height: Option<f64>,
        maximum_height: Option<f64>,
        ellipsoid: Option<&Ellipsoid>,
    ) -> Self {
        match Self::try_from_rectangle(rectangle, minimum_height, maximum_height, ellipsoid) {
            Ok(obb) => obb,
            Err(e) => panic!("{e}"),
        }
    }
    pub fn try_from_rectangle(
        rectangle: &Rectangle,
        minimum_height: Option<f64>,
        maximum_height: Option<f64>,
        ellipsoid: Option<&Ellipsoid>,
    ) -> Result<Self, GeometryError> {
        let minimum_height = minimum_height.unwrap_or(0.0);
        let maximum_height = maximum_height.unwrap_or(0.0);
        let ellipsoid = ellipsoid.unwrap_or(&Ellipsoid::WGS84);

        rectangle.validate()?;
        if !ellipsoid.is_revolution_solid() {
            return Err(GeometryError::NotRevolutionSolid {
                x: ellipsoid.radii.x,
                y: ellipsoid.radii.y,
            });
        }

        if rectangle.compute_width() <= PI {
            from_narrow_rectangle(rectangle, minimum_height, maximum_height, ellipsoid)
        } else {
            Ok(from_wide_rectangle(
                rectangle,
                minimum_height,
                maximum_height,
                ellipsoid,
            ))
        }
    }
    /// Classifies the box against the half-space on the positive side of
    /// `plane`.
    pub fn intersect_plane(&self, plane: &Plane) -> CullingResult {
        let normal = plane.normal;
        let radius_effective = normal.dot(self.half_axes.x_axis).abs()
            + normal.dot(self.half_axes.y_axis).abs()
            + normal.dot(self.half_axes.z_axis).abs();
        let distance_to_plane = normal.dot(self.center) + plane.distance;

        if distance_to_plane <= -radius_effective {
            // entirely on the negative side
            CullingResult::Outside
        } else if distance_to_plane >= radius_effective {
            CullingResult::Inside
        } else {
            CullingResult::Intersecting
        }
    }
    /// Squared distance from `position` to the closest point of the box, 0
    /// when the position is inside.
    pub fn compute_distance_squared_to_position(&self, position: &DVec3) -> f64 {
        let offset = *position - self.center;
        let (axes, half_lengths) = self.orthonormal_axes();

        let mut distance_squared = 0.0;
        for (axis, half) in axes.iter().zip(half_lengths) {
            let projected = offset.dot(*axis);
            let excess = if projected < -half {
                projected + half
            } else if projected > half {
                projected - half
            } else {
                0.0
            };
            distance_squared += excess * excess;
        }
        distance_squared
    }
    pub fn contains_point(&self, position: &DVec3) -> bool {
        self.compute_distance_squared_to_position(position) == 0.0
    }
    /// The eight corners of the box.
    pub fn compute_corners(&self) -> [DVec3; 8] {
        let u = self.half_axes.x_axis;
        let v = self.half_axes.y_axis;
        let w = self.half_axes.z_axis;
        let c = self.center;
        [
            c - u - v - w,
            c - u - v + w,
            c - u + v - w,
            c - u + v + w,
            c + u - v - w,
            c + u - v + w,
            c + u + v - w,
            c + u + v + w,
        ]
    }
    /// Unit box axes and the half-length along each. Zero-length half-axes
    /// are replaced so that the three axes still form a basis.
    fn orthonormal_axes(&self) -> ([DVec3; 3], [f64; 3]) {
        let columns = [
            self.half_axes.x_axis,
            self.half_axes.y_axis,
            self.half_axes.z_axis,
        ];
        let half_lengths = columns.map(|column| column.length());

        let mut axes = [DVec3::ZERO; 3];
        let mut degenerate = [0usize; 3];
        let mut degenerate_count = 0;
        for i in 0..3 {
            if half_lengths[i] > 0.0 {
                axes[i] = columns[i] / half_lengths[i];
            } else {
                degenerate[degenerate_count] = i;
                degenerate_count += 1;
            }
        }

        match &degenerate[..degenerate_count] {
            [] => {}
            &[i] => {
                axes[i] = axes[(i + 1) % 3].cross(axes[(i + 2) % 3]);
            }
            &[i, j] => {
                let valid = 3 - i - j;
                let valid_axis = axes[valid];
                let cross_vector = if DVec3::Y.equals_epsilon(valid_axis, Some(EPSILON3), None) {
                    DVec3::X
                } else {
                    DVec3::Y
                };
                let second = valid_axis.cross(cross_vector).normalize();
                let third = valid_axis.cross(second).normalize();
                axes[(valid + 1) % 3] = second;
                axes[(valid + 2) % 3] = third;
            }
            _ => {
                axes = [DVec3::X, DVec3::Y, DVec3::Z];
            }
        }
        if degenerate_count > 0 {
            bevy::log::debug!(
                "completed {} degenerate half-axes of oriented bounding box at {:?}",
                degenerate_count,
                self.center
            );
        }
        (axes, half_lengths)
    }
}
impl BoundingVolume for OrientedBoundingBox {
    fn intersect_plane(&self, plane: &Plane) -> CullingResult {
        OrientedBoundingBox::intersect_plane(self, plane)
    }
    fn distance_squared_to(&self, position: &DVec3) -> f64 {
        self.compute_distance_squared_to_position(position)
    }
}

/// Rectangles no wider than a hemisphere: the box is aligned with the tangent
/// plane at the rectangle center.
fn from_narrow_rectangle(
    rectangle: &Rectangle,
    minimum_height: f64,
    maximum_height: f64,
    ellipsoid: &Ellipsoid,
) -> Result<OrientedBoundingBox, GeometryError> {
    let tangent_point_cartographic = rectangle.compute_center();
    let tangent_point = ellipsoid.cartographic_to_cartesian(&tangent_point_cartographic);
    let tangent_plane = EllipsoidTangentPlane::new(&tangent_point, Some(ellipsoid))
        .ok_or(GeometryError::DegenerateTangentPlane)?;
    let plane = tangent_plane.plane;

    // the ellipsoid sticks out farthest at the equator
    let longitude_center = tangent_point_cartographic.longitude;
    let latitude_center = if rectangle.south < 0.0 && rectangle.north > 0.0 {
        0.0
    } else {
        tangent_point_cartographic.latitude
    };

    let project = |longitude: f64, latitude: f64| {
        let cartesian =
            ellipsoid.cartographic_to_cartesian(&Cartographic::new(longitude, latitude, maximum_height));
        tangent_plane.project_point_to_nearest_on_plane(cartesian)
    };
    let north_center = project(longitude_center, rectangle.north);
    let north_west = project(rectangle.west, rectangle.north);
    let center_west = project(rectangle.west, latitude_center);
    let south_west = project(rectangle.west, rectangle.south);
    let south_center = project(longitude_center, rectangle.south);

    let minimum_x = north_west.x.min(center_west.x).min(south_west.x);
    // symmetric around the center longitude
    let maximum_x = -minimum_x;

    let maximum_y = north_west.y.max(north_center.y);
    let minimum_y = south_west.y.min(south_center.y);

    // the rectangle at minimum height reaches deepest below the plane
    let north_west_bottom = ellipsoid.cartographic_to_cartesian(&Cartographic::new(
        rectangle.west,
        rectangle.north,
        minimum_height,
    ));
    let south_west_bottom = ellipsoid.cartographic_to_cartesian(&Cartographic::new(
        rectangle.west,
        rectangle.south,
        minimum_height,
    ));
    let minimum_z = plane
        .get_point_distance(north_west_bottom)
        .min(plane.get_point_distance(south_west_bottom));
    // the tangent plane touches the surface at height 0
    let maximum_z = maximum_height;

    Ok(OrientedBoundingBox::from_plane_extents(
        tangent_plane.origin,
        tangent_plane.x_axis,
        tangent_plane.y_axis,
        tangent_plane.z_axis,
        minimum_x,
        maximum_x,
        minimum_y,
        maximum_y,
        minimum_z,
        maximum_z,
    ))
}

/// Rectangles wider than a hemisphere: the box is aligned with a plane
/// through the z axis, at the center longitude and the latitude nearest the
/// equator.
fn from_wide_rectangle(
    rectangle: &Rectangle,
    minimum_height: f64,
    maximum_height: f64,
    ellipsoid: &Ellipsoid,
) -> OrientedBoundingBox {
    let fully_above_equator = rectangle.south > 0.0;
    let fully_below_equator = rectangle.north < 0.0;
    let latitude_nearest_to_equator = if fully_above_equator {
        rectangle.south
    } else if fully_below_equator {
        rectangle.north
    } else {
        0.0
    };
    let center_longitude = rectangle.compute_center().longitude;
    let to_cartesian = |longitude: f64, latitude: f64, height: f64| {
        ellipsoid.cartographic_to_cartesian(&Cartographic::new(longitude, latitude, height))
    };

    let mut plane_origin = to_cartesian(center_longitude, latitude_nearest_to_equator, maximum_height);
    // centered on the equator so the normal is horizontal
    plane_origin.z = 0.0;
    let is_pole = plane_origin.x.abs() < EPSILON10 && plane_origin.y.abs() < EPSILON10;
    let plane_normal = if is_pole {
        DVec3::X
    } else {
        plane_origin.normalize()
    };
    let plane_y_axis = DVec3::Z;
    let plane_x_axis = plane_normal.cross(plane_y_axis);
    let plane = Plane::from_point_normal(&plane_origin, &plane_normal);

    // a quarter turn away is the farthest extent along x
    let horizon_cartesian = to_cartesian(
        center_longitude + FRAC_PI_2,
        latitude_nearest_to_equator,
        maximum_height,
    );
    let maximum_x = plane
        .project_point_onto_plane(horizon_cartesian)
        .dot(plane_x_axis);
    let minimum_x = -maximum_x;

    let maximum_y = to_cartesian(
        0.0,
        rectangle.north,
        if fully_below_equator {
            minimum_height
        } else {
            maximum_height
        },
    )
    .z;
    let minimum_y = to_cartesian(
        0.0,
        rectangle.south,
        if fully_above_equator {
            minimum_height
        } else {
            maximum_height
        },
    )
    .z;

    let far_z = to_cartesian(rectangle.east, latitude_nearest_to_equator, maximum_height);
    let minimum_z = plane.get_point_distance(far_z);
    let maximum_z = 0.0;

    OrientedBoundingBox::from_plane_extents(
        plane_origin,
        plane_x_axis,
        plane_y_axis,
        plane_normal,
        minimum_x,
        maximum_x,
        minimum_y,
        maximum_y,
        minimum_z,
        maximum_z,
    )
}
