use std::f64::consts::{FRAC_PI_2, PI, TAU};

use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use crate::{ellipsoid::Ellipsoid, error::GeometryError, math::*};

/// A two dimensional region specified as longitude and latitude coordinates,
/// in radians. `east < west` means the rectangle crosses the anti-meridian.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}
impl Rectangle {
    pub const MAX_VALUE: Rectangle = Rectangle {
        west: -PI,
        south: -FRAC_PI_2,
        east: PI,
        north: FRAC_PI_2,
    };
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }
    pub fn from_degrees(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west: west.to_radians(),
            south: south.to_radians(),
            east: east.to_radians(),
            north: north.to_radians(),
        }
    }
    pub fn compute_width(&self) -> f64 {
        let mut east = self.east;
        if east < self.west {
            east += TAU;
        }
        east - self.west
    }
    pub fn compute_height(&self) -> f64 {
        self.north - self.south
    }
    pub fn compute_center(&self) -> Cartographic {
        let mut east = self.east;
        let west = self.west;
        if east < west {
            east += TAU;
        }
        let longitude = negative_pi_to_pi((west + east) * 0.5);
        let latitude = (self.south + self.north) * 0.5;
        Cartographic::new(longitude, latitude, 0.0)
    }
    pub fn south_west(&self) -> Cartographic {
        Cartographic::new(self.west, self.south, 0.0)
    }
    pub fn north_west(&self) -> Cartographic {
        Cartographic::new(self.west, self.north, 0.0)
    }
    pub fn south_east(&self) -> Cartographic {
        Cartographic::new(self.east, self.south, 0.0)
    }
    pub fn north_east(&self) -> Cartographic {
        Cartographic::new(self.east, self.north, 0.0)
    }
    pub fn equals_epsilon(&self, right: &Rectangle, absolute_epsilon: f64) -> bool {
        self == right
            || (self.west - right.west).abs() <= absolute_epsilon
                && (self.south - right.south).abs() <= absolute_epsilon
                && (self.east - right.east).abs() <= absolute_epsilon
                && (self.north - right.north).abs() <= absolute_epsilon
    }
    /// Checks that every edge is inside the valid longitude/latitude range and
    /// that south does not exceed north.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(-FRAC_PI_2..=FRAC_PI_2).contains(&self.north) {
            return Err(GeometryError::InvalidRectangle(
                "north must be in the interval [-pi/2, pi/2]",
            ));
        }
        if !(-FRAC_PI_2..=FRAC_PI_2).contains(&self.south) {
            return Err(GeometryError::InvalidRectangle(
                "south must be in the interval [-pi/2, pi/2]",
            ));
        }
        if !(-PI..=PI).contains(&self.west) {
            return Err(GeometryError::InvalidRectangle(
                "west must be in the interval [-pi, pi]",
            ));
        }
        if !(-PI..=PI).contains(&self.east) {
            return Err(GeometryError::InvalidRectangle(
                "east must be in the interval [-pi, pi]",
            ));
        }
        if self.south > self.north {
            return Err(GeometryError::InvalidRectangle(
                "south must not be greater than north",
            ));
        }
        Ok(())
    }
    /// Whether the position's longitude and latitude fall inside this
    /// rectangle. Height is ignored.
    pub fn contains(&self, cartographic: &Cartographic) -> bool {
        let mut longitude = cartographic.longitude;
        let latitude = cartographic.latitude;

        let west = self.west;
        let mut east = self.east;

        if east < west {
            east += TAU;
            if longitude < 0.0 {
                longitude += TAU;
            }
        }
        (longitude > west || equals_epsilon(longitude, west, Some(EPSILON14), None))
            && (longitude < east || equals_epsilon(longitude, east, Some(EPSILON14), None))
            && latitude >= self.south
            && latitude <= self.north
    }
    /// The overlap of two rectangles, taking the anti-meridian into account.
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        let mut rectangle_east = self.east;
        let mut rectangle_west = self.west;

        let mut other_rectangle_east = other.east;
        let mut other_rectangle_west = other.west;

        if rectangle_east < rectangle_west && other_rectangle_east > 0.0 {
            rectangle_east += TAU;
        } else if other_rectangle_east < other_rectangle_west && rectangle_east > 0.0 {
            other_rectangle_east += TAU;
        }

        if rectangle_east < rectangle_west && other_rectangle_west < 0.0 {
            other_rectangle_west += TAU;
        } else if other_rectangle_east < other_rectangle_west && rectangle_west < 0.0 {
            rectangle_west += TAU;
        }

        let west = negative_pi_to_pi(rectangle_west.max(other_rectangle_west));
        let east = negative_pi_to_pi(rectangle_east.min(other_rectangle_east));

        if (self.west < self.east || other.west < other.east) && east <= west {
            return None;
        }

        let south = self.south.max(other.south);
        let north = self.north.min(other.north);

        if south >= north {
            return None;
        }
        Some(Rectangle::new(west, south, east, north))
    }
    /// Samples the rectangle so that the points bound it on the ellipsoid:
    /// the four corners plus extra points along the latitude nearest the
    /// equator.
    pub fn subsample(&self, ellipsoid: Option<&Ellipsoid>, surface_height: Option<f64>) -> Vec<DVec3> {
        let ellipsoid = ellipsoid.unwrap_or(&Ellipsoid::WGS84);
        let surface_height = surface_height.unwrap_or(0.0);
        let mut result = Vec::with_capacity(12);

        let north = self.north;
        let south = self.south;
        let east = self.east;
        let west = self.west;

        let mut lla = Cartographic::new(west, north, surface_height);
        result.push(ellipsoid.cartographic_to_cartesian(&lla));

        lla.longitude = east;
        result.push(ellipsoid.cartographic_to_cartesian(&lla));

        lla.latitude = south;
        result.push(ellipsoid.cartographic_to_cartesian(&lla));

        lla.longitude = west;
        result.push(ellipsoid.cartographic_to_cartesian(&lla));

        lla.latitude = if north < 0.0 {
            north
        } else if south > 0.0 {
            south
        } else {
            0.0
        };

        for i in 1..8 {
            lla.longitude = -PI + i as f64 * FRAC_PI_2;
            if self.contains(&lla) {
                result.push(ellipsoid.cartographic_to_cartesian(&lla));
            }
        }

        if lla.latitude == 0.0 {
            lla.longitude = west;
            result.push(ellipsoid.cartographic_to_cartesian(&lla));
            lla.longitude = east;
            result.push(ellipsoid.cartographic_to_cartesian(&lla));
        }
        result
    }
}
