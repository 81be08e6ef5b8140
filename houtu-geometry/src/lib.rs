//! Ellipsoid geodesy and bounding-volume math for streaming tiled globes:
//! cartographic/cartesian conversion, local frames, and the boxes and
//! regions a tile selector culls against a view frustum and ranks by
//! distance.

mod bounding_volume;
mod culling_volume;
mod ellipsoid;
mod error;
pub mod geometry;
pub mod math;
mod tile_bounding_region;

pub use bounding_volume::*;
pub use culling_volume::*;
pub use ellipsoid::*;
pub use error::*;
pub use geometry::*;
pub use math::*;
pub use tile_bounding_region::*;

pub use bevy::math::{DMat3, DMat4, DQuat, DVec2, DVec3, DVec4};
