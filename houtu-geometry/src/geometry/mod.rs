mod ellipsoid_tangent_plane;
pub mod intersection_tests;
mod oriented_bounding_box;
mod plane;
mod ray;
mod rectangle;

pub use ellipsoid_tangent_plane::*;
pub use oriented_bounding_box::*;
pub use plane::*;
pub use ray::*;
pub use rectangle::*;
