#[derive(thiserror::Error, Debug)]
pub enum GeometryError {
    #[error("ellipsoid must be an ellipsoid of revolution, got radii.x = {x}, radii.y = {y}")]
    NotRevolutionSolid { x: f64, y: f64 },
    #[error("invalid rectangle: {0}")]
    InvalidRectangle(&'static str),
    #[error("minimum height {minimum} is greater than maximum height {maximum}")]
    InvalidHeightRange { minimum: f64, maximum: f64 },
    #[error("cannot build a tangent plane at a point this close to the ellipsoid center")]
    DegenerateTangentPlane,
    #[error("could not anchor the {0} wall of the bounding region")]
    DegenerateRegion(&'static str),
    #[error("bounding volume has neither a region nor a box")]
    MissingBoundingVolume,
    #[error("unknown ellipsoid: {0}")]
    UnknownEllipsoid(String),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
