use bevy::math::{DMat4, DQuat, DVec3};

use super::*;
use crate::ellipsoid::Ellipsoid;

/// Computes a 4x4 transformation from a reference frame with an east-north-up
/// axes centered at `origin` to the ellipsoid's fixed reference frame.
///
/// Columns are east, north, up and the translation `origin`.
pub fn east_north_up_to_fixed_frame(origin: &DVec3, ellipsoid: Option<&Ellipsoid>) -> DMat4 {
    let (east, north, up) = if origin.equals_epsilon(DVec3::ZERO, Some(EPSILON14), None) {
        // degenerate local frame
        (DVec3::Y, DVec3::NEG_X, DVec3::Z)
    } else if equals_epsilon(origin.x, 0.0, Some(EPSILON14), None)
        && equals_epsilon(origin.y, 0.0, Some(EPSILON14), None)
    {
        // origin is at a pole
        let sign = sign(origin.z);
        (
            DVec3::Y,
            DVec3::new(-sign, 0.0, 0.0),
            DVec3::new(0.0, 0.0, sign),
        )
    } else {
        let ellipsoid = ellipsoid.unwrap_or(&Ellipsoid::WGS84);
        // origin is away from the center, so the normal exists
        let up = ellipsoid
            .geodetic_surface_normal(origin)
            .unwrap_or_else(|| origin.normalize());
        let east = DVec3::new(-origin.y, origin.x, 0.0).normalize();
        let north = up.cross(east);
        (east, north, up)
    };
    DMat4::from_cols(
        east.extend(0.0),
        north.extend(0.0),
        up.extend(0.0),
        origin.extend(1.0),
    )
}

/// Like [`east_north_up_to_fixed_frame`], but rotated by `heading_pitch_roll`
/// relative to the local east-north-up axes.
pub fn heading_pitch_roll_to_fixed_frame(
    origin: &DVec3,
    heading_pitch_roll: &HeadingPitchRoll,
    ellipsoid: Option<&Ellipsoid>,
) -> DMat4 {
    let hpr_quaternion = DQuat::from_heading_pitch_roll(heading_pitch_roll);
    let hpr_matrix = DMat4::from_quat(hpr_quaternion);
    east_north_up_to_fixed_frame(origin, ellipsoid) * hpr_matrix
}

#[cfg(test)]
mod tests {
    use bevy::math::DVec4;

    use super::*;

    #[test]
    fn north_pole_frame() {
        let origin = DVec3::new(0.0, 0.0, 1.0);
        let result = east_north_up_to_fixed_frame(&origin, None);
        assert_eq!(result.col(0), DVec4::new(0., 1., 0., 0.));
        assert_eq!(result.col(1), DVec4::new(-1., 0., 0., 0.));
        assert_eq!(result.col(2), DVec4::new(0., 0., 1., 0.));
        assert_eq!(result.col(3), DVec4::new(0., 0., 1., 1.));
    }

    #[test]
    fn south_pole_frame() {
        let origin = DVec3::new(0.0, 0.0, -1.0);
        let result = east_north_up_to_fixed_frame(&origin, None);
        assert_eq!(result.col(0), DVec4::new(0., 1., 0., 0.));
        assert_eq!(result.col(1), DVec4::new(1., 0., 0., 0.));
        assert_eq!(result.col(2), DVec4::new(0., 0., -1., 0.));
        assert_eq!(result.col(3), DVec4::new(0., 0., -1., 1.));
    }

    #[test]
    fn center_frame_is_degenerate_but_valid() {
        let result = east_north_up_to_fixed_frame(&DVec3::ZERO, None);
        assert_eq!(result.col(0), DVec4::new(0., 1., 0., 0.));
        assert_eq!(result.col(1), DVec4::new(-1., 0., 0., 0.));
        assert_eq!(result.col(2), DVec4::new(0., 0., 1., 0.));
        assert_eq!(result.col(3), DVec4::new(0., 0., 0., 1.));
    }

    #[test]
    fn equator_frame() {
        let origin = DVec3::new(1.0, 0.0, 0.0);
        let result = east_north_up_to_fixed_frame(&origin, Some(&Ellipsoid::UNIT_SPHERE));
        assert!(result
            .col(0)
            .abs_diff_eq(DVec4::new(0., 1., 0., 0.), EPSILON14));
        assert!(result
            .col(1)
            .abs_diff_eq(DVec4::new(0., 0., 1., 0.), EPSILON14));
        assert!(result
            .col(2)
            .abs_diff_eq(DVec4::new(1., 0., 0., 0.), EPSILON14));
        assert_eq!(result.col(3), DVec4::new(1., 0., 0., 1.));
    }

    #[test]
    fn general_frame_is_orthonormal() {
        let ellipsoid = Ellipsoid::WGS84;
        let origin =
            ellipsoid.cartographic_to_cartesian(&Cartographic::from_degrees(-75.59, 40.03, 0.0));
        let result = east_north_up_to_fixed_frame(&origin, Some(&ellipsoid));
        let east = DVec3::from_cartesian4(result.col(0));
        let north = DVec3::from_cartesian4(result.col(1));
        let up = DVec3::from_cartesian4(result.col(2));
        assert!((east.length() - 1.0).abs() < EPSILON14);
        assert!((north.length() - 1.0).abs() < EPSILON14);
        assert!((up.length() - 1.0).abs() < EPSILON14);
        assert!(east.dot(north).abs() < EPSILON14);
        assert!(east.dot(up).abs() < EPSILON14);
        assert!(east.cross(north).equals_epsilon(up, Some(0.0), Some(EPSILON14)));
        // north points toward the positive pole
        assert!(north.z > 0.0);
    }

    #[test]
    fn heading_pitch_roll_frame_without_rotation_is_enu() {
        let origin = DVec3::new(1.0, 2.0, 3.0);
        let enu = east_north_up_to_fixed_frame(&origin, None);
        let hpr = heading_pitch_roll_to_fixed_frame(&origin, &HeadingPitchRoll::default(), None);
        assert!(enu.abs_diff_eq(hpr, EPSILON14));
    }

    #[test]
    fn heading_turns_east_toward_south() {
        let origin = DVec3::new(1.0, 0.0, 0.0);
        let hpr = HeadingPitchRoll::new(std::f64::consts::FRAC_PI_2, 0.0, 0.0);
        let result =
            heading_pitch_roll_to_fixed_frame(&origin, &hpr, Some(&Ellipsoid::UNIT_SPHERE));
        // local x (east at heading 0) now points south
        assert!(result
            .col(0)
            .abs_diff_eq(DVec4::new(0., 0., -1., 0.), EPSILON14));
    }
}
