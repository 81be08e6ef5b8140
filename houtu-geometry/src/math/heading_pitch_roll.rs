use bevy::math::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use super::equals_epsilon;

/// A rotation expressed as heading (about the negative z axis), pitch (about
/// the negative y axis) and roll (about the positive x axis), in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct HeadingPitchRoll {
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,
}
impl HeadingPitchRoll {
    pub fn new(heading: f64, pitch: f64, roll: f64) -> Self {
        Self {
            heading,
            pitch,
            roll,
        }
    }
    pub fn from_degrees(heading: f64, pitch: f64, roll: f64) -> Self {
        Self {
            heading: heading.to_radians(),
            pitch: pitch.to_radians(),
            roll: roll.to_radians(),
        }
    }
    pub fn from_quaternion(quaternion: DQuat) -> Self {
        let test = 2. * (quaternion.w * quaternion.y - quaternion.z * quaternion.x);
        let denominator_roll =
            1. - 2. * (quaternion.x * quaternion.x + quaternion.y * quaternion.y);
        let numerator_roll = 2. * (quaternion.w * quaternion.x + quaternion.y * quaternion.z);
        let denominator_heading =
            1. - 2. * (quaternion.y * quaternion.y + quaternion.z * quaternion.z);
        let numerator_heading = 2. * (quaternion.w * quaternion.z + quaternion.x * quaternion.y);
        Self {
            heading: -numerator_heading.atan2(denominator_heading),
            pitch: -test.clamp(-1.0, 1.0).asin(),
            roll: numerator_roll.atan2(denominator_roll),
        }
    }
    pub fn equals_epsilon(
        &self,
        right: &HeadingPitchRoll,
        relative_epsilon: Option<f64>,
        absolute_epsilon: Option<f64>,
    ) -> bool {
        self == right
            || equals_epsilon(
                self.heading,
                right.heading,
                relative_epsilon,
                absolute_epsilon,
            ) && equals_epsilon(self.pitch, right.pitch, relative_epsilon, absolute_epsilon)
                && equals_epsilon(self.roll, right.roll, relative_epsilon, absolute_epsilon)
    }
}

pub trait Quaternion {
    fn from_heading_pitch_roll(hpr: &HeadingPitchRoll) -> DQuat;
}
impl Quaternion for DQuat {
    fn from_heading_pitch_roll(hpr: &HeadingPitchRoll) -> DQuat {
        let roll = DQuat::from_axis_angle(DVec3::X, hpr.roll);
        let pitch = DQuat::from_axis_angle(DVec3::Y, -hpr.pitch);
        let heading = DQuat::from_axis_angle(DVec3::Z, -hpr.heading);
        heading * (pitch * roll)
    }
}
