use std::f64::consts::{PI, TAU};

mod cartesian3;
mod cartographic;
mod epsilon;
mod heading_pitch_roll;
mod transform;

pub use cartesian3::*;
pub use cartographic::*;
pub use epsilon::*;
pub use heading_pitch_roll::*;
pub use transform::*;

/// Compares two scalars with a relative tolerance, falling back to an
/// absolute one (which defaults to the relative tolerance).
pub fn equals_epsilon(
    left: f64,
    right: f64,
    relative_epsilon: Option<f64>,
    absolute_epsilon: Option<f64>,
) -> bool {
    let relative_epsilon = relative_epsilon.unwrap_or(0.0);
    let absolute_epsilon = absolute_epsilon.unwrap_or(relative_epsilon);
    let diff = (left - right).abs();
    diff <= absolute_epsilon || diff <= relative_epsilon * left.abs().max(right.abs())
}

/// -1, 0 or 1. Unlike `f64::signum`, zero maps to zero.
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Modulo that always takes the sign of the divisor.
pub fn modulo(m: f64, n: f64) -> f64 {
    if sign(m) == sign(n) && m.abs() < n.abs() {
        return m;
    }
    ((m % n) + n) % n
}

pub fn negative_pi_to_pi(angle: f64) -> f64 {
    if (-PI..=PI).contains(&angle) {
        return angle;
    }
    zero_to_two_pi(angle + PI) - PI
}

pub fn zero_to_two_pi(angle: f64) -> f64 {
    if (0.0..=TAU).contains(&angle) {
        return angle;
    }
    let remainder = modulo(angle, TAU);
    if remainder.abs() < EPSILON14 && angle.abs() > EPSILON14 {
        return TAU;
    }
    remainder
}
