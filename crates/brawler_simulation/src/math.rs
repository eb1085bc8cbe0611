//! Easing curves and planar rotation helpers

use bevy::math::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Unclamped linear interpolation
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Ease-out: fast start, slow finish. `t` is clamped to [0, 1].
pub fn sinerp(start: f32, end: f32, t: f32) -> f32 {
    lerp(start, end, (t.clamp(0.0, 1.0) * FRAC_PI_2).sin())
}

/// Ease-in: slow start, fast finish. `t` is clamped to [0, 1].
pub fn coserp(start: f32, end: f32, t: f32) -> f32 {
    lerp(start, end, 1.0 - (t.clamp(0.0, 1.0) * FRAC_PI_2).cos())
}

/// Yaw (radians around +Y) that maps local +Z onto `dir`
pub fn yaw_of(dir: Vec3) -> f32 {
    dir.x.atan2(dir.z)
}

/// Rotation whose local +Z points along the horizontal part of `dir`
pub fn yaw_rotation(dir: Vec3) -> Quat {
    Quat::from_rotation_y(yaw_of(dir))
}

/// Rotates the horizontal vector `current` toward `target` by at most
/// `max_radians`. Both are treated as directions on the XZ plane; the result is
/// unit length.
pub fn rotate_towards_planar(current: Vec3, target: Vec3, max_radians: f32) -> Vec3 {
    let from = yaw_of(current);
    let to = yaw_of(target);

    let mut delta = (to - from) % TAU;
    if delta > PI {
        delta -= TAU;
    } else if delta < -PI {
        delta += TAU;
    }

    let step = delta.clamp(-max_radians.abs(), max_radians.abs());
    let yaw = from + step;
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_easing_endpoints() {
        assert!((sinerp(2.0, 6.0, 0.0) - 2.0).abs() < EPS);
        assert!((sinerp(2.0, 6.0, 1.0) - 6.0).abs() < EPS);
        assert!((coserp(15.0, 35.0, 0.0) - 15.0).abs() < EPS);
        assert!((coserp(15.0, 35.0, 1.0) - 35.0).abs() < EPS);
    }

    #[test]
    fn test_easing_shape() {
        // sinerp runs ahead of linear, coserp lags behind
        assert!(sinerp(0.0, 1.0, 0.5) > 0.5);
        assert!(coserp(0.0, 1.0, 0.5) < 0.5);
    }

    #[test]
    fn test_easing_clamps_t() {
        assert!((sinerp(0.0, 1.0, 3.0) - 1.0).abs() < EPS);
        assert!((coserp(0.0, 1.0, -1.0)).abs() < EPS);
    }

    #[test]
    fn test_yaw_rotation_maps_z() {
        let rot = yaw_rotation(Vec3::X);
        let front = rot * Vec3::Z;
        assert!((front - Vec3::X).length() < EPS);

        let rot = yaw_rotation(Vec3::NEG_Z);
        let front = rot * Vec3::Z;
        assert!((front - Vec3::NEG_Z).length() < 1e-4);
        // No roll: up stays up
        assert!(((rot * Vec3::Y) - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn test_rotate_towards_limited_step() {
        let result = rotate_towards_planar(Vec3::Z, Vec3::X, 0.1);
        assert!((yaw_of(result) - 0.1).abs() < EPS);
    }

    #[test]
    fn test_rotate_towards_reaches_target() {
        let result = rotate_towards_planar(Vec3::Z, Vec3::X, 10.0);
        assert!((result - Vec3::X).length() < EPS);
    }

    #[test]
    fn test_rotate_towards_takes_short_way() {
        // Slightly past +X, the short way back to +Z is a negative turn
        let current = Vec3::new(1.0, 0.0, -0.1).normalize();
        let result = rotate_towards_planar(current, Vec3::Z, 0.05);
        assert!(yaw_of(result) < yaw_of(current));
    }
}
