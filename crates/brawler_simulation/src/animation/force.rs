//! Short forward push started by the `AddForce` keyframe

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use crate::components::Direction;
use crate::math::sinerp;

/// How fast the push runs through its curve (1 / duration in seconds)
pub const FORWARD_FORCE_RATE: f32 = 8.0;

/// Drives the unit along `direction` while the speed eases from `force` to
/// the unit's vertical speed. The whole velocity is overwritten on each step,
/// so depth and vertical motion stop for the duration of the push.
///
/// The direction is captured when the push starts; turning mid-push does not
/// bend it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ForwardForce {
    pub force: f32,
    pub direction: Direction,
    pub t: f32,
}

impl ForwardForce {
    pub fn new(force: f32, direction: Direction) -> Self {
        Self {
            force,
            direction,
            t: 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.t >= 1.0
    }

    /// Velocity for the current point of the curve, given the current vertical speed
    pub fn velocity(&self, vertical_speed: f32) -> Vec3 {
        let speed = sinerp(self.force, vertical_speed, self.t);
        Vec3::X * self.direction.sign() as f32 * speed
    }

    /// Returns the velocity for this step and moves along the curve
    pub fn advance(&mut self, dt: f32, vertical_speed: f32) -> Vec3 {
        let velocity = self.velocity(vertical_speed);
        self.t += dt * FORWARD_FORCE_RATE;
        velocity
    }
}

/// Fixed step: replaces `Velocity.linvel` until the curve runs out
pub fn apply_forward_force(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut pushed: Query<(Entity, &mut ForwardForce, &mut Velocity)>,
) {
    let dt = time.delta_secs();
    for (entity, mut force, mut velocity) in pushed.iter_mut() {
        if force.is_finished() {
            commands.entity(entity).remove::<ForwardForce>();
            continue;
        }
        velocity.linvel = force.advance(dt, velocity.linvel.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_full_force_along_direction() {
        let force = ForwardForce::new(4.0, Direction::Right);
        assert_eq!(force.velocity(0.0), Vec3::new(-4.0, 0.0, 0.0));

        let force = ForwardForce::new(4.0, Direction::Left);
        assert_eq!(force.velocity(0.0), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_push_overwrites_depth_and_vertical_speed() {
        let mut force = ForwardForce::new(2.0, Direction::Left);
        let velocity = force.advance(1.0 / 60.0, -1.0);
        assert_eq!(velocity.y, 0.0);
        assert_eq!(velocity.z, 0.0);
        assert_eq!(velocity.x, 2.0);

        // Near the end of the curve the speed approaches the vertical speed
        force.t = 0.999;
        assert!((force.velocity(-1.0).x + 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_decays_and_finishes() {
        let mut force = ForwardForce::new(4.0, Direction::Left);
        let dt = 1.0 / 60.0;

        let mut last = f32::MAX;
        let mut steps = 0;
        while !force.is_finished() {
            let vx = force.advance(dt, 0.0).x;
            assert!(vx <= last);
            assert!(vx >= 0.0);
            last = vx;
            steps += 1;
        }
        // 1 / (8 / 60) rounds up to 8 steps
        assert_eq!(steps, 8);
        assert!(last < 4.0 * 0.1);
    }
}
