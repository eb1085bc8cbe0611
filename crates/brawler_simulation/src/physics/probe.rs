//! Contact probes for the movement controller
//!
//! Two geometric queries, both against `LevelCollider` boxes filtered by a
//! collision mask:
//! - ground: capsule from the body centre down to just below the feet
//! - wall: sphere at chest height, pushed along the input by a look-ahead
//!
//! The probes run in the fixed step before the controller, independent of when
//! the physics backend refreshes its own broad phase.

use bevy::prelude::*;

use super::collision::LevelCollider;
use crate::components::BodyCapsule;

/// How far below the feet the ground capsule reaches
pub const GROUND_PROBE_DEPTH: f32 = 0.1;
/// Wall sphere height above `radius`
pub const WALL_PROBE_LIFT: f32 = 0.1;

const SEGMENT_SEARCH_STEPS: usize = 32;

/// Axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl ProbeBox {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.closest_point(point).distance(point)
    }
}

pub fn sphere_overlaps_box(center: Vec3, radius: f32, bounds: &ProbeBox) -> bool {
    bounds.distance_to(center) <= radius
}

/// Capsule = every point within `radius` of segment `a..b`.
///
/// Distance from a point on the segment to a convex box is convex along the
/// segment, so a ternary search finds the closest approach.
pub fn capsule_overlaps_box(a: Vec3, b: Vec3, radius: f32, bounds: &ProbeBox) -> bool {
    let dist_at = |t: f32| bounds.distance_to(a.lerp(b, t));

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..SEGMENT_SEARCH_STEPS {
        let m1 = lo + (hi - lo) / 3.0;
        let m2 = hi - (hi - lo) / 3.0;
        if dist_at(m1) <= dist_at(m2) {
            hi = m2;
        } else {
            lo = m1;
        }
    }

    let best = dist_at((lo + hi) * 0.5).min(dist_at(0.0)).min(dist_at(1.0));
    best <= radius
}

/// Ground capsule end points for a unit standing at `position`
pub fn ground_probe_segment(position: Vec3, capsule: &BodyCapsule) -> (Vec3, Vec3) {
    let top = position + capsule.center;
    let bottom = position + Vec3::Y * (capsule.radius - GROUND_PROBE_DEPTH);
    (top, bottom)
}

/// Wall sphere centre. `input` is the raw direction sample (x, depth).
///
/// Input axes are mirrored in world space (positive x walks toward -X), hence
/// the offset is subtracted.
pub fn wall_probe_center(
    position: Vec3,
    capsule: &BodyCapsule,
    input: Vec2,
    look_ahead_distance: f32,
) -> Vec3 {
    let movement_offset = Vec3::new(input.x, 0.0, input.y) * look_ahead_distance;
    position + Vec3::Y * (capsule.radius + WALL_PROBE_LIFT) - movement_offset
}

/// Level boxes as seen by the probes: world centre + collider
pub type LevelShape<'a> = (Vec3, &'a LevelCollider);

pub fn probe_ground<'a>(
    position: Vec3,
    capsule: &BodyCapsule,
    mask: u32,
    level: impl IntoIterator<Item = LevelShape<'a>>,
) -> bool {
    let (top, bottom) = ground_probe_segment(position, capsule);
    level
        .into_iter()
        .filter(|(_, collider)| collider.in_mask(mask))
        .any(|(center, collider)| {
            let bounds = ProbeBox::from_center(center, collider.half_extents);
            capsule_overlaps_box(top, bottom, capsule.radius, &bounds)
        })
}

pub fn probe_wall<'a>(
    position: Vec3,
    capsule: &BodyCapsule,
    input: Vec2,
    look_ahead_distance: f32,
    mask: u32,
    level: impl IntoIterator<Item = LevelShape<'a>>,
) -> bool {
    let center = wall_probe_center(position, capsule, input, look_ahead_distance);
    level
        .into_iter()
        .filter(|(_, collider)| collider.in_mask(mask))
        .any(|(box_center, collider)| {
            let bounds = ProbeBox::from_center(box_center, collider.half_extents);
            sphere_overlaps_box(center, capsule.radius, &bounds)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::{layers, DEFAULT_COLLISION_MASK};

    fn floor() -> (Vec3, LevelCollider) {
        // Top surface at y = 0
        (Vec3::new(0.0, -0.5, 0.0), LevelCollider::new(Vec3::new(10.0, 0.5, 10.0)))
    }

    #[test]
    fn test_sphere_box_overlap() {
        let bounds = ProbeBox::from_center(Vec3::ZERO, Vec3::ONE);
        assert!(sphere_overlaps_box(Vec3::new(1.4, 0.0, 0.0), 0.5, &bounds));
        assert!(!sphere_overlaps_box(Vec3::new(1.6, 0.0, 0.0), 0.5, &bounds));
        // Centre inside the box
        assert!(sphere_overlaps_box(Vec3::ZERO, 0.01, &bounds));
    }

    #[test]
    fn test_capsule_box_overlap_along_segment() {
        let bounds = ProbeBox::from_center(Vec3::ZERO, Vec3::splat(0.5));
        // Segment passes beside the box, closest in the middle
        let a = Vec3::new(-3.0, 0.0, 0.8);
        let b = Vec3::new(3.0, 0.0, 0.8);
        assert!(capsule_overlaps_box(a, b, 0.35, &bounds));
        assert!(!capsule_overlaps_box(a, b, 0.25, &bounds));
    }

    #[test]
    fn test_ground_probe_standing_on_floor() {
        let (center, collider) = floor();
        let capsule = BodyCapsule::default();
        assert!(probe_ground(
            Vec3::ZERO,
            &capsule,
            DEFAULT_COLLISION_MASK,
            [(center, &collider)]
        ));
    }

    #[test]
    fn test_ground_probe_tolerance_below_feet() {
        let (center, collider) = floor();
        let capsule = BodyCapsule::default();

        // Reaches 0.1 below the feet
        assert!(probe_ground(
            Vec3::new(0.0, 0.09, 0.0),
            &capsule,
            DEFAULT_COLLISION_MASK,
            [(center, &collider)]
        ));
        assert!(!probe_ground(
            Vec3::new(0.0, 0.2, 0.0),
            &capsule,
            DEFAULT_COLLISION_MASK,
            [(center, &collider)]
        ));
    }

    #[test]
    fn test_ground_probe_respects_mask() {
        let (center, collider) = floor();
        let enemy_floor = collider.on_layer(layers::ENEMY);
        assert!(!probe_ground(
            Vec3::ZERO,
            &BodyCapsule::default(),
            DEFAULT_COLLISION_MASK,
            [(center, &enemy_floor)]
        ));
    }

    #[test]
    fn test_wall_probe_center_offsets() {
        let capsule = BodyCapsule::new(0.3, 1.6);
        let center = wall_probe_center(Vec3::ZERO, &capsule, Vec2::new(1.0, 0.0), 0.2);
        assert!((center - Vec3::new(-0.2, 0.4, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_wall_probe_hits_wall_ahead() {
        let capsule = BodyCapsule::new(0.3, 1.6);
        // Wall face at x = -0.4, the unit walks toward -X with positive input
        let wall = LevelCollider::new(Vec3::new(0.5, 2.0, 5.0));
        let wall_center = Vec3::new(-0.9, 2.0, 0.0);

        assert!(probe_wall(
            Vec3::ZERO,
            &capsule,
            Vec2::new(1.0, 0.0),
            0.2,
            DEFAULT_COLLISION_MASK,
            [(wall_center, &wall)]
        ));
        // Walking away from it
        assert!(!probe_wall(
            Vec3::ZERO,
            &capsule,
            Vec2::new(-1.0, 0.0),
            0.2,
            DEFAULT_COLLISION_MASK,
            [(wall_center, &wall)]
        ));
    }
}
