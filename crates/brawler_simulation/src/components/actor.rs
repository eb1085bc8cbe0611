//! Body and vitality components shared by players and enemies

use bevy::prelude::*;

/// Unit health
///
/// Invariant: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Marker: unit died (health reached zero)
///
/// Players stay in the world, enemies are removed by the death flicker.
#[derive(Component, Debug, Clone, Copy)]
pub struct Dead;

/// Capsule describing the unit body, in the unit's local space.
///
/// `center` is the capsule centre relative to the root (feet at the origin).
/// The spawn helpers build the rapier collider from the same numbers, and the
/// contact probes read them back.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BodyCapsule {
    pub radius: f32,
    pub height: f32,
    pub center: Vec3,
}

impl Default for BodyCapsule {
    fn default() -> Self {
        Self::new(0.3, 1.6)
    }
}

impl BodyCapsule {
    /// Capsule standing on the origin
    pub fn new(radius: f32, height: f32) -> Self {
        Self {
            radius,
            height,
            center: Vec3::Y * (height * 0.5),
        }
    }

    /// Half length of the inner segment (rapier `capsule_y` argument)
    pub fn half_segment(&self) -> f32 {
        (self.height * 0.5 - self.radius).max(0.0)
    }
}
