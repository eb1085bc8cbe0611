//! Camera shake
//!
//! `CameraShaker` sits on the camera entity (client side). The simulation
//! only keeps the trauma value and a sampled offset; the client adds the
//! offset to the camera transform. Sampling goes through `DeterministicRng`
//! so replays shake identically.

use bevy::prelude::*;
use rand::Rng;

use crate::DeterministicRng;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraShaker {
    /// 0..=1, offset magnitude scales with trauma squared
    pub trauma: f32,
    /// Trauma lost per second
    pub decay: f32,
    pub max_offset: f32,
    /// Offset for the current frame
    pub offset: Vec3,
}

impl Default for CameraShaker {
    fn default() -> Self {
        Self {
            trauma: 0.0,
            decay: 1.5,
            max_offset: 0.5,
            offset: Vec3::ZERO,
        }
    }
}

impl CameraShaker {
    pub fn shake(&mut self, intensity: f32) {
        self.trauma = (self.trauma + intensity.max(0.0)).min(1.0);
    }

    pub fn is_shaking(&self) -> bool {
        self.trauma > 0.0
    }

    /// Advances the shake. `noise` holds three samples in [-1, 1].
    pub fn advance(&mut self, dt: f32, noise: Vec3) {
        if self.trauma <= 0.0 {
            self.offset = Vec3::ZERO;
            return;
        }
        let strength = self.trauma * self.trauma * self.max_offset;
        self.offset = noise.clamp(Vec3::NEG_ONE, Vec3::ONE) * strength;
        self.trauma = (self.trauma - self.decay * dt).max(0.0);
    }
}

pub fn update_camera_shake(
    time: Res<Time>,
    mut rng: ResMut<DeterministicRng>,
    mut shakers: Query<&mut CameraShaker>,
) {
    let dt = time.delta_secs();
    for mut shaker in shakers.iter_mut() {
        if !shaker.is_shaking() {
            if shaker.offset != Vec3::ZERO {
                shaker.offset = Vec3::ZERO;
            }
            continue;
        }
        let noise = Vec3::new(
            rng.rng.gen_range(-1.0..=1.0),
            rng.rng.gen_range(-1.0..=1.0),
            rng.rng.gen_range(-1.0..=1.0),
        );
        shaker.advance(dt, noise);
    }
}

pub struct CameraShakePlugin;

impl Plugin for CameraShakePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraShaker>()
            .add_systems(Update, update_camera_shake);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trauma_is_capped() {
        let mut shaker = CameraShaker::default();
        shaker.shake(0.7);
        shaker.shake(0.7);
        assert_eq!(shaker.trauma, 1.0);
        shaker.shake(-3.0);
        assert_eq!(shaker.trauma, 1.0);
    }

    #[test]
    fn test_shake_decays_to_rest() {
        let mut shaker = CameraShaker::default();
        shaker.shake(0.6);

        shaker.advance(0.1, Vec3::ONE);
        assert!((shaker.offset.x - 0.6 * 0.6 * 0.5).abs() < 1e-6);
        assert!((shaker.trauma - 0.45).abs() < 1e-6);

        for _ in 0..10 {
            shaker.advance(0.1, Vec3::ONE);
        }
        assert!(!shaker.is_shaking());
        shaker.advance(0.1, Vec3::ONE);
        assert_eq!(shaker.offset, Vec3::ZERO);
    }
}
