//! Transient visual effects (hit sparks, defend flashes, dust puffs)
//!
//! Anything may request an effect with `SpawnEffect`; the origin is the unit's
//! animator position and the configured height offset is added here. Each
//! instance lives for its prefab's lifetime and is then despawned. The client
//! attaches meshes/particles to `EffectInstance` entities.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::components::RendererToggle;
use crate::logger::log_warning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum EffectKind {
    Hit,
    Defend,
    DustLand,
    DustJump,
}

impl EffectKind {
    /// Height above the unit origin the effect appears at
    pub fn default_height(self) -> f32 {
        match self {
            EffectKind::Hit => 1.6,
            EffectKind::Defend => 1.3,
            EffectKind::DustLand | EffectKind::DustJump => 0.13,
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SpawnEffect {
    pub kind: EffectKind,
    pub origin: Vec3,
}

impl SpawnEffect {
    pub fn new(kind: EffectKind, origin: Vec3) -> Self {
        Self { kind, origin }
    }
}

/// What to spawn for one effect kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectPrefab {
    /// Asset name resolved by the client
    pub name: String,
    pub height: f32,
    /// Seconds before the instance is removed
    pub lifetime: f32,
}

impl EffectPrefab {
    pub fn new(name: impl Into<String>, height: f32, lifetime: f32) -> Self {
        Self {
            name: name.into(),
            height,
            lifetime,
        }
    }
}

/// Configured prefabs. A kind without an entry is reported and skipped.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    pub prefabs: HashMap<EffectKind, EffectPrefab>,
}

impl Default for EffectSettings {
    fn default() -> Self {
        let prefabs = [
            (EffectKind::Hit, "HitEffect", 0.5),
            (EffectKind::Defend, "DefendEffect", 0.5),
            (EffectKind::DustLand, "DustEffectLand", 1.0),
            (EffectKind::DustJump, "DustEffectJump", 1.0),
        ]
        .into_iter()
        .map(|(kind, name, lifetime)| {
            (kind, EffectPrefab::new(name, kind.default_height(), lifetime))
        })
        .collect();

        Self { prefabs }
    }
}

impl EffectSettings {
    pub fn prefab(&self, kind: EffectKind) -> Option<&EffectPrefab> {
        self.prefabs.get(&kind)
    }
}

/// A spawned effect, counting down to despawn
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform, RendererToggle)]
pub struct EffectInstance {
    pub kind: EffectKind,
    pub prefab: String,
    pub remaining: f32,
}

impl EffectInstance {
    /// Returns true once the lifetime is used up
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }
}

pub fn spawn_effects(
    mut commands: Commands,
    mut requests: EventReader<SpawnEffect>,
    settings: Res<EffectSettings>,
) {
    for request in requests.read() {
        let Some(prefab) = settings.prefab(request.kind) else {
            log_warning(&format!("No effect prefab configured for {:?}", request.kind));
            continue;
        };

        commands.spawn((
            Name::new(prefab.name.clone()),
            Transform::from_translation(request.origin + Vec3::Y * prefab.height),
            EffectInstance {
                kind: request.kind,
                prefab: prefab.name.clone(),
                remaining: prefab.lifetime,
            },
        ));
    }
}

pub fn expire_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut EffectInstance)>,
) {
    let dt = time.delta_secs();
    for (entity, mut effect) in effects.iter_mut() {
        if effect.tick(dt) {
            commands.entity(entity).despawn();
        }
    }
}

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SpawnEffect>()
            .init_resource::<EffectSettings>()
            .add_systems(Update, (spawn_effects, expire_effects).chain());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_heights() {
        let settings = EffectSettings::default();
        assert_eq!(settings.prefab(EffectKind::Hit).map(|p| p.height), Some(1.6));
        assert_eq!(settings.prefab(EffectKind::Defend).map(|p| p.height), Some(1.3));
        assert_eq!(settings.prefab(EffectKind::DustLand).map(|p| p.height), Some(0.13));
        assert_eq!(settings.prefab(EffectKind::DustJump).map(|p| p.height), Some(0.13));
    }

    #[test]
    fn test_instance_expires() {
        let mut effect = EffectInstance {
            kind: EffectKind::Hit,
            prefab: "HitEffect".to_string(),
            remaining: 0.1,
        };
        assert!(!effect.tick(0.05));
        assert!(effect.tick(0.05));
    }
}
