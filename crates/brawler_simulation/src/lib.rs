//! Brawler simulation core
//!
//! Headless ECS simulation of a 3D beat 'em up unit on Bevy 0.16:
//! - movement: walk / jump / land controller over rapier rigid bodies
//! - animation: animator parameters + keyframe callback dispatch
//! - effects, audio, camera shake: requests the client turns into visuals
//! - combat: hit checks, projectiles, damage, death
//!
//! The client crate adds rendering, the rapier physics plugin and keyboard
//! input on top of `SimulationPlugin`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod animation;
pub mod audio;
pub mod camera;
pub mod combat;
pub mod components;
pub mod config;
pub mod effects;
pub mod input;
pub mod logger;
pub mod math;
pub mod movement;
pub mod physics;
pub mod spawn;

pub use animation::{
    AnimationKeyframe, AnimationPlugin, AnimatorParams, DeathFlicker, ForwardForce,
    KeyframeCallback, KeyframeError, KeyframeParam, UnitAnimator,
};
pub use audio::{AudioLibrary, AudioPlugin, AudioQueue, PlaySfx};
pub use camera::{CameraShakePlugin, CameraShaker};
pub use combat::{
    CombatPlugin, CombatSettings, DamageDealt, HitCheckRequested, Projectile, ProjectileDef,
    ProjectileRegistry, UnitDied,
};
pub use components::*;
pub use config::{load_config, BrawlerConfig, ConfigError, ConfigPlugin};
pub use effects::{EffectInstance, EffectKind, EffectSettings, EffectsPlugin, SpawnEffect};
pub use input::{CombatInput, DirectionInput, InputAction, InputBusPlugin};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel};
pub use movement::{MovementController, MovementPlugin, MovementSet, MovementSettings};
pub use physics::{spawn_level_box, LevelCollider};
pub use spawn::{spawn_demo_stage, spawn_enemy, spawn_player, UnitBlueprint};

/// Main simulation plugin (all subsystems)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Keep the seed of create_headless_app if it already set one
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // 60Hz fixed step drives movement, forces and combat
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .register_type::<UnitState>()
            .register_type::<Health>()
            .register_type::<BodyCapsule>()
            .register_type::<LevelCollider>()
            .add_plugins((
                InputBusPlugin,
                MovementPlugin,
                AnimationPlugin,
                EffectsPlugin,
                AudioPlugin,
                CameraShakePlugin,
                CombatPlugin,
            ));
    }
}

/// Seeded RNG resource
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Minimal Bevy app for headless runs and tests
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0));

    app
}

/// Byte snapshot of every `T` in the world, ordered by entity index
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
