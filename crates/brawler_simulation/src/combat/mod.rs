//! Combat glue between animation keyframes and health
//!
//! The simulation does not pick attacks. It resolves what the animation
//! reports:
//! - `Check4Hit` keyframe → `HitCheckRequested` → melee sphere test
//! - `SpawnProjectile` keyframe → `Projectile` flight + hit test
//! - both → `DamageDealt` → `Health` → `UnitDied`

use bevy::prelude::*;

pub mod damage;
pub mod hit;
pub mod projectile;

pub use damage::{apply_damage, handle_unit_death, CombatSettings, DamageDealt, UnitDied};
pub use hit::{resolve_hit_checks, HitCheckRequested};
pub use projectile::{spawn_projectile, update_projectiles, Projectile, ProjectileDef, ProjectileRegistry};

#[cfg(test)]
mod damage_tests;

/// Ordering inside the fixed step
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Hits,
    Damage,
    Death,
}

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HitCheckRequested>()
            .add_event::<DamageDealt>()
            .add_event::<UnitDied>()
            .init_resource::<CombatSettings>()
            .init_resource::<ProjectileRegistry>();

        app.configure_sets(
            FixedUpdate,
            (CombatSet::Hits, CombatSet::Damage, CombatSet::Death).chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                (resolve_hit_checks, update_projectiles).in_set(CombatSet::Hits),
                apply_damage.in_set(CombatSet::Damage),
                handle_unit_death.in_set(CombatSet::Death),
            ),
        );
    }
}
