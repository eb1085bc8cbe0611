//! Damage application and death
//!
//! Flow:
//! 1. `DamageDealt` (melee hit check or projectile)
//! 2. `apply_damage` lowers `Health`, emits `UnitDied` on the lethal hit
//! 3. `handle_unit_death` marks the unit `Dead`, sets state Death and starts
//!    the death flicker on enemies
//!
//! Movement reacts to `UnitDied` on its own (see `movement::systems`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::animation::DeathFlicker;
use crate::components::{Dead, Health, Player, UnitState, UnitStateKind};
use crate::logger::{log, log_warning};

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatSettings {
    /// Seconds an enemy corpse stays before it starts flickering
    pub death_flicker_delay: f32,
}

impl Default for CombatSettings {
    fn default() -> Self {
        Self {
            death_flicker_delay: 1.0,
        }
    }
}

pub fn apply_damage(
    mut damage_events: EventReader<DamageDealt>,
    mut died_events: EventWriter<UnitDied>,
    mut targets: Query<&mut Health, Without<Dead>>,
) {
    for hit in damage_events.read() {
        let Ok(mut health) = targets.get_mut(hit.target) else {
            log_warning(&format!(
                "DamageDealt: target {:?} has no Health or is already dead",
                hit.target
            ));
            continue;
        };

        let was_alive = health.is_alive();
        health.take_damage(hit.damage);

        if was_alive && !health.is_alive() {
            died_events.write(UnitDied {
                entity: hit.target,
                killer: Some(hit.attacker),
            });
            log(&format!("Unit {:?} killed by {:?}", hit.target, hit.attacker));
        }
    }
}

pub fn handle_unit_death(
    mut commands: Commands,
    mut died_events: EventReader<UnitDied>,
    mut units: Query<(Option<&mut UnitState>, Has<Player>)>,
    settings: Res<CombatSettings>,
) {
    for event in died_events.read() {
        let Ok((state, is_player)) = units.get_mut(event.entity) else {
            continue;
        };
        if let Some(mut state) = state {
            state.set_state(UnitStateKind::Death);
        }

        let Ok(mut entity_commands) = commands.get_entity(event.entity) else {
            continue;
        };
        entity_commands.insert(Dead);
        if !is_player {
            entity_commands.insert(DeathFlicker::new(settings.death_flicker_delay));
        }
    }
}
