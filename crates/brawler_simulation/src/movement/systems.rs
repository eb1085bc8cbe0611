//! Movement systems (FixedUpdate)
//!
//! Order inside the fixed step:
//! 1. `link_unit_animators`: new controllers find their animator
//! 2. `probe_contacts`: ground / wall probes against level boxes
//! 3. `apply_direction_input` + `apply_combat_input`: input bus
//! 4. `movement_fixed_step`: state machine, velocity, turning
//! 5. `stop_dead_units`: reacts to `UnitDied`

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use super::controller::{MovementController, StepInput, StepOutcome, StepOutput};
use crate::animation::{AnimatorParams, UnitAnimator};
use crate::audio::PlaySfx;
use crate::combat::UnitDied;
use crate::components::{BodyCapsule, Direction, Player, PlayerCombat, UnitState};
use crate::effects::SpawnEffect;
use crate::input::{CombatInput, DirectionInput, InputAction};
use crate::logger::{log, log_error};
use crate::physics::{probe_ground, probe_wall, LevelCollider};

pub fn link_unit_animators(
    mut controllers: Query<(Entity, &mut MovementController, Option<&Name>), Added<MovementController>>,
    children: Query<&Children>,
    mut animators: Query<&mut UnitAnimator>,
) {
    for (entity, mut controller, name) in controllers.iter_mut() {
        let found = std::iter::once(entity)
            .chain(children.iter_descendants(entity))
            .find(|e| animators.contains(*e));

        let Some(animator_entity) = found else {
            let label = name.map(|n| n.as_str().to_string()).unwrap_or_else(|| format!("{:?}", entity));
            log_error(&format!("No animator found inside {}", label));
            continue;
        };

        controller.animator = Some(animator_entity);
        if let Ok(mut animator) = animators.get_mut(animator_entity) {
            animator.unit = Some(entity);
            animator.set_direction(controller.current_direction);
        }
    }
}

pub fn probe_contacts(
    mut units: Query<(&mut MovementController, &Transform, &BodyCapsule)>,
    level: Query<(&Transform, &LevelCollider)>,
) {
    let shapes: Vec<(Vec3, LevelCollider)> = level
        .iter()
        .map(|(transform, collider)| (transform.translation, *collider))
        .collect();

    for (mut controller, transform, capsule) in units.iter_mut() {
        let position = transform.translation;
        let mask = controller.settings.collision_mask;
        let look_ahead = controller.settings.look_ahead_distance;
        let input = controller.input_direction;

        let grounded = probe_ground(
            position,
            capsule,
            mask,
            shapes.iter().map(|(center, collider)| (*center, collider)),
        );
        let wall_ahead = probe_wall(
            position,
            capsule,
            input,
            look_ahead,
            mask,
            shapes.iter().map(|(center, collider)| (*center, collider)),
        );

        controller.grounded = grounded;
        controller.wall_ahead = wall_ahead;
    }
}

/// Copies the facing to the animator and the player combat component
fn mirror_direction(
    unit: Entity,
    animator: Option<Entity>,
    direction: Direction,
    animators: &mut Query<&mut UnitAnimator>,
    combat: &mut Query<&mut PlayerCombat>,
) {
    if let Some(mut animator) = animator.and_then(|e| animators.get_mut(e).ok()) {
        animator.set_direction(direction);
    }
    if let Ok(mut combat) = combat.get_mut(unit) {
        combat.current_direction = direction;
    }
}

pub fn apply_direction_input(
    mut events: EventReader<DirectionInput>,
    mut players: Query<(Entity, &mut MovementController, &UnitState), With<Player>>,
    mut animators: Query<&mut UnitAnimator>,
    mut combat: Query<&mut PlayerCombat>,
) {
    for event in events.read() {
        for (entity, mut controller, state) in players.iter_mut() {
            if let Some(direction) = controller.on_direction_input(state, event.vector) {
                let animator = controller.animator;
                mirror_direction(entity, animator, direction, &mut animators, &mut combat);
            }
        }
    }
}

pub fn apply_combat_input(
    mut events: EventReader<CombatInput>,
    mut players: Query<(&mut MovementController, &UnitState), With<Player>>,
) {
    for event in events.read() {
        if event.action != InputAction::Jump {
            continue;
        }
        for (mut controller, state) in players.iter_mut() {
            controller.request_jump(state);
        }
    }
}

pub fn movement_fixed_step(
    time: Res<Time<Fixed>>,
    mut units: Query<(
        &mut MovementController,
        &mut UnitState,
        &mut Velocity,
        &mut Transform,
    )>,
    mut params: Query<&mut AnimatorParams>,
    mut effects: EventWriter<SpawnEffect>,
    mut sounds: EventWriter<PlaySfx>,
) {
    let dt = time.delta_secs();
    let now = time.elapsed_secs();

    for (mut controller, mut state, mut velocity, mut transform) in units.iter_mut() {
        let input = StepInput {
            dt,
            now,
            grounded: controller.grounded,
            wall_ahead: controller.wall_ahead,
        };
        let mut out = StepOutput::default();

        let mut linvel = velocity.linvel;
        let outcome = controller.step(&mut state, &mut linvel, &input, &mut out);
        if outcome == StepOutcome::Skipped {
            continue;
        }
        velocity.linvel = linvel;

        if outcome == StepOutcome::Moved {
            transform.rotation = controller.turn_to_current_direction(transform.rotation, dt);
        }

        if let Some(mut params) = controller.animator.and_then(|e| params.get_mut(e).ok()) {
            for command in &out.animator {
                params.apply(command);
            }
        }

        let origin = transform.translation;
        for kind in out.effects {
            effects.write(SpawnEffect::new(kind, origin));
        }
        for cue in out.sounds {
            sounds.write(if cue.positional {
                PlaySfx::at(cue.name, origin)
            } else {
                PlaySfx::flat(cue.name)
            });
        }
    }
}

/// Turns units to their facing at once (used after teleports and spawns)
pub fn snap_to_direction(mut units: Query<(&MovementController, &mut Transform), Added<MovementController>>) {
    for (controller, mut transform) in units.iter_mut() {
        transform.rotation = controller.snap_to_direction_rotation(transform.rotation);
    }
}

pub fn stop_dead_units(
    mut died: EventReader<UnitDied>,
    mut units: Query<(&mut MovementController, &mut Velocity)>,
) {
    for event in died.read() {
        if let Ok((mut controller, mut velocity)) = units.get_mut(event.entity) {
            controller.death(&mut velocity.linvel);
            log(&format!("Movement stopped for dead unit {:?}", event.entity));
        }
    }
}
