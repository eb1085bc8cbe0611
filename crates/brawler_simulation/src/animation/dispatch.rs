//! Keyframe dispatch
//!
//! Every system here reads the same `AnimationKeyframe` stream and handles
//! its own group of callbacks:
//! - combat routing (Ready, Check4Hit) by unit ownership
//! - effects and sounds at the animator position
//! - motion (AddForce, Flicker) on the unit root
//! - camera shake
//! - projectile spawning for player units

use bevy::prelude::*;

use super::animator::UnitAnimator;
use super::flicker::DeathFlicker;
use super::force::ForwardForce;
use super::keyframe::{AnimationKeyframe, KeyframeCallback};
use crate::audio::PlaySfx;
use crate::camera::CameraShaker;
use crate::combat::{spawn_projectile, HitCheckRequested, ProjectileRegistry};
use crate::components::{Direction, EnemyAi, Player, PlayerCombat, ProjectileSpawnPoint};
use crate::effects::{EffectKind, SpawnEffect};
use crate::logger::{log, log_warning};

/// Sound effects play slightly above the unit origin
const SFX_HEIGHT: f32 = 1.0;

/// Unit root and facing for the animator a keyframe came from
fn keyframe_source(
    animators: &Query<&UnitAnimator>,
    keyframe: &AnimationKeyframe,
) -> Option<(Entity, Direction)> {
    animators
        .get(keyframe.animator)
        .ok()
        .map(|animator| (animator.root(keyframe.animator), animator.current_direction))
}

fn label(entity: Entity, name: Option<&Name>) -> String {
    match name {
        Some(name) => name.as_str().to_string(),
        None => format!("{:?}", entity),
    }
}

pub fn route_combat_keyframes(
    mut keyframes: EventReader<AnimationKeyframe>,
    animators: Query<&UnitAnimator>,
    roots: Query<(Option<&Name>, Has<Player>)>,
    mut players: Query<&mut PlayerCombat>,
    mut enemies: Query<&mut EnemyAi>,
    mut hit_checks: EventWriter<HitCheckRequested>,
) {
    for keyframe in keyframes.read() {
        let Some((root, _)) = keyframe_source(&animators, keyframe) else {
            log_warning(&format!(
                "Keyframe {:?} sent to {:?}, which has no UnitAnimator",
                keyframe.callback, keyframe.animator
            ));
            continue;
        };
        let Ok((name, is_player)) = roots.get(root) else {
            continue;
        };

        match keyframe.callback {
            KeyframeCallback::Ready => {
                if is_player {
                    if let Ok(mut combat) = players.get_mut(root) {
                        combat.ready();
                    }
                } else if let Ok(mut ai) = enemies.get_mut(root) {
                    ai.ready();
                }
            }
            KeyframeCallback::CheckForHit => {
                if is_player {
                    if players.contains(root) {
                        hit_checks.write(HitCheckRequested { attacker: root });
                    } else {
                        log(&format!(
                            "no player combat component found on '{}'",
                            label(root, name)
                        ));
                    }
                } else if enemies.contains(root) {
                    hit_checks.write(HitCheckRequested { attacker: root });
                } else {
                    log(&format!("no enemy AI component found on '{}'", label(root, name)));
                }
            }
            _ => {}
        }
    }
}

pub fn spawn_keyframe_effects(
    mut keyframes: EventReader<AnimationKeyframe>,
    animators: Query<&UnitAnimator>,
    transforms: Query<&Transform>,
    mut effects: EventWriter<SpawnEffect>,
    mut sounds: EventWriter<PlaySfx>,
) {
    for keyframe in keyframes.read() {
        let Some((root, _)) = keyframe_source(&animators, keyframe) else {
            continue;
        };
        let Ok(transform) = transforms.get(root) else {
            continue;
        };
        let origin = transform.translation;

        let kind = match &keyframe.callback {
            KeyframeCallback::ShowHitEffect => EffectKind::Hit,
            KeyframeCallback::ShowDefendEffect => EffectKind::Defend,
            KeyframeCallback::ShowDustEffectLand => EffectKind::DustLand,
            KeyframeCallback::ShowDustEffectJump => EffectKind::DustJump,
            KeyframeCallback::PlaySfx(name) => {
                sounds.write(PlaySfx::at(name.clone(), origin + Vec3::Y * SFX_HEIGHT));
                continue;
            }
            _ => continue,
        };
        effects.write(SpawnEffect::new(kind, origin));
    }
}

pub fn start_keyframe_motion(
    mut commands: Commands,
    mut keyframes: EventReader<AnimationKeyframe>,
    animators: Query<&UnitAnimator>,
) {
    for keyframe in keyframes.read() {
        let Some((root, direction)) = keyframe_source(&animators, keyframe) else {
            continue;
        };
        let Ok(mut entity_commands) = commands.get_entity(root) else {
            continue;
        };

        match keyframe.callback {
            KeyframeCallback::AddForce(force) => {
                entity_commands.insert(ForwardForce::new(force, direction));
            }
            KeyframeCallback::Flicker(delay) => {
                entity_commands.insert(DeathFlicker::new(delay));
            }
            _ => {}
        }
    }
}

pub fn shake_camera_on_keyframe(
    mut keyframes: EventReader<AnimationKeyframe>,
    mut shakers: Query<&mut CameraShaker>,
) {
    for keyframe in keyframes.read() {
        if let KeyframeCallback::CamShake(intensity) = keyframe.callback {
            // No shaker in the world: nothing to do
            for mut shaker in shakers.iter_mut() {
                shaker.shake(intensity);
            }
        }
    }
}

pub fn spawn_keyframe_projectiles(
    mut commands: Commands,
    mut keyframes: EventReader<AnimationKeyframe>,
    animators: Query<&UnitAnimator>,
    players: Query<&PlayerCombat>,
    children: Query<&Children>,
    spawn_points: Query<(), With<ProjectileSpawnPoint>>,
    globals: Query<&GlobalTransform>,
    registry: Res<ProjectileRegistry>,
) {
    for keyframe in keyframes.read() {
        let KeyframeCallback::SpawnProjectile(name) = &keyframe.callback else {
            continue;
        };
        let Some((root, _)) = keyframe_source(&animators, keyframe) else {
            continue;
        };
        let Ok(combat) = players.get(root) else {
            continue;
        };
        let Some(bone) = combat.weapon_bone else {
            log_warning(&format!("SpawnProjectile '{}': unit {:?} has no weapon bone", name, root));
            continue;
        };

        let origin = children
            .iter_descendants(bone)
            .find(|e| spawn_points.contains(*e))
            .unwrap_or(bone);
        let Ok(spawn_transform) = globals.get(origin) else {
            continue;
        };

        let Some(def) = registry.get(name) else {
            log_warning(&format!("Unknown projectile '{}'", name));
            continue;
        };

        let damage = combat.current_weapon().map(|w| w.damage_object.clone());
        spawn_projectile(
            &mut commands,
            name,
            def,
            spawn_transform.translation(),
            combat.current_direction,
            damage,
            root,
            true,
        );
    }
}
