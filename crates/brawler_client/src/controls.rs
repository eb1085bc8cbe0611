//! Keyboard -> input bus
//!
//! WASD / arrows move, Space jumps. There is no animation player yet, so the
//! number keys report keyframe callbacks on the player's animator directly:
//!
//! | key | callback                   |
//! |-----|----------------------------|
//! | 1   | Check4Hit + Punch sound    |
//! | 2   | AddForce(2)                |
//! | 3   | SpawnProjectile("Knife")   |
//! | 4   | CamShake(0.5)              |
//! | 5   | ShowHitEffect              |
//! | 6   | ShowDefendEffect           |

use bevy::prelude::*;
use brawler_simulation::{
    AnimationKeyframe, CombatInput, DirectionInput, InputAction, KeyframeCallback, Player,
    UnitAnimator,
};

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (publish_direction, publish_actions, debug_keyframes));
    }
}

fn axis(keys: &ButtonInput<KeyCode>, negative: [KeyCode; 2], positive: [KeyCode; 2]) -> f32 {
    let mut value = 0.0;
    if keys.any_pressed(negative) {
        value -= 1.0;
    }
    if keys.any_pressed(positive) {
        value += 1.0;
    }
    value
}

/// Sends a direction sample whenever the held keys change
fn publish_direction(
    keys: Res<ButtonInput<KeyCode>>,
    mut last: Local<Vec2>,
    mut directions: EventWriter<DirectionInput>,
) {
    let sample = Vec2::new(
        axis(&keys, [KeyCode::KeyA, KeyCode::ArrowLeft], [KeyCode::KeyD, KeyCode::ArrowRight]),
        axis(&keys, [KeyCode::KeyS, KeyCode::ArrowDown], [KeyCode::KeyW, KeyCode::ArrowUp]),
    );
    if sample != *last {
        *last = sample;
        directions.write(DirectionInput::new(sample.x, sample.y));
    }
}

fn publish_actions(keys: Res<ButtonInput<KeyCode>>, mut actions: EventWriter<CombatInput>) {
    if keys.just_pressed(KeyCode::Space) {
        actions.write(CombatInput::new(InputAction::Jump));
    }
}

fn debug_keyframes(
    keys: Res<ButtonInput<KeyCode>>,
    players: Query<(), With<Player>>,
    animators: Query<(Entity, &UnitAnimator)>,
    mut keyframes: EventWriter<AnimationKeyframe>,
) {
    let callbacks: Vec<KeyframeCallback> = [
        (KeyCode::Digit1, KeyframeCallback::CheckForHit),
        (KeyCode::Digit1, KeyframeCallback::PlaySfx("Punch".to_string())),
        (KeyCode::Digit2, KeyframeCallback::AddForce(2.0)),
        (KeyCode::Digit3, KeyframeCallback::SpawnProjectile("Knife".to_string())),
        (KeyCode::Digit4, KeyframeCallback::CamShake(0.5)),
        (KeyCode::Digit5, KeyframeCallback::ShowHitEffect),
        (KeyCode::Digit6, KeyframeCallback::ShowDefendEffect),
    ]
    .into_iter()
    .filter(|(key, _)| keys.just_pressed(*key))
    .map(|(_, callback)| callback)
    .collect();

    if callbacks.is_empty() {
        return;
    }

    let player_animators = animators
        .iter()
        .filter(|(_, animator)| animator.unit.is_some_and(|unit| players.contains(unit)));
    for (entity, _) in player_animators {
        for callback in &callbacks {
            keyframes.write(AnimationKeyframe::new(entity, callback.clone()));
        }
    }
}
