//! Animation bridge
//!
//! The simulation does not play clips. It owns the animator parameter table
//! that movement writes into, and it reacts to keyframe callbacks reported by
//! whoever does play them (the client, or tests).
//!
//! Schedules:
//! - Update: keyframe dispatch, death flicker
//! - FixedUpdate: forward force (writes rigid-body velocity)

use bevy::prelude::*;

pub mod animator;
pub mod dispatch;
pub mod flicker;
pub mod force;
pub mod keyframe;
pub mod params;

pub use animator::UnitAnimator;
pub use flicker::{DeathFlicker, FlickerStep};
pub use force::ForwardForce;
pub use keyframe::{AnimationKeyframe, KeyframeCallback, KeyframeError, KeyframeParam};
pub use params::{names, AnimatorCommand, AnimatorParams};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyframeDispatchSet;

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationKeyframe>()
            .register_type::<UnitAnimator>();

        app.add_systems(
            Update,
            (
                (
                    dispatch::route_combat_keyframes,
                    dispatch::spawn_keyframe_effects,
                    dispatch::start_keyframe_motion,
                    dispatch::shake_camera_on_keyframe,
                    dispatch::spawn_keyframe_projectiles,
                )
                    .in_set(KeyframeDispatchSet),
                flicker::tick_death_flicker.after(KeyframeDispatchSet),
            ),
        );

        app.add_systems(FixedUpdate, force::apply_forward_force);
    }
}
