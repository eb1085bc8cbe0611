//! Movement module
//!
//! Walk/jump/land controller for units driven by the input bus. Rapier
//! integrates the velocity written here; the controller never moves the
//! transform itself except for turning.

use bevy::prelude::*;
use bevy_rapier3d::prelude::PhysicsSet;

pub mod controller;
pub mod systems;

pub use controller::{
    MovementController, MovementSettings, SoundCue, StepInput, StepOutcome, StepOutput,
    MOVEMENT_STATES,
};


#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementSet {
    Link,
    Probe,
    Input,
    Step,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementSettings>();

        app.configure_sets(
            FixedUpdate,
            (
                MovementSet::Link,
                MovementSet::Probe,
                MovementSet::Input,
                MovementSet::Step,
            )
                .chain()
                .before(PhysicsSet::SyncBackend),
        );

        app.add_systems(
            FixedUpdate,
            (
                (systems::link_unit_animators, systems::snap_to_direction).in_set(MovementSet::Link),
                systems::probe_contacts.in_set(MovementSet::Probe),
                (systems::apply_direction_input, systems::apply_combat_input)
                    .in_set(MovementSet::Input),
                (systems::movement_fixed_step, systems::stop_dead_units)
                    .chain()
                    .in_set(MovementSet::Step),
            ),
        );
    }
}
