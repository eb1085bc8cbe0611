//! Input bus
//!
//! Global publish/subscribe channel between whatever samples the controls
//! (client keyboard, gamepad, scripted tests) and the units that react:
//! - `DirectionInput`: latest 2D movement vector
//! - `CombatInput`: discrete actions (Jump, Punch, ...)
//!
//! Every player-controlled unit receives every event.

use bevy::prelude::*;

/// Movement vector sample. x = screen horizontal, y = depth axis.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DirectionInput {
    pub vector: Vec2,
}

impl DirectionInput {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            vector: Vec2::new(x, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Punch,
    Kick,
    Defend,
    Jump,
    WeaponAttack,
    Grab,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatInput {
    pub action: InputAction,
}

impl CombatInput {
    pub fn new(action: InputAction) -> Self {
        Self { action }
    }
}

pub struct InputBusPlugin;

impl Plugin for InputBusPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DirectionInput>()
            .add_event::<CombatInput>();
    }
}
