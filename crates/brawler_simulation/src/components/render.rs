//! Simulation-side renderer flag
//!
//! The simulation has no renderer. Entities that stand for a visible mesh carry
//! `RendererToggle`, and the client mirrors it onto `Visibility`.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct RendererToggle {
    pub enabled: bool,
}

impl Default for RendererToggle {
    fn default() -> Self {
        Self { enabled: true }
    }
}
