//! Animation parameter store
//!
//! Mirror of an animation-controller parameter table: named triggers, bools and
//! floats. The simulation only writes them; the presentation layer reads the
//! values and drains the triggers.

use bevy::prelude::*;
use std::collections::HashMap;

/// Parameter names shared by movement and the animation graph
pub mod names {
    pub const IS_GROUNDED: &str = "isGrounded";
    pub const MOVEMENT_SPEED: &str = "MovementSpeed";
    pub const FALLING: &str = "Falling";
    pub const JUMP_IN_PROGRESS: &str = "JumpInProgress";
    pub const JUMP_KICK_ACTIVE: &str = "JumpKickActive";
    pub const JUMP_UP: &str = "JumpUp";
}

/// A single parameter write, collected by code that cannot borrow the
/// animator entity directly
#[derive(Debug, Clone, PartialEq)]
pub enum AnimatorCommand {
    Trigger(String),
    Bool(String, bool),
    Float(String, f32),
}

impl AnimatorCommand {
    pub fn trigger(name: &str) -> Self {
        Self::Trigger(name.to_string())
    }

    pub fn set_bool(name: &str, value: bool) -> Self {
        Self::Bool(name.to_string(), value)
    }

    pub fn set_float(name: &str, value: f32) -> Self {
        Self::Float(name.to_string(), value)
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct AnimatorParams {
    /// Pending triggers in the order they were set, without duplicates
    triggers: Vec<String>,
    bools: HashMap<String, bool>,
    floats: HashMap<String, f32>,
}

impl AnimatorParams {
    pub fn set_trigger(&mut self, name: &str) {
        if !self.triggers.iter().any(|t| t == name) {
            self.triggers.push(name.to_string());
        }
    }

    pub fn reset_trigger(&mut self, name: &str) {
        self.triggers.retain(|t| t != name);
    }

    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    /// Unset bools read as false
    pub fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    /// Unset floats read as 0
    pub fn get_float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

    pub fn has_trigger(&self, name: &str) -> bool {
        self.triggers.iter().any(|t| t == name)
    }

    /// Consumes every pending trigger
    pub fn take_triggers(&mut self) -> Vec<String> {
        std::mem::take(&mut self.triggers)
    }

    pub fn apply(&mut self, command: &AnimatorCommand) {
        match command {
            AnimatorCommand::Trigger(name) => self.set_trigger(name),
            AnimatorCommand::Bool(name, value) => self.set_bool(name, *value),
            AnimatorCommand::Float(name, value) => self.set_float(name, *value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_read_as_zero() {
        let params = AnimatorParams::default();
        assert!(!params.get_bool(names::FALLING));
        assert_eq!(params.get_float(names::MOVEMENT_SPEED), 0.0);
        assert!(!params.has_trigger(names::JUMP_UP));
    }

    #[test]
    fn test_triggers_do_not_stack() {
        let mut params = AnimatorParams::default();
        params.set_trigger("Punch1");
        params.set_trigger("Punch1");
        params.set_trigger(names::JUMP_UP);

        assert_eq!(params.take_triggers(), vec!["Punch1".to_string(), "JumpUp".to_string()]);
        assert!(params.take_triggers().is_empty());
    }

    #[test]
    fn test_reset_trigger() {
        let mut params = AnimatorParams::default();
        params.set_trigger(names::JUMP_UP);
        params.reset_trigger(names::JUMP_UP);
        assert!(!params.has_trigger(names::JUMP_UP));
    }

    #[test]
    fn test_apply_commands() {
        let mut params = AnimatorParams::default();
        for command in [
            AnimatorCommand::set_bool(names::IS_GROUNDED, true),
            AnimatorCommand::set_float(names::MOVEMENT_SPEED, 3.5),
            AnimatorCommand::trigger(names::JUMP_UP),
        ] {
            params.apply(&command);
        }

        assert!(params.get_bool(names::IS_GROUNDED));
        assert_eq!(params.get_float(names::MOVEMENT_SPEED), 3.5);
        assert!(params.has_trigger(names::JUMP_UP));
    }
}
