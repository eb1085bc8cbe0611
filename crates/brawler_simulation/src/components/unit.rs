//! Unit identity: facing direction, locomotion/combat state, ownership markers

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Facing direction of a unit
///
/// The signed value is used directly as a multiplier:
/// - velocity: `Vec3::X * sign` (Right moves toward -X)
/// - facing: the model front turns toward `Vec3::Z * -sign`
///
/// Up/Down exist for completeness; rotation ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Direction::Right => -1,
            Direction::Left => 1,
            Direction::Up => 2,
            Direction::Down => -2,
        }
    }

    pub fn from_sign(sign: i32) -> Option<Self> {
        match sign {
            -1 => Some(Direction::Right),
            1 => Some(Direction::Left),
            2 => Some(Direction::Up),
            -2 => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Right | Direction::Left)
    }

    /// Facing implied by a horizontal input sample.
    ///
    /// Zero input keeps the current facing (returns None), so moving straight
    /// up/down the depth axis never flips the character.
    pub fn from_horizontal_input(x: f32) -> Option<Self> {
        if x.abs() > 0.0 {
            Self::from_sign((-x).signum().round() as i32)
        } else {
            None
        }
    }
}

/// Every state a unit can be in.
///
/// Movement only drives a subset of these (see `movement::MOVEMENT_STATES`);
/// the rest are owned by combat and AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum UnitStateKind {
    #[default]
    Idle,
    Walk,
    Jumping,
    Land,
    JumpKick,
    Punch,
    Kick,
    Attack,
    Defend,
    Hit,
    Death,
    Throw,
    PickUpItem,
    Knockdown,
    KnockdownGrounded,
    GroundPunch,
    GroundKick,
    UseWeapon,
}

/// Shared state holder, read and written by movement, combat and AI
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct UnitState {
    current: UnitStateKind,
    previous: UnitStateKind,
}

impl UnitState {
    pub fn new(initial: UnitStateKind) -> Self {
        Self {
            current: initial,
            previous: initial,
        }
    }

    pub fn current(&self) -> UnitStateKind {
        self.current
    }

    pub fn previous(&self) -> UnitStateKind {
        self.previous
    }

    pub fn set_state(&mut self, state: UnitStateKind) {
        if self.current != state {
            self.previous = self.current;
            self.current = state;
        }
    }

    pub fn is(&self, state: UnitStateKind) -> bool {
        self.current == state
    }
}

/// Marker: unit driven by the player input bus
///
/// Keyframe callbacks on units with this marker are routed to `PlayerCombat`,
/// everything else goes to `EnemyAi`.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_sign_roundtrip() {
        for dir in [
            Direction::Right,
            Direction::Left,
            Direction::Up,
            Direction::Down,
        ] {
            assert_eq!(Direction::from_sign(dir.sign()), Some(dir));
        }
        assert_eq!(Direction::from_sign(0), None);
    }

    #[test]
    fn test_direction_from_input() {
        assert_eq!(Direction::from_horizontal_input(1.0), Some(Direction::Right));
        assert_eq!(Direction::from_horizontal_input(0.3), Some(Direction::Right));
        assert_eq!(Direction::from_horizontal_input(-0.7), Some(Direction::Left));
        assert_eq!(Direction::from_horizontal_input(0.0), None);
    }

    #[test]
    fn test_unit_state_tracks_previous() {
        let mut state = UnitState::default();
        assert!(state.is(UnitStateKind::Idle));

        state.set_state(UnitStateKind::Walk);
        state.set_state(UnitStateKind::Jumping);
        assert_eq!(state.current(), UnitStateKind::Jumping);
        assert_eq!(state.previous(), UnitStateKind::Walk);

        // Re-setting the same state keeps history intact
        state.set_state(UnitStateKind::Jumping);
        assert_eq!(state.previous(), UnitStateKind::Walk);
    }
}
