//! Movement controller state machine
//!
//! Everything here is plain data + methods. The ECS systems in `systems.rs`
//! gather probe results and time, call `step`, then apply the collected
//! animator writes, effects and sounds.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;
use serde::{Deserialize, Serialize};

use crate::animation::params::{names, AnimatorCommand};
use crate::components::{BodyCapsule, Direction, UnitState, UnitStateKind};
use crate::effects::EffectKind;
use crate::math::{rotate_towards_planar, yaw_rotation};
use crate::physics::DEFAULT_COLLISION_MASK;

/// States the movement controller is allowed to drive
pub const MOVEMENT_STATES: [UnitStateKind; 5] = [
    UnitStateKind::Idle,
    UnitStateKind::Walk,
    UnitStateKind::Jumping,
    UnitStateKind::JumpKick,
    UnitStateKind::Land,
];

/// Tuning values, loaded from config
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub walk_speed: f32,
    /// Speed along the depth axis
    pub z_speed: f32,
    pub jump_force: f32,
    pub allow_depth_jumping: bool,
    pub air_acceleration: f32,
    pub air_max_speed: f32,
    /// Radians per second
    pub rotation_speed: f32,
    pub jump_rotation_speed: f32,
    pub look_ahead_distance: f32,
    pub land_recovery_time: f32,
    pub jump_downwards_force: f32,
    /// Applied by the controller while grounded only, rapier handles the air
    pub gravity: f32,
    /// Layers the contact probes test against
    pub collision_mask: u32,
    pub jump_up_voice: Option<String>,
    pub jump_land_voice: Option<String>,
    pub footstep_sfx: String,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            z_speed: 1.5,
            jump_force: 8.0,
            allow_depth_jumping: false,
            air_acceleration: 3.0,
            air_max_speed: 3.0,
            rotation_speed: 15.0,
            jump_rotation_speed: 30.0,
            look_ahead_distance: 0.2,
            land_recovery_time: 0.1,
            jump_downwards_force: 0.3,
            gravity: -9.81,
            collision_mask: DEFAULT_COLLISION_MASK,
            jump_up_voice: None,
            jump_land_voice: None,
            footstep_sfx: "FootStep".to_string(),
        }
    }
}

/// Physics-driven locomotion of a unit (walk, jump, land, turn)
#[derive(Component, Debug, Clone)]
#[require(UnitState, Velocity, BodyCapsule, Transform)]
pub struct MovementController {
    pub settings: MovementSettings,
    pub current_direction: Direction,
    /// Latest sample from the input bus
    pub input_direction: Vec2,
    pub jump_in_progress: bool,
    pub jump_next_fixed_update: bool,
    pub is_dead: bool,
    /// Fixed-clock time of the last landing
    pub land_time: f32,
    /// Entity holding `UnitAnimator`, resolved when the unit is first seen
    pub animator: Option<Entity>,
    /// Last ground probe result
    pub grounded: bool,
    /// Last wall probe result
    pub wall_ahead: bool,
}

impl Default for MovementController {
    fn default() -> Self {
        Self::new(MovementSettings::default())
    }
}

/// Per-step inputs gathered by the fixed-step system
#[derive(Debug, Clone, Copy)]
pub struct StepInput {
    pub dt: f32,
    /// Elapsed fixed time in seconds
    pub now: f32,
    pub grounded: bool,
    pub wall_ahead: bool,
}

/// Sound requested by the controller
#[derive(Debug, Clone, PartialEq)]
pub struct SoundCue {
    pub name: String,
    /// Played at the unit position when true, as a flat 2D sound otherwise
    pub positional: bool,
}

/// Side effects of one step, applied by the caller
#[derive(Debug, Default)]
pub struct StepOutput {
    pub animator: Vec<AnimatorCommand>,
    pub effects: Vec<EffectKind>,
    pub sounds: Vec<SoundCue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Dead or in a state owned by someone else
    Skipped,
    Jumped,
    Landed,
    /// Regular grounded/airborne motion, the unit should turn afterwards
    Moved,
}

impl MovementController {
    pub fn new(settings: MovementSettings) -> Self {
        Self {
            settings,
            current_direction: Direction::Right,
            input_direction: Vec2::ZERO,
            jump_in_progress: false,
            jump_next_fixed_update: false,
            is_dead: false,
            land_time: 0.0,
            animator: None,
            grounded: false,
            wall_ahead: false,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.current_direction = direction;
        self
    }

    pub fn is_managed(state: UnitStateKind) -> bool {
        MOVEMENT_STATES.contains(&state)
    }

    fn accepts_input(&self, state: &UnitState) -> bool {
        !self.is_dead && Self::is_managed(state.current())
    }

    /// Stores the sample and returns the facing it implies, if any.
    ///
    /// Facing follows the new sample, not the previously stored one, so the
    /// unit turns on the same input that starts the walk.
    pub fn on_direction_input(&mut self, state: &UnitState, vector: Vec2) -> Option<Direction> {
        if !self.accepts_input(state) {
            return None;
        }

        let facing = Direction::from_horizontal_input(vector.x);
        if let Some(direction) = facing {
            self.set_direction(direction);
        }
        self.input_direction = vector;
        facing
    }

    /// Queues a jump. Returns false when the request is ignored.
    pub fn request_jump(&mut self, state: &UnitState) -> bool {
        if !self.accepts_input(state) {
            return false;
        }
        if !self.grounded || state.is(UnitStateKind::Jumping) {
            return false;
        }
        self.jump_next_fixed_update = true;
        true
    }

    /// Interrupts a jump in the air. A jump queued for the next step still runs.
    pub fn cancel_jump(&mut self) {
        self.jump_in_progress = false;
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.current_direction = direction;
    }

    pub fn current_direction(&self) -> Direction {
        self.current_direction
    }

    pub fn death(&mut self, velocity: &mut Vec3) {
        self.is_dead = true;
        self.cancel_jump();
        self.jump_next_fixed_update = false;
        *velocity = Vec3::ZERO;
    }

    /// One fixed step of the state machine
    pub fn step(
        &mut self,
        state: &mut UnitState,
        velocity: &mut Vec3,
        input: &StepInput,
        out: &mut StepOutput,
    ) -> StepOutcome {
        if self.is_dead || !Self::is_managed(state.current()) {
            return StepOutcome::Skipped;
        }

        if self.jump_next_fixed_update {
            self.jump(state, velocity, out);
            return StepOutcome::Jumped;
        }

        if self.jump_in_progress && input.grounded {
            self.land(state, velocity, input.now, out);
            return StepOutcome::Landed;
        }

        if state.is(UnitStateKind::Land)
            && input.now - self.land_time > self.settings.land_recovery_time
        {
            state.set_state(UnitStateKind::Idle);
        }

        out.animator
            .push(AnimatorCommand::set_bool(names::IS_GROUNDED, input.grounded));

        if input.grounded {
            self.move_grounded(state, velocity, input, out);
        } else {
            self.move_airborne(state, velocity, input, out);
        }

        StepOutcome::Moved
    }

    pub fn move_grounded(
        &self,
        state: &mut UnitState,
        velocity: &mut Vec3,
        input: &StepInput,
        out: &mut StepOutput,
    ) {
        if state.is(UnitStateKind::Land) {
            return;
        }

        let fall = velocity.y + self.settings.gravity * input.dt;

        if self.input_direction.length_squared() > 0.0 && !input.wall_ahead {
            *velocity = Vec3::new(
                self.input_direction.x * -self.settings.walk_speed,
                fall,
                self.input_direction.y * -self.settings.z_speed,
            );
            out.animator.push(AnimatorCommand::set_float(
                names::MOVEMENT_SPEED,
                velocity.length(),
            ));
            state.set_state(UnitStateKind::Walk);
        } else {
            *velocity = Vec3::new(0.0, fall, 0.0);
            out.animator
                .push(AnimatorCommand::set_float(names::MOVEMENT_SPEED, 0.0));
            state.set_state(UnitStateKind::Idle);
        }
    }

    pub fn move_airborne(
        &self,
        state: &UnitState,
        velocity: &mut Vec3,
        input: &StepInput,
        out: &mut StepOutput,
    ) {
        if velocity.y < 0.1 && !state.is(UnitStateKind::Knockdown) {
            out.animator.push(AnimatorCommand::set_bool(names::FALLING, true));
        }

        if input.wall_ahead {
            return;
        }

        let settings = &self.settings;
        let dir = (-self.input_direction.x).round().clamp(-1.0, 1.0);
        let vx = (velocity.x + settings.air_max_speed * dir * input.dt * settings.air_acceleration)
            .clamp(-settings.air_max_speed, settings.air_max_speed);
        let downward_force = if velocity.y > 0.0 {
            0.0
        } else {
            settings.jump_downwards_force
        };
        let vz = if settings.allow_depth_jumping {
            -self.input_direction.y * settings.z_speed
        } else {
            0.0
        };

        *velocity = Vec3::new(vx, velocity.y - downward_force, vz);
    }

    pub fn jump(&mut self, state: &mut UnitState, velocity: &mut Vec3, out: &mut StepOutput) {
        state.set_state(UnitStateKind::Jumping);
        self.jump_next_fixed_update = false;
        self.jump_in_progress = true;
        *velocity = Vec3::Y * self.settings.jump_force;

        out.animator
            .push(AnimatorCommand::set_bool(names::JUMP_IN_PROGRESS, true));
        out.animator.push(AnimatorCommand::trigger(names::JUMP_UP));
        out.effects.push(EffectKind::DustJump);

        if let Some(voice) = &self.settings.jump_up_voice {
            out.sounds.push(SoundCue {
                name: voice.clone(),
                positional: true,
            });
        }
    }

    pub fn land(
        &mut self,
        state: &mut UnitState,
        velocity: &mut Vec3,
        now: f32,
        out: &mut StepOutput,
    ) {
        self.jump_in_progress = false;
        state.set_state(UnitStateKind::Land);
        *velocity = Vec3::ZERO;
        self.land_time = now;

        out.animator
            .push(AnimatorCommand::set_float(names::MOVEMENT_SPEED, 0.0));
        for flag in [names::JUMP_IN_PROGRESS, names::JUMP_KICK_ACTIVE, names::FALLING] {
            out.animator.push(AnimatorCommand::set_bool(flag, false));
        }
        out.effects.push(EffectKind::DustLand);
        out.sounds.push(SoundCue {
            name: self.settings.footstep_sfx.clone(),
            positional: false,
        });

        if let Some(voice) = &self.settings.jump_land_voice {
            out.sounds.push(SoundCue {
                name: voice.clone(),
                positional: true,
            });
        }
    }

    /// Turn rate in radians per second. Any airborne jump phase (jump kick
    /// included) uses the jump rate.
    pub fn turn_speed(&self) -> f32 {
        if self.jump_in_progress {
            self.settings.jump_rotation_speed
        } else {
            self.settings.rotation_speed
        }
    }

    /// World direction the model front should face. None for Up/Down.
    pub fn facing_target(&self) -> Option<Vec3> {
        let direction = self.current_direction;
        direction
            .is_horizontal()
            .then(|| Vec3::Z * -(direction.sign() as f32))
    }

    /// Rotation after turning toward the current direction for `dt` seconds
    pub fn turn_to_current_direction(&self, rotation: Quat, dt: f32) -> Quat {
        let Some(target) = self.facing_target() else {
            return rotation;
        };
        let forward = rotation * Vec3::Z;
        let next = rotate_towards_planar(forward, target, self.turn_speed() * dt);
        yaw_rotation(next)
    }

    /// Rotation snapped to the current direction, with no turn rate limit
    pub fn snap_to_direction_rotation(&self, rotation: Quat) -> Quat {
        self.facing_target().map(yaw_rotation).unwrap_or(rotation)
    }
}
