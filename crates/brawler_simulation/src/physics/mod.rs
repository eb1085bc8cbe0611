//! Physics glue
//!
//! Rapier owns rigid-body dynamics (gravity, contacts). This module holds what
//! the simulation adds on top:
//! - collision layers shared with rapier groups
//! - static level boxes
//! - contact probes used by the movement controller

pub mod collision;
pub mod probe;

pub use collision::{
    layer_bit, layers, rapier_groups, spawn_level_box, LevelCollider, DEFAULT_COLLISION_MASK,
};
pub use probe::{probe_ground, probe_wall, wall_probe_center, ProbeBox};
