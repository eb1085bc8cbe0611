//! ECS components for game entities
//!
//! Grouped by domain:
//! - unit: facing, state holder, player marker
//! - actor: health, death marker, body capsule
//! - combat: PlayerCombat / EnemyAi keyframe receivers, damage payloads
//! - render: renderer visibility flag mirrored by the client

pub mod actor;
pub mod combat;
pub mod render;
pub mod unit;

pub use actor::*;
pub use combat::*;
pub use render::*;
pub use unit::*;
