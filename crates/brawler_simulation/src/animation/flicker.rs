//! Death flicker: blink every renderer of a unit faster and faster, then
//! remove the unit

use bevy::prelude::*;

use crate::components::RendererToggle;
use crate::logger::log;
use crate::math::{coserp, lerp};

const FLICKER_SPEED_START: f32 = 15.0;
const FLICKER_SPEED_END: f32 = 35.0;
/// Blinking lasts 1 / rate seconds
const FLICKER_RATE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlickerStep {
    Waiting,
    /// Renderer visibility for this frame
    Blink(bool),
    Finished,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DeathFlicker {
    /// Seconds left before blinking starts
    pub delay: f32,
    pub t: f32,
}

impl DeathFlicker {
    pub fn new(delay: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            t: 0.0,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.delay > 0.0
    }

    /// `elapsed` is the frame clock in seconds, it drives the blink phase
    pub fn advance(&mut self, dt: f32, elapsed: f32) -> FlickerStep {
        if self.delay > 0.0 {
            self.delay -= dt;
            if self.delay > 0.0 {
                return FlickerStep::Waiting;
            }
        }

        if self.t >= 1.0 {
            return FlickerStep::Finished;
        }

        let speed = lerp(FLICKER_SPEED_START, FLICKER_SPEED_END, coserp(0.0, 1.0, self.t));
        let visible = (elapsed * speed).sin() > 0.0;
        self.t += dt * FLICKER_RATE;
        FlickerStep::Blink(visible)
    }
}

pub fn tick_death_flicker(
    mut commands: Commands,
    time: Res<Time>,
    mut flickering: Query<(Entity, &mut DeathFlicker)>,
    children: Query<&Children>,
    mut renderers: Query<&mut RendererToggle>,
) {
    let dt = time.delta_secs();
    let elapsed = time.elapsed_secs();

    for (root, mut flicker) in flickering.iter_mut() {
        let step = flicker.advance(dt, elapsed);
        if step == FlickerStep::Waiting {
            continue;
        }

        let targets: Vec<Entity> = std::iter::once(root)
            .chain(children.iter_descendants(root))
            .filter(|e| renderers.contains(*e))
            .collect();

        match step {
            FlickerStep::Blink(visible) if !targets.is_empty() => {
                for entity in targets {
                    if let Ok(mut renderer) = renderers.get_mut(entity) {
                        renderer.enabled = visible;
                    }
                }
            }
            _ => {
                for entity in targets {
                    if let Ok(mut renderer) = renderers.get_mut(entity) {
                        renderer.enabled = false;
                    }
                }
                log(&format!("Death flicker done, despawning {:?}", root));
                commands.entity(root).despawn();
            }
        }
    }
}
