//! Sound effect requests
//!
//! The simulation cannot play audio. It validates `PlaySfx` requests against
//! the configured clip library and queues them for the client, which owns the
//! actual audio backend.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::logger::log_warning;

/// Play a named clip. `position: None` plays it as a flat 2D sound.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlaySfx {
    pub name: String,
    pub position: Option<Vec3>,
}

impl PlaySfx {
    pub fn at(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position: Some(position),
        }
    }

    pub fn flat(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioClip {
    /// Asset path relative to the client's asset folder
    pub path: String,
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_volume() -> f32 {
    1.0
}

/// Known clips by name
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioLibrary {
    pub clips: HashMap<String, AudioClip>,
}

impl Default for AudioLibrary {
    fn default() -> Self {
        let clips = ["FootStep", "Punch", "Kick", "Defend", "JumpUp", "JumpLand"]
            .into_iter()
            .map(|name| {
                let clip = AudioClip {
                    path: format!("audio/{}.ogg", name.to_lowercase()),
                    volume: default_volume(),
                };
                (name.to_string(), clip)
            })
            .collect();

        Self { clips }
    }
}

impl AudioLibrary {
    pub fn get(&self, name: &str) -> Option<&AudioClip> {
        self.clips.get(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueuedSound {
    pub name: String,
    pub clip: AudioClip,
    pub position: Option<Vec3>,
}

/// Accepted requests waiting for the client
#[derive(Resource, Debug, Default)]
pub struct AudioQueue {
    pending: Vec<QueuedSound>,
}

impl AudioQueue {
    pub fn push(&mut self, sound: QueuedSound) {
        self.pending.push(sound);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> Vec<QueuedSound> {
        std::mem::take(&mut self.pending)
    }
}

pub fn queue_sound_effects(
    mut requests: EventReader<PlaySfx>,
    library: Res<AudioLibrary>,
    mut queue: ResMut<AudioQueue>,
) {
    for request in requests.read() {
        match library.get(&request.name) {
            Some(clip) => queue.push(QueuedSound {
                name: request.name.clone(),
                clip: clip.clone(),
                position: request.position,
            }),
            None => log_warning(&format!("Unknown sound effect '{}'", request.name)),
        }
    }
}

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlaySfx>()
            .init_resource::<AudioLibrary>()
            .init_resource::<AudioQueue>()
            .add_systems(Update, queue_sound_effects);
    }
}
