//! Keyframe callbacks
//!
//! Animation clips carry named events at authored frames ("Check4Hit",
//! "PlaySFX" with a clip name, ...). The client forwards them as
//! `AnimationKeyframe` events; `KeyframeCallback::parse` turns the authored
//! name + parameter into a typed callback.

use bevy::prelude::*;
use std::fmt;

/// Raw parameter attached to an authored keyframe
#[derive(Debug, Clone, PartialEq)]
pub enum KeyframeParam {
    None,
    Float(f32),
    Text(String),
}

impl From<f32> for KeyframeParam {
    fn from(value: f32) -> Self {
        KeyframeParam::Float(value)
    }
}

impl From<&str> for KeyframeParam {
    fn from(value: &str) -> Self {
        KeyframeParam::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyframeCallback {
    Ready,
    CheckForHit,
    ShowHitEffect,
    ShowDefendEffect,
    ShowDustEffectLand,
    ShowDustEffectJump,
    PlaySfx(String),
    AddForce(f32),
    CamShake(f32),
    SpawnProjectile(String),
    /// Death flicker, parameter is the delay before it starts
    Flicker(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyframeError {
    UnknownCallback(String),
    MissingParameter {
        callback: &'static str,
        expected: &'static str,
    },
    InvalidParameter {
        callback: &'static str,
        expected: &'static str,
        found: KeyframeParam,
    },
}

impl fmt::Display for KeyframeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyframeError::UnknownCallback(name) => {
                write!(f, "unknown keyframe callback '{}'", name)
            }
            KeyframeError::MissingParameter { callback, expected } => {
                write!(f, "keyframe '{}' needs a {} parameter", callback, expected)
            }
            KeyframeError::InvalidParameter {
                callback,
                expected,
                found,
            } => write!(
                f,
                "keyframe '{}' expects a {} parameter, got {:?}",
                callback, expected, found
            ),
        }
    }
}

impl std::error::Error for KeyframeError {}

impl KeyframeCallback {
    pub fn parse(name: &str, param: impl Into<KeyframeParam>) -> Result<Self, KeyframeError> {
        let param = param.into();
        let callback = match name {
            "Ready" => KeyframeCallback::Ready,
            "Check4Hit" | "CheckForHit" => KeyframeCallback::CheckForHit,
            "ShowHitEffect" => KeyframeCallback::ShowHitEffect,
            "ShowDefendEffect" => KeyframeCallback::ShowDefendEffect,
            "ShowDustEffectLand" => KeyframeCallback::ShowDustEffectLand,
            "ShowDustEffectJump" => KeyframeCallback::ShowDustEffectJump,
            "PlaySFX" => KeyframeCallback::PlaySfx(text_param("PlaySFX", param)?),
            "AddForce" => KeyframeCallback::AddForce(float_param("AddForce", param)?),
            "CamShake" => KeyframeCallback::CamShake(float_param("CamShake", param)?),
            "SpawnProjectile" => {
                KeyframeCallback::SpawnProjectile(text_param("SpawnProjectile", param)?)
            }
            "Flicker" => KeyframeCallback::Flicker(float_param("Flicker", param)?),
            other => return Err(KeyframeError::UnknownCallback(other.to_string())),
        };
        Ok(callback)
    }
}

fn float_param(callback: &'static str, param: KeyframeParam) -> Result<f32, KeyframeError> {
    match param {
        KeyframeParam::Float(value) => Ok(value),
        KeyframeParam::Text(ref text) => {
            text.trim()
                .parse::<f32>()
                .map_err(|_| KeyframeError::InvalidParameter {
                    callback,
                    expected: "float",
                    found: param.clone(),
                })
        }
        KeyframeParam::None => Err(KeyframeError::MissingParameter {
            callback,
            expected: "float",
        }),
    }
}

fn text_param(callback: &'static str, param: KeyframeParam) -> Result<String, KeyframeError> {
    match param {
        KeyframeParam::Text(text) if !text.is_empty() => Ok(text),
        KeyframeParam::None | KeyframeParam::Text(_) => Err(KeyframeError::MissingParameter {
            callback,
            expected: "string",
        }),
        found @ KeyframeParam::Float(_) => Err(KeyframeError::InvalidParameter {
            callback,
            expected: "string",
            found,
        }),
    }
}

/// A keyframe reached by the animator entity `animator`
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AnimationKeyframe {
    pub animator: Entity,
    pub callback: KeyframeCallback,
}

impl AnimationKeyframe {
    pub fn new(animator: Entity, callback: KeyframeCallback) -> Self {
        Self { animator, callback }
    }
}
