//! Game configuration (RON)
//!
//! One file holds every tunable the simulation reads: movement defaults,
//! effect prefabs, audio clips, projectile definitions, combat timings, the
//! fixed-step rate, the RNG seed and the log level. Missing fields fall back to
//! their defaults, so a partial file is valid.

use bevy::prelude::*;
use ron::Options;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::audio::AudioLibrary;
use crate::combat::{CombatSettings, ProjectileRegistry};
use crate::effects::EffectSettings;
use crate::logger::{log_info, log_warning, set_log_level, LogLevel};
use crate::movement::MovementSettings;
use crate::DeterministicRng;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrawlerConfig {
    pub fixed_hz: f64,
    pub seed: u64,
    pub log_level: LogLevel,
    pub movement: MovementSettings,
    pub effects: EffectSettings,
    pub audio: AudioLibrary,
    pub combat: CombatSettings,
    pub projectiles: ProjectileRegistry,
}

impl Default for BrawlerConfig {
    fn default() -> Self {
        Self {
            fixed_hz: 60.0,
            seed: 42,
            log_level: LogLevel::Info,
            movement: MovementSettings::default(),
            effects: EffectSettings::default(),
            audio: AudioLibrary::default(),
            combat: CombatSettings::default(),
            projectiles: ProjectileRegistry::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    Invalid {
        path: PathBuf,
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            ConfigError::Invalid { path, message } => {
                write!(f, "invalid config {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid { .. } => None,
        }
    }
}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

impl BrawlerConfig {
    /// Parses RON text. `origin` is only used in error messages.
    pub fn from_ron_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: BrawlerConfig =
            ron_options()
                .from_str(text)
                .map_err(|source| ConfigError::Parse {
                    path: origin.to_path_buf(),
                    source,
                })?;
        config.validate(origin)?;
        Ok(config)
    }

    fn validate(&self, origin: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::Invalid {
            path: origin.to_path_buf(),
            message,
        };

        if !(self.fixed_hz > 0.0) {
            return Err(invalid(format!("fixed_hz must be positive, got {}", self.fixed_hz)));
        }
        if self.movement.air_max_speed < 0.0 {
            return Err(invalid("movement.air_max_speed must not be negative".to_string()));
        }
        if let Some((name, _)) = self
            .projectiles
            .definitions
            .iter()
            .find(|(_, def)| def.lifetime <= 0.0)
        {
            return Err(invalid(format!("projectile '{}' needs a positive lifetime", name)));
        }
        Ok(())
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<BrawlerConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    BrawlerConfig::from_ron_str(&text, path)
}

/// Installs a config into the app, replacing whatever defaults the other
/// plugins registered. Add it after `SimulationPlugin`.
pub struct ConfigPlugin {
    pub path: Option<PathBuf>,
}

impl ConfigPlugin {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Loads the file, or falls back to defaults with a warning
    pub fn resolve(&self) -> BrawlerConfig {
        let Some(path) = &self.path else {
            return BrawlerConfig::default();
        };
        match load_config(path) {
            Ok(config) => {
                log_info(&format!("Loaded config from {}", path.display()));
                config
            }
            Err(err) => {
                log_warning(&format!("{}; using default config", err));
                BrawlerConfig::default()
            }
        }
    }
}

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let config = self.resolve();
        apply_config(app, config);
    }
}

pub fn apply_config(app: &mut App, config: BrawlerConfig) {
    set_log_level(config.log_level);
    app.insert_resource(Time::<Fixed>::from_hz(config.fixed_hz))
        .insert_resource(DeterministicRng::new(config.seed))
        .insert_resource(config.movement)
        .insert_resource(config.effects)
        .insert_resource(config.audio)
        .insert_resource(config.combat)
        .insert_resource(config.projectiles);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIPPED: &str = include_str!("../../../../assets/config/brawler.ron");

    #[test]
    fn test_shipped_config_parses() {
        let config = BrawlerConfig::from_ron_str(SHIPPED, Path::new("brawler.ron")).unwrap();
        assert_eq!(config.fixed_hz, 60.0);
        assert_eq!(config.movement.walk_speed, 3.0);
        assert_eq!(config.movement.footstep_sfx, "FootStep");
        assert!(config.projectiles.get("Knife").is_some());
        assert!(config.audio.get("FootStep").is_some());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let text = "(seed: 7, movement: (walk_speed: 5.0))";
        let config = BrawlerConfig::from_ron_str(text, Path::new("partial.ron")).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.movement.walk_speed, 5.0);
        assert_eq!(config.movement.jump_force, 8.0);
        assert_eq!(config.effects, EffectSettings::default());
    }

    #[test]
    fn test_voices_use_implicit_some() {
        let text = r#"(movement: (jump_up_voice: "Hup"))"#;
        let config = BrawlerConfig::from_ron_str(text, Path::new("voices.ron")).unwrap();
        assert_eq!(config.movement.jump_up_voice.as_deref(), Some("Hup"));
        assert_eq!(config.movement.jump_land_voice, None);
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = BrawlerConfig::from_ron_str("(seed: ", Path::new("broken.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.ron"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = BrawlerConfig::from_ron_str("(fixed_hz: 0.0)", Path::new("zero.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_plugin_falls_back_to_defaults() {
        let plugin = ConfigPlugin::from_path("/definitely/not/here.ron");
        assert_eq!(plugin.resolve(), BrawlerConfig::default());
    }
}
