//! Configuration system
//!
//! Engine settings load from TOML or RON files through the [`Config`]
//! trait; every section carries sensible defaults so a missing file is
//! never fatal to a host that is happy with them.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// File-backed configuration trait
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load configuration from a `.toml` or `.ron` file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Host window settings
    pub window: WindowConfig,

    /// Frame timing settings
    pub timing: TimingConfig,
}

impl Config for EngineConfig {}

/// Host window settings
///
/// The engine core never opens a window itself; these values are handed to
/// whatever [`crate::HostWindow`] implementation the host wires in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width in pixels
    pub width: u32,

    /// Window height in pixels
    pub height: u32,

    /// VSync setting
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Ember Engine".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

/// Frame timing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Fixed step length in seconds used by the step accumulator
    pub fixed_timestep: f32,

    /// Upper clamp for a single frame delta, so a debugger pause or a long
    /// level load doesn't turn into one giant simulation step
    pub max_delta: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_delta: 0.25,
        }
    }
}
