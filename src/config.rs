//! Garden configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GardenError;

fn default_width() -> u32 {
    80
}

fn default_height() -> u32 {
    40
}

fn default_nomad_spawn_chance() -> f64 {
    0.02
}

fn default_pollination_interval() -> u64 {
    10
}

fn default_pollination_chance() -> f64 {
    0.1
}

fn default_max_flowers() -> usize {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GardenConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub dynamics: DynamicsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicsConfig {
    /// Probability per tick of a nomad appearing on the canvas edge.
    #[serde(default = "default_nomad_spawn_chance")]
    pub nomad_spawn_chance: f64,
    /// Cross-pollination is only attempted on ticks divisible by this.
    #[serde(default = "default_pollination_interval")]
    pub pollination_interval: u64,
    #[serde(default = "default_pollination_chance")]
    pub pollination_chance: f64,
    #[serde(default = "default_max_flowers")]
    pub max_flowers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            nomad_spawn_chance: default_nomad_spawn_chance(),
            pollination_interval: default_pollination_interval(),
            pollination_chance: default_pollination_chance(),
            max_flowers: default_max_flowers(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl GardenConfig {
    pub fn with_canvas(width: u32, height: u32) -> Self {
        Self {
            canvas: CanvasConfig { width, height },
            ..Self::default()
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, GardenError> {
        let config: GardenConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GardenError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Save configuration to YAML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GardenError> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), GardenError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(GardenError::InvalidConfig(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }

        let probabilities = [
            ("nomad_spawn_chance", self.dynamics.nomad_spawn_chance),
            ("pollination_chance", self.dynamics.pollination_chance),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(GardenError::InvalidConfig(format!(
                    "{name} must lie in [0, 1], got {value}"
                )));
            }
        }

        if self.dynamics.pollination_interval == 0 {
            return Err(GardenError::InvalidConfig(
                "pollination_interval must be greater than zero".into(),
            ));
        }

        if self.dynamics.max_flowers == 0 {
            return Err(GardenError::InvalidConfig(
                "max_flowers must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}
