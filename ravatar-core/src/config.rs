//! Render Configuration
//!
//! Canvas size and the fixed non-palette colors. The gradient palette and the
//! geometry ratios are part of an avatar's identity and are not configurable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::palette::{Color, CANVAS_HIGH, CANVAS_LOW, NODE_FILL};

pub const DEFAULT_SIZE: u32 = 512;
pub const MAX_SIZE: u32 = 4096;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Canvas size {0} out of range (1..={max})", max = MAX_SIZE)]
    InvalidSize(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_node_fill")]
    pub node_fill: Color,
    #[serde(default = "default_canvas_low")]
    pub canvas_low: Color,
    #[serde(default = "default_canvas_high")]
    pub canvas_high: Color,
}

fn default_size() -> u32 { DEFAULT_SIZE }
fn default_node_fill() -> Color { NODE_FILL }
fn default_canvas_low() -> Color { CANVAS_LOW }
fn default_canvas_high() -> Color { CANVAS_HIGH }

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            node_fill: default_node_fill(),
            canvas_low: default_canvas_low(),
            canvas_high: default_canvas_high(),
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        log::debug!("loaded render config from {}", path.display());
        Ok(config)
    }

    pub fn with_size(self, size: u32) -> Self {
        Self { size, ..self }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 || self.size > MAX_SIZE {
            return Err(ConfigError::InvalidSize(self.size));
        }
        Ok(())
    }
}
