//! Avatar Pipeline - Single Entry Point
//!
//! seed -> description -> raster -> PNG export. Every stage is deterministic,
//! so an export's hash depends only on the seed and the render config.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, RenderConfig};
use crate::generator::AvatarDescription;
use crate::hashing::{compute_fingerprint, sha256_hex};
use crate::render::{RenderError, Renderer};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A rendered avatar, ready to hand to whoever stores or serves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedAvatar {
    pub seed: String,
    pub filename: String,
    pub format: String,
    pub size: [u32; 2],
    pub description: AvatarDescription,
    /// sha256 of the description's canonical JSON.
    pub fingerprint: String,
    pub data_base64: String,
    /// sha256 of the PNG bytes.
    pub hash: String,
}

pub struct AvatarPipeline {
    renderer: Renderer,
}

impl AvatarPipeline {
    pub fn new(config: RenderConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            renderer: Renderer::new(config),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        self.renderer.config()
    }

    pub fn describe(&self, seed: &str) -> AvatarDescription {
        AvatarDescription::generate(seed)
    }

    pub fn render(&self, description: &AvatarDescription) -> Result<RgbaImage, PipelineError> {
        Ok(self.renderer.render(description)?)
    }

    pub fn encode_png(&self, description: &AvatarDescription) -> Result<Vec<u8>, PipelineError> {
        let image = self.render(description)?;
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes).write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )?;
        Ok(bytes)
    }

    /// Describe, render and encode the avatar for `seed`.
    pub fn export(&self, seed: &str) -> Result<ExportedAvatar, PipelineError> {
        let description = self.describe(seed);
        let fingerprint = compute_fingerprint(&description)?;
        let data = self.encode_png(&description)?;
        let hash = sha256_hex(&data);
        let size = self.config().size;

        log::info!(
            "exported avatar {} ({}x{}, {} bytes)",
            &fingerprint[..12],
            size,
            size,
            data.len()
        );

        Ok(ExportedAvatar {
            seed: seed.to_string(),
            filename: format!("avatar-{}.png", &fingerprint[..12]),
            format: "png".to_string(),
            size: [size, size],
            description,
            fingerprint,
            data_base64: base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &data),
            hash,
        })
    }
}

impl Default for AvatarPipeline {
    fn default() -> Self {
        Self {
            renderer: Renderer::default(),
        }
    }
}
