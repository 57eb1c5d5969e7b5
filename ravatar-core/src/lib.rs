//! Ravatar Core - Deterministic Geometric Avatars
//!
//! seed string -> `AvatarDescription` -> raster image.
//!
//! # Guarantees
//! 1. Same seed, same description, on every platform
//! 2. Every description has at least one colored node
//! 3. Canonical row and palette orders never change
//! 4. Rendering never mutates a surface it rejects

pub mod hashing;
pub mod random;
pub mod rows;
pub mod palette;
pub mod generator;
pub mod validation;
pub mod geometry;
pub mod render;
pub mod config;
pub mod pipeline;

pub use hashing::{SeedHasher, compute_fingerprint, canonical_json, sha256_hex};
pub use random::SeededRandomStream;
pub use rows::RowKind;
pub use palette::{Color, ColorError, GradientColors, GradientSet};
pub use generator::{generate, AvatarDescription, DescriptionError, DescriptionParts};
pub use validation::{ValidationResult, ValidationRule, ValidationViolation, Validator};
pub use render::{RenderError, Renderer};
pub use config::{ConfigError, RenderConfig};
pub use pipeline::{AvatarPipeline, ExportedAvatar, PipelineError};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
