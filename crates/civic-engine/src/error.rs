//! Error types for fallible engine operations.

use thiserror::Error;

/// Failures reading or writing the boot registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry is frozen; `{0}` cannot be written after boot")]
    Frozen(String),
    #[error("registry JSON must be an object")]
    NotAnObject,
    #[error("malformed registry JSON")]
    Parse(#[source] serde_json::Error),
    #[error("registry value `{key}` has the wrong shape")]
    Value {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures producing sprite textures.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("malformed asset manifest")]
    Manifest(#[from] serde_json::Error),
    #[error("texture `{key}` has invalid dimensions {width}x{height} with {frames} frame(s)")]
    InvalidDimensions {
        key: String,
        width: u32,
        height: u32,
        frames: u32,
    },
    #[error("unknown texture `{0}`")]
    UnknownTexture(String),
}
