//! Error types
//!
//! `TooFar` is a normal gameplay outcome and lives in `sim`, not here.

use thiserror::Error;

/// Problems with a level configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid level config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level must contain at least one rock")]
    NoObjects,

    #[error("hazard probability must be 0-100, got {0}")]
    HazardProbability(u8),

    #[error("proximity radius must be positive and finite, got {0}")]
    ProximityRadius(f32),

    #[error("player speed must be non-negative and finite, got {0}")]
    PlayerSpeed(f32),

    #[error("placement provides {actual} positions but level expects {expected}")]
    PlacementCount { expected: usize, actual: usize },

    #[error("placement range {axis} ({min}, {max}) must be ordered and within 0..=1")]
    PlacementRange { axis: char, min: f32, max: f32 },

    #[error("tile size must be positive, got {0}")]
    TileSize(f32),
}

/// Problems with a content catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog has no findings")]
    NoFindings,

    #[error("catalog has no hazards")]
    NoHazards,

    #[error("duplicate finding id: {0}")]
    DuplicateFinding(String),

    #[error("duplicate hazard id: {0}")]
    DuplicateHazard(String),
}

/// Caller defects when driving a session. These never happen with a
/// correctly wired page, so `Session::attempt_interaction` panics on them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    #[error("no rock with id {0}")]
    UnknownObject(usize),

    #[error("rock {0} was already flipped")]
    AlreadyRevealed(usize),

    #[error("level is already complete")]
    LevelComplete,
}
