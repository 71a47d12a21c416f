//! The Adventures of Little Doug - a streamside rock-flipping game
//!
//! Core modules:
//! - `catalog`: Findings (stream bugs) and hazards (trash) that rocks can hide
//! - `placement`: Where rocks go, and how they follow the viewport
//! - `scenery`: Bushes and trees (decoration only)
//! - `sim`: Deterministic interaction session (proximity, scoring, completion)
//! - `presentation`: Directive sink the page implements
//! - `journal`: Field journal panel model
//! - `config`: Per-level tuning

pub mod catalog;
pub mod config;
pub mod error;
pub mod journal;
pub mod placement;
pub mod presentation;
pub mod scenery;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use catalog::{ContentCatalog, Discovery, DiscoveryKind, FindingDefinition, HazardDefinition};
pub use config::LevelConfig;
pub use error::{CatalogError, ConfigError, InteractionError};
pub use journal::FieldJournal;
pub use placement::{Placement, Viewport};
pub use presentation::{LogPresenter, Presenter};
pub use sim::{InteractionResult, Session, SessionPhase};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed movement timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player must be closer than this to flip a rock (display units)
    pub const PROXIMITY_RADIUS: f32 = 60.0;
    /// Chance (percent) that a flipped rock hides trash
    pub const HAZARD_PROBABILITY_PERCENT: u8 = 20;
    /// Points for every bug found
    pub const FINDING_REWARD: i32 = 10;
    /// Rocks per level
    pub const TOTAL_OBJECTS: usize = 12;

    /// Player walking speed (display units per second)
    pub const PLAYER_SPEED: f32 = 200.0;
    /// Spawn point as a fraction of the viewport
    pub const PLAYER_SPAWN: (f32, f32) = (0.5, 0.8);

    /// Rock display scale range
    pub const ROCK_SCALE_MIN: f32 = 0.4;
    pub const ROCK_SCALE_MAX: f32 = 0.5;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Scale a viewport fraction to display coordinates
#[inline]
pub fn fraction_to_display(fraction: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(fraction.x * width, fraction.y * height)
}
