//! Deterministic interaction session
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable object order (by id)
//! - No rendering or platform dependencies

pub mod movement;
pub mod session;
pub mod state;

pub use movement::MovementIntent;
pub use session::Session;
pub use state::{
    Directive, InteractionResult, ItemCount, LevelSummary, PlayerState, SessionPhase, SessionState,
};
