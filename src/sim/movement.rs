//! Player movement
//!
//! Keyboard arrows and the on-screen d-pad both reduce to a `MovementIntent`
//! sampled once per tick. Axes are independent so diagonals work. When both
//! keys on one axis are held, left beats right and up beats down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::PlayerState;
use crate::placement::Viewport;

/// Directions currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MovementIntent {
    /// Combine two input sources (e.g. keyboard + touch buttons)
    pub fn merge(self, other: MovementIntent) -> Self {
        Self {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            down: self.down || other.down,
        }
    }

    /// Per-axis unit direction in screen space (y grows downward).
    /// Diagonals are not normalized.
    pub fn direction(&self) -> Vec2 {
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }

    pub fn is_idle(&self) -> bool {
        self.direction() == Vec2::ZERO
    }
}

impl PlayerState {
    /// Spawn at a fractional viewport position
    pub fn spawn(viewport: &Viewport, fraction: Vec2) -> Self {
        Self {
            position: viewport.to_display(fraction),
        }
    }

    /// Advance one step, staying inside the viewport
    pub fn step(&mut self, intent: &MovementIntent, speed: f32, dt: f32, viewport: &Viewport) {
        let velocity = intent.direction() * speed;
        self.position = viewport.clamp(self.position + velocity * dt);
    }
}
