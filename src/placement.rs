//! Rock placement and viewport layout
//!
//! Rocks are anchored either to absolute display coordinates (fixed lists,
//! tile maps) or to fractions of the viewport (fractional lists, random
//! ranges). Only fractional anchors follow the viewport when it resizes.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::LevelConfig;
use crate::consts::{ROCK_SCALE_MAX, ROCK_SCALE_MIN};
use crate::error::ConfigError;

/// Tile map character that marks a rock
pub const ROCK_TILE: char = 'R';

/// Current display area size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Scale a fractional position to display coordinates
    pub fn to_display(&self, fraction: Vec2) -> Vec2 {
        crate::fraction_to_display(fraction, self.width, self.height)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }

    /// Keep a point inside the display bounds
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(Vec2::ZERO, self.size().max(Vec2::ZERO))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// How an object's position relates to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Anchor {
    /// Display coordinates, never rescaled
    Absolute(Vec2),
    /// Fraction of the viewport, rescaled on resize
    Fractional(Vec2),
}

impl Anchor {
    pub fn resolve(&self, viewport: &Viewport) -> Vec2 {
        match *self {
            Anchor::Absolute(p) => p,
            Anchor::Fractional(f) => viewport.to_display(f),
        }
    }
}

/// A one-shot clickable rock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveObject {
    pub id: usize,
    pub anchor: Anchor,
    /// Cached display position (changes only on resize)
    pub position: Vec2,
    /// Sprite scale hint for the page, no gameplay effect
    pub scale: f32,
    pub revealed: bool,
}

/// Where the rocks of a level go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Placement {
    /// Literal display coordinates
    Fixed { positions: Vec<Vec2> },
    /// Fractions of the viewport
    Fractional { positions: Vec<Vec2> },
    /// Each rock drawn uniformly inside a fractional box
    RandomRange { x: (f32, f32), y: (f32, f32) },
    /// Grid of rows where `R` marks a rock at the tile centre
    TileMap { tile_size: f32, rows: Vec<String> },
}

impl Default for Placement {
    fn default() -> Self {
        Self::classic()
    }
}

impl Placement {
    /// Rocks scattered across the creek bed, clear of the tree line
    pub fn classic() -> Self {
        Placement::RandomRange {
            x: (0.1, 0.9),
            y: (0.3, 0.8),
        }
    }

    /// Number of rocks the plan itself dictates (None for random ranges)
    pub fn object_count(&self) -> Option<usize> {
        match self {
            Placement::Fixed { positions } | Placement::Fractional { positions } => {
                Some(positions.len())
            }
            Placement::RandomRange { .. } => None,
            Placement::TileMap { rows, .. } => Some(
                rows.iter()
                    .map(|r| r.chars().filter(|&c| c == ROCK_TILE).count())
                    .sum(),
            ),
        }
    }

    pub fn validate(&self, total_objects: usize) -> Result<(), ConfigError> {
        match self {
            Placement::RandomRange { x, y } => {
                for (axis, (min, max)) in [('x', *x), ('y', *y)] {
                    let ordered = min <= max && (0.0..=1.0).contains(&min) && (0.0..=1.0).contains(&max);
                    if !ordered {
                        return Err(ConfigError::PlacementRange { axis, min, max });
                    }
                }
            }
            Placement::TileMap { tile_size, .. } if !(*tile_size > 0.0 && tile_size.is_finite()) => {
                return Err(ConfigError::TileSize(*tile_size));
            }
            _ => {}
        }

        match self.object_count() {
            Some(actual) if actual != total_objects => Err(ConfigError::PlacementCount {
                expected: total_objects,
                actual,
            }),
            _ => Ok(()),
        }
    }

    fn anchors<R: Rng + ?Sized>(&self, total_objects: usize, rng: &mut R) -> Vec<Anchor> {
        match self {
            Placement::Fixed { positions } => positions.iter().map(|&p| Anchor::Absolute(p)).collect(),
            Placement::Fractional { positions } => {
                positions.iter().map(|&p| Anchor::Fractional(p)).collect()
            }
            Placement::RandomRange { x, y } => (0..total_objects)
                .map(|_| {
                    let fx = rng.random_range(x.0..=x.1);
                    let fy = rng.random_range(y.0..=y.1);
                    Anchor::Fractional(Vec2::new(fx, fy))
                })
                .collect(),
            Placement::TileMap { tile_size, rows } => {
                let mut anchors = Vec::new();
                for (row, line) in rows.iter().enumerate() {
                    for (col, c) in line.chars().enumerate() {
                        if c == ROCK_TILE {
                            let centre = Vec2::new(col as f32 + 0.5, row as f32 + 0.5) * *tile_size;
                            anchors.push(Anchor::Absolute(centre));
                        }
                    }
                }
                anchors
            }
        }
    }
}

/// Build the rocks for a level. Assumes `config` has been validated.
/// Rocks may overlap; no spacing is enforced.
pub fn generate<R: Rng + ?Sized>(
    config: &LevelConfig,
    viewport: &Viewport,
    rng: &mut R,
) -> Vec<InteractiveObject> {
    config
        .placement
        .anchors(config.total_objects, rng)
        .into_iter()
        .take(config.total_objects)
        .enumerate()
        .map(|(id, anchor)| InteractiveObject {
            id,
            anchor,
            position: anchor.resolve(viewport),
            scale: rng.random_range(ROCK_SCALE_MIN..=ROCK_SCALE_MAX),
            revealed: false,
        })
        .collect()
}

/// Recompute cached positions of unflipped rocks for a new viewport.
/// Idempotent; flipped rocks are left where they were.
pub fn relayout(objects: &mut [InteractiveObject], viewport: &Viewport) {
    for obj in objects.iter_mut().filter(|o| !o.revealed) {
        obj.position = obj.anchor.resolve(viewport);
    }
}
