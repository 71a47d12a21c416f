//! Decorative bushes and trees
//!
//! Placed the same way as rocks but never interactive.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::placement::{Anchor, Viewport};

/// Trees along the top border
pub const TREE_COUNT: usize = 10;
/// Vertical position of the tree line (fraction of viewport height)
pub const TREE_LINE_Y: f32 = 0.05;

/// Bush positions (fractional) with their scale
const BUSHES: [(f32, f32, f32); 4] = [
    (0.85, 0.2, 0.3),
    (0.75, 0.85, 0.3),
    (0.4, 0.7, 0.3),
    (0.2, 0.4, 0.3),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropKind {
    Bush,
    Tree,
}

/// A single piece of decoration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    pub kind: PropKind,
    pub anchor: Anchor,
    pub position: Vec2,
    pub scale: f32,
    /// Draw order (higher is in front)
    pub depth: u8,
}

/// All decoration for a level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenery {
    pub props: Vec<Prop>,
}

impl Scenery {
    pub fn generate<R: Rng + ?Sized>(viewport: &Viewport, rng: &mut R) -> Self {
        let mut props = Vec::with_capacity(BUSHES.len() + TREE_COUNT);

        for (x, y, scale) in BUSHES {
            let anchor = Anchor::Fractional(Vec2::new(x, y));
            props.push(Prop {
                kind: PropKind::Bush,
                anchor,
                position: anchor.resolve(viewport),
                scale,
                depth: 1,
            });
        }

        for _ in 0..TREE_COUNT {
            let anchor = Anchor::Fractional(Vec2::new(rng.random_range(0.0..=1.0), TREE_LINE_Y));
            props.push(Prop {
                kind: PropKind::Tree,
                anchor,
                position: anchor.resolve(viewport),
                scale: rng.random_range(0.5..=0.7),
                depth: rng.random_range(1..=2),
            });
        }

        Self { props }
    }

    pub fn relayout(&mut self, viewport: &Viewport) {
        for prop in &mut self.props {
            prop.position = prop.anchor.resolve(viewport);
        }
    }
}
