//! Content catalog
//!
//! The fixed lists of things a rock can hide. Draws are uniform with
//! replacement, so the same bug can turn up under several rocks.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A stream bug the player can collect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingDefinition {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub image_ref: String,
}

/// A piece of trash that costs points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardDefinition {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub image_ref: String,
    /// Added to the score when revealed (non-positive in every shipped level)
    pub penalty: i32,
}

/// Which list a discovery came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscoveryKind {
    Finding,
    Hazard,
}

/// What was under a flipped rock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "definition")]
pub enum Discovery {
    Finding(FindingDefinition),
    Hazard(HazardDefinition),
}

impl Discovery {
    pub fn kind(&self) -> DiscoveryKind {
        match self {
            Discovery::Finding(_) => DiscoveryKind::Finding,
            Discovery::Hazard(_) => DiscoveryKind::Hazard,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Discovery::Finding(f) => &f.id,
            Discovery::Hazard(h) => &h.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Discovery::Finding(f) => &f.display_name,
            Discovery::Hazard(h) => &h.display_name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Discovery::Finding(f) => &f.description,
            Discovery::Hazard(h) => &h.description,
        }
    }

    pub fn image_ref(&self) -> &str {
        match self {
            Discovery::Finding(f) => &f.image_ref,
            Discovery::Hazard(h) => &h.image_ref,
        }
    }

    /// Score delta this discovery is worth
    pub fn points(&self, finding_reward: i32) -> i32 {
        match self {
            Discovery::Finding(_) => finding_reward,
            Discovery::Hazard(h) => h.penalty,
        }
    }
}

/// Immutable findings + hazards for a level
#[derive(Debug, Clone, Serialize)]
pub struct ContentCatalog {
    findings: Vec<FindingDefinition>,
    hazards: Vec<HazardDefinition>,
}

#[derive(Deserialize)]
struct RawCatalog {
    findings: Vec<FindingDefinition>,
    hazards: Vec<HazardDefinition>,
}

impl ContentCatalog {
    /// Build a catalog, checking both lists are non-empty with unique ids
    pub fn new(
        findings: Vec<FindingDefinition>,
        hazards: Vec<HazardDefinition>,
    ) -> Result<Self, CatalogError> {
        if findings.is_empty() {
            return Err(CatalogError::NoFindings);
        }
        if hazards.is_empty() {
            return Err(CatalogError::NoHazards);
        }

        let mut seen = HashSet::new();
        for f in &findings {
            if !seen.insert(f.id.as_str()) {
                return Err(CatalogError::DuplicateFinding(f.id.clone()));
            }
        }
        seen.clear();
        for h in &hazards {
            if !seen.insert(h.id.as_str()) {
                return Err(CatalogError::DuplicateHazard(h.id.clone()));
            }
            if h.penalty > 0 {
                log::warn!("Hazard '{}' has a positive penalty ({})", h.id, h.penalty);
            }
        }

        Ok(Self { findings, hazards })
    }

    /// Parse and validate a catalog from JSON `{ "findings": [...], "hazards": [...] }`
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::new(raw.findings, raw.hazards)
    }

    /// The creek from the first level: three bugs, three kinds of litter
    pub fn stream_catalog() -> Self {
        let finding = |id: &str, name: &str, blurb: &str| FindingDefinition {
            id: id.to_string(),
            display_name: name.to_string(),
            description: blurb.to_string(),
            image_ref: format!("{id}.png"),
        };
        let hazard = |id: &str, name: &str, blurb: &str, penalty: i32| HazardDefinition {
            id: id.to_string(),
            display_name: name.to_string(),
            description: blurb.to_string(),
            image_ref: format!("{id}.png"),
            penalty,
        };

        Self {
            findings: vec![
                finding(
                    "caddisfly",
                    "Caddisfly Larva",
                    "Caddisfly larvae often build protective cases and indicate clean water.",
                ),
                finding(
                    "hellgrammite",
                    "Hellgrammite",
                    "Hellgrammites are fierce predators found in fast-moving, oxygen-rich streams.",
                ),
                finding(
                    "mayfly",
                    "Mayfly Nymph",
                    "Mayfly nymphs are sensitive to pollution and signal excellent water quality.",
                ),
            ],
            hazards: vec![
                hazard(
                    "plastic",
                    "Plastic Bottle",
                    "Plastic trash harms aquatic life and pollutes streams.",
                    -5,
                ),
                hazard(
                    "can",
                    "Trash",
                    "Litter left on land often ends up in our waterways, carried by wind and \
                     rain into habitats where it doesn't belong. Keeping trash out of our \
                     rivers protects wildlife, water quality, and the spaces we all share.",
                    -5,
                ),
                hazard(
                    "glass",
                    "Broken Glass",
                    "Broken glass can injure wildlife and people exploring the stream.",
                    -4,
                ),
            ],
        }
    }

    pub fn findings(&self) -> &[FindingDefinition] {
        &self.findings
    }

    pub fn hazards(&self) -> &[HazardDefinition] {
        &self.hazards
    }

    pub fn finding(&self, id: &str) -> Option<&FindingDefinition> {
        self.findings.iter().find(|f| f.id == id)
    }

    pub fn hazard(&self, id: &str) -> Option<&HazardDefinition> {
        self.hazards.iter().find(|h| h.id == id)
    }

    pub fn draw_random_finding<R: Rng + ?Sized>(&self, rng: &mut R) -> FindingDefinition {
        self.findings[rng.random_range(0..self.findings.len())].clone()
    }

    pub fn draw_random_hazard<R: Rng + ?Sized>(&self, rng: &mut R) -> HazardDefinition {
        self.hazards[rng.random_range(0..self.hazards.len())].clone()
    }
}

impl Default for ContentCatalog {
    fn default() -> Self {
        Self::stream_catalog()
    }
}
