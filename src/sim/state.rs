//! Session state and the values the session hands back to the page

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::catalog::{ContentCatalog, Discovery};

/// Where the level stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Rocks left to flip
    InProgress,
    /// Every rock flipped; terminal until the session is reset
    Complete,
}

/// The player as far as proximity checks care
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec2,
}

/// Score and collection history for one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: i64,
    pub revealed_count: usize,
    pub total_objects: usize,
    /// Finding ids in the order they were collected
    pub collected_findings: Vec<String>,
    /// Hazard ids in the order they were collected
    pub collected_hazards: Vec<String>,
}

impl SessionState {
    pub fn new(total_objects: usize) -> Self {
        Self {
            score: 0,
            revealed_count: 0,
            total_objects,
            collected_findings: Vec::new(),
            collected_hazards: Vec::new(),
        }
    }

    pub fn all_revealed(&self) -> bool {
        self.revealed_count == self.total_objects
    }
}

/// Outcome of a flip attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum InteractionResult {
    /// Player was not close enough; nothing changed, try again
    TooFar { distance: f32 },
    /// The rock was flipped and this was underneath
    Resolved(Discovery),
}

impl InteractionResult {
    pub fn is_resolved(&self) -> bool {
        matches!(self, InteractionResult::Resolved(_))
    }
}

/// Things the page should show, queued in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Directive {
    /// Swap the rock sprite, update the journal and score label, play a sound
    Resolved {
        object_id: usize,
        discovery: Discovery,
        score: i64,
    },
    /// Show the "move closer" hint
    TooFar { object_id: usize, distance: f32 },
    /// Show the end-of-level summary
    LevelComplete { summary: LevelSummary },
}

/// How many of one item were collected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCount {
    pub display_name: String,
    pub count: usize,
}

/// End-of-level recap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub score: i64,
    /// Grouped by display name, in order of first collection
    pub findings: Vec<ItemCount>,
    pub hazards: Vec<ItemCount>,
}

impl LevelSummary {
    pub fn build(state: &SessionState, catalog: &ContentCatalog) -> Self {
        let findings = group_by_name(state.collected_findings.iter().map(|id| {
            catalog
                .finding(id)
                .map(|f| f.display_name.as_str())
                .unwrap_or(id.as_str())
        }));
        let hazards = group_by_name(state.collected_hazards.iter().map(|id| {
            catalog
                .hazard(id)
                .map(|h| h.display_name.as_str())
                .unwrap_or(id.as_str())
        }));

        Self {
            score: state.score,
            findings,
            hazards,
        }
    }

    pub fn total_findings(&self) -> usize {
        self.findings.iter().map(|c| c.count).sum()
    }

    pub fn total_hazards(&self) -> usize {
        self.hazards.iter().map(|c| c.count).sum()
    }
}

fn group_by_name<'a>(names: impl Iterator<Item = &'a str>) -> Vec<ItemCount> {
    let mut counts: Vec<ItemCount> = Vec::new();
    for name in names {
        match counts.iter_mut().find(|c| c.display_name == name) {
            Some(entry) => entry.count += 1,
            None => counts.push(ItemCount {
                display_name: name.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_groups_in_first_seen_order() {
        let catalog = ContentCatalog::stream_catalog();
        let mut state = SessionState::new(6);
        state.collected_findings = vec!["mayfly".into(), "caddisfly".into(), "mayfly".into()];
        state.collected_hazards = vec!["glass".into(), "glass".into(), "can".into()];
        state.score = 30 - 4 - 4 - 5;
        state.revealed_count = 6;

        let summary = LevelSummary::build(&state, &catalog);
        assert_eq!(summary.score, 17);
        assert_eq!(
            summary.findings,
            vec![
                ItemCount { display_name: "Mayfly Nymph".into(), count: 2 },
                ItemCount { display_name: "Caddisfly Larva".into(), count: 1 },
            ]
        );
        assert_eq!(summary.hazards[0], ItemCount { display_name: "Broken Glass".into(), count: 2 });
        assert_eq!(summary.hazards[1], ItemCount { display_name: "Trash".into(), count: 1 });
        assert_eq!(summary.total_findings(), 3);
        assert_eq!(summary.total_hazards(), 3);
    }

    #[test]
    fn test_empty_summary() {
        let summary = LevelSummary::build(&SessionState::new(3), &ContentCatalog::stream_catalog());
        assert!(summary.findings.is_empty());
        assert!(summary.hazards.is_empty());
        assert_eq!(summary.score, 0);
    }
}
