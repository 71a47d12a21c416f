//! Field journal
//!
//! Everything the side panel and HUD display, kept as plain data so the
//! page only has to copy strings into elements.

use serde::Serialize;

use crate::catalog::{Discovery, DiscoveryKind};
use crate::presentation::Presenter;
use crate::sim::LevelSummary;

/// Hint shown when a rock is out of reach
pub const TOO_FAR_HINT: &str = "Move closer to flip the rock!";

/// The most recent discovery shown in the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    pub kind: DiscoveryKind,
    pub image_ref: String,
    pub name: String,
    pub blurb: String,
}

/// Panel + HUD model
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldJournal {
    pub entry: Option<JournalEntry>,
    pub score: i64,
    pub hint: Option<String>,
    pub summary: Option<LevelSummary>,
}

impl FieldJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// The end-of-level popup text, if the level is done
    pub fn summary_text(&self) -> Option<String> {
        self.summary.as_ref().map(format_summary)
    }
}

/// Render a summary the way the level-complete popup shows it
pub fn format_summary(summary: &LevelSummary) -> String {
    let mut text = format!("Level Complete!\nScore: {}\n\nBugs Collected:\n", summary.score);
    for c in &summary.findings {
        text.push_str(&format!("- {} x{}\n", c.display_name, c.count));
    }
    text.push_str("\nTrash Collected:\n");
    for c in &summary.hazards {
        text.push_str(&format!("- {} x{}\n", c.display_name, c.count));
    }
    text
}

impl Presenter for FieldJournal {
    fn on_resolved(&mut self, _object_id: usize, discovery: &Discovery, score: i64) {
        self.entry = Some(JournalEntry {
            kind: discovery.kind(),
            image_ref: discovery.image_ref().to_string(),
            name: discovery.display_name().to_string(),
            blurb: discovery.description().to_string(),
        });
        self.score = score;
        self.hint = None;
    }

    fn on_too_far(&mut self, _object_id: usize, _distance: f32) {
        self.hint = Some(TOO_FAR_HINT.to_string());
    }

    fn on_level_complete(&mut self, summary: &LevelSummary) {
        self.score = summary.score;
        self.summary = Some(summary.clone());
    }
}
