//! Presentation boundary
//!
//! The session never touches sprites, sounds or the DOM. It queues
//! `Directive`s; whatever draws the game implements `Presenter` and gets
//! them routed here.

use crate::catalog::{Discovery, DiscoveryKind};
use crate::sim::{Directive, LevelSummary};

/// Receiver for session directives
pub trait Presenter {
    /// A rock was flipped
    fn on_resolved(&mut self, object_id: usize, discovery: &Discovery, score: i64);
    /// The player tried to flip a rock from too far away
    fn on_too_far(&mut self, object_id: usize, distance: f32);
    /// Every rock has been flipped
    fn on_level_complete(&mut self, summary: &LevelSummary);
}

/// Route directives to a presenter in order
pub fn dispatch<P, I>(directives: I, presenter: &mut P)
where
    P: Presenter + ?Sized,
    I: IntoIterator<Item = Directive>,
{
    for directive in directives {
        match directive {
            Directive::Resolved {
                object_id,
                discovery,
                score,
            } => presenter.on_resolved(object_id, &discovery, score),
            Directive::TooFar {
                object_id,
                distance,
            } => presenter.on_too_far(object_id, distance),
            Directive::LevelComplete { summary } => presenter.on_level_complete(&summary),
        }
    }
}

/// Presenter that only writes to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn on_resolved(&mut self, object_id: usize, discovery: &Discovery, score: i64) {
        match discovery.kind() {
            DiscoveryKind::Finding => log::info!(
                "Rock {}: found a {}! Score: {}",
                object_id,
                discovery.display_name(),
                score
            ),
            DiscoveryKind::Hazard => log::info!(
                "Rock {}: {} ({}). Score: {}",
                object_id,
                discovery.display_name(),
                discovery.description(),
                score
            ),
        }
    }

    fn on_too_far(&mut self, _object_id: usize, _distance: f32) {
        log::info!("Move closer to flip the rock!");
    }

    fn on_level_complete(&mut self, summary: &LevelSummary) {
        log::info!("Level Complete! Score: {}", summary.score);
        for c in &summary.findings {
            log::info!("  {} x{}", c.display_name, c.count);
        }
        for c in &summary.hazards {
            log::info!("  {} x{} (trash)", c.display_name, c.count);
        }
    }
}
