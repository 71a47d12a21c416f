//! The rock-flip state machine
//!
//! A `Session` owns everything for one level: the rocks, the player position
//! used for proximity checks, the score, and a queue of directives for the
//! page. Nothing here is global, so any number of sessions can coexist.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::movement::MovementIntent;
use super::state::{
    Directive, InteractionResult, LevelSummary, PlayerState, SessionPhase, SessionState,
};
use crate::catalog::{ContentCatalog, Discovery};
use crate::config::LevelConfig;
use crate::consts::PLAYER_SPAWN;
use crate::error::{ConfigError, InteractionError};
use crate::placement::{self, InteractiveObject, Viewport};
use crate::presentation::{self, Presenter};
use crate::scenery::Scenery;

/// One level in progress
#[derive(Debug, Clone)]
pub struct Session {
    config: LevelConfig,
    catalog: ContentCatalog,
    viewport: Viewport,
    seed: u64,
    rng: Pcg32,
    objects: Vec<InteractiveObject>,
    scenery: Scenery,
    player: PlayerState,
    state: SessionState,
    phase: SessionPhase,
    directives: Vec<Directive>,
}

impl Session {
    /// Start a level. Fails only if the config is invalid.
    pub fn new(
        config: LevelConfig,
        catalog: ContentCatalog,
        viewport: Viewport,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let objects = placement::generate(&config, &viewport, &mut rng);
        let scenery = Scenery::generate(&viewport, &mut rng);
        let state = SessionState::new(objects.len());
        let player = PlayerState::spawn(&viewport, Vec2::from(PLAYER_SPAWN));

        log::info!(
            "Level started: {} rocks, radius {}, {}% trash (seed {})",
            objects.len(),
            config.proximity_radius,
            config.hazard_probability_percent,
            seed
        );

        Ok(Self {
            config,
            catalog,
            viewport,
            seed,
            rng,
            objects,
            scenery,
            player,
            state,
            phase: SessionPhase::InProgress,
            directives: Vec::new(),
        })
    }

    /// Throw the level away and lay out a fresh one with a new seed
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.objects = placement::generate(&self.config, &self.viewport, &mut self.rng);
        self.scenery = Scenery::generate(&self.viewport, &mut self.rng);
        self.state = SessionState::new(self.objects.len());
        self.player = PlayerState::spawn(&self.viewport, Vec2::from(PLAYER_SPAWN));
        self.phase = SessionPhase::InProgress;
        self.directives.clear();
        log::info!("Level reset (seed {})", seed);
    }

    /// Flip a rock from `player_pos`.
    ///
    /// # Panics
    /// On an unknown rock, an already flipped rock, or a finished level.
    /// A correctly wired page never does any of these.
    pub fn attempt_interaction(&mut self, object_id: usize, player_pos: Vec2) -> InteractionResult {
        match self.try_attempt_interaction(object_id, player_pos) {
            Ok(result) => result,
            Err(e) => panic!("attempt_interaction: {e}"),
        }
    }

    /// Flip a rock using the session's own player position
    pub fn interact(&mut self, object_id: usize) -> InteractionResult {
        let pos = self.player.position;
        self.attempt_interaction(object_id, pos)
    }

    /// Non-panicking form of `attempt_interaction`
    pub fn try_attempt_interaction(
        &mut self,
        object_id: usize,
        player_pos: Vec2,
    ) -> Result<InteractionResult, InteractionError> {
        if self.phase == SessionPhase::Complete {
            return Err(InteractionError::LevelComplete);
        }
        let obj = self
            .objects
            .get(object_id)
            .ok_or(InteractionError::UnknownObject(object_id))?;
        if obj.revealed {
            return Err(InteractionError::AlreadyRevealed(object_id));
        }

        // Proximity gate (strict; NaN counts as too far)
        let distance = crate::distance(player_pos, obj.position);
        if !(distance < self.config.proximity_radius) {
            log::debug!("Move closer to flip rock {} ({:.1} away)", object_id, distance);
            self.directives.push(Directive::TooFar {
                object_id,
                distance,
            });
            return Ok(InteractionResult::TooFar { distance });
        }

        let discovery = self.draw_discovery();
        self.state.score += i64::from(discovery.points(self.config.finding_reward));
        match &discovery {
            Discovery::Finding(f) => self.state.collected_findings.push(f.id.clone()),
            Discovery::Hazard(h) => self.state.collected_hazards.push(h.id.clone()),
        }

        self.objects[object_id].revealed = true;
        self.state.revealed_count += 1;

        log::info!(
            "Rock {} flipped: {} (score {}, {}/{})",
            object_id,
            discovery.display_name(),
            self.state.score,
            self.state.revealed_count,
            self.state.total_objects
        );

        self.directives.push(Directive::Resolved {
            object_id,
            discovery: discovery.clone(),
            score: self.state.score,
        });

        if self.state.all_revealed() {
            self.phase = SessionPhase::Complete;
            let summary = self.summary();
            log::info!(
                "Level complete! Score {} ({} bugs, {} trash)",
                summary.score,
                summary.total_findings(),
                summary.total_hazards()
            );
            self.directives.push(Directive::LevelComplete { summary });
        }

        Ok(InteractionResult::Resolved(discovery))
    }

    /// Decide what was under the rock, at the moment it is flipped
    fn draw_discovery(&mut self) -> Discovery {
        let roll: u8 = self.rng.random_range(1..=100);
        if roll <= self.config.hazard_probability_percent {
            Discovery::Hazard(self.catalog.draw_random_hazard(&mut self.rng))
        } else {
            Discovery::Finding(self.catalog.draw_random_finding(&mut self.rng))
        }
    }

    /// Advance player movement by `dt` seconds
    pub fn tick(&mut self, intent: &MovementIntent, dt: f32) {
        self.player
            .step(intent, self.config.player_speed, dt, &self.viewport);
    }

    /// The display area changed size. Unflipped rocks follow their anchors
    /// and the player is pulled back inside; score is untouched.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        placement::relayout(&mut self.objects, &viewport);
        self.scenery.relayout(&viewport);
        self.player.position = viewport.clamp(self.player.position);
        log::debug!("Resized to {}x{}", viewport.width, viewport.height);
    }

    /// Take every directive queued since the last drain
    pub fn drain_directives(&mut self) -> Vec<Directive> {
        std::mem::take(&mut self.directives)
    }

    /// Send queued directives to a presenter
    pub fn flush<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        presentation::dispatch(self.drain_directives(), presenter);
    }

    pub fn summary(&self) -> LevelSummary {
        LevelSummary::build(&self.state, &self.catalog)
    }

    /// Nearest unflipped rock to the player, with its distance
    pub fn nearest_unrevealed(&self) -> Option<(usize, f32)> {
        self.objects
            .iter()
            .filter(|o| !o.revealed)
            .map(|o| (o.id, crate::distance(self.player.position, o.position)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    pub fn objects(&self) -> &[InteractiveObject] {
        &self.objects
    }

    pub fn object(&self, id: usize) -> Option<&InteractiveObject> {
        self.objects.get(id)
    }

    pub fn scenery(&self) -> &Scenery {
        &self.scenery
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn set_player_position(&mut self, position: Vec2) {
        self.player.position = self.viewport.clamp(position);
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DiscoveryKind;
    use crate::placement::Placement;
    use proptest::prelude::*;

    fn fixed_level(positions: Vec<Vec2>, hazard_percent: u8) -> LevelConfig {
        LevelConfig {
            total_objects: positions.len(),
            hazard_probability_percent: hazard_percent,
            placement: Placement::Fixed { positions },
            ..LevelConfig::classic()
        }
    }

    fn session(config: LevelConfig, seed: u64) -> Session {
        Session::new(
            config,
            ContentCatalog::stream_catalog(),
            Viewport::new(1000.0, 1000.0),
            seed,
        )
        .unwrap()
    }

    #[test]
    fn test_three_bugs_no_trash() {
        let config = fixed_level(vec![Vec2::new(100.0, 100.0); 3], 0);
        let mut s = session(config, 42);
        let here = Vec2::new(100.0, 100.0);

        for id in 0..3 {
            let result = s.attempt_interaction(id, here);
            assert!(matches!(result, InteractionResult::Resolved(Discovery::Finding(_))));
        }

        assert_eq!(s.state().score, 30);
        assert!(s.is_complete());
        assert!(s.state().collected_hazards.is_empty());
        assert_eq!(s.state().collected_findings.len(), 3);
    }

    #[test]
    fn test_proximity_boundary() {
        let config = fixed_level(vec![Vec2::new(100.0, 100.0)], 20);
        let mut s = session(config, 1);

        let result = s.attempt_interaction(0, Vec2::new(100.0, 161.0));
        assert_eq!(result, InteractionResult::TooFar { distance: 61.0 });
        assert!(!s.object(0).unwrap().revealed);

        // Exactly on the radius is still too far
        let result = s.attempt_interaction(0, Vec2::new(100.0, 160.0));
        assert!(!result.is_resolved());

        let result = s.attempt_interaction(0, Vec2::new(100.0, 150.0));
        assert!(result.is_resolved());
        assert!(s.object(0).unwrap().revealed);
    }

    #[test]
    fn test_tunable_radius() {
        let mut config = fixed_level(vec![Vec2::ZERO], 0);
        config.proximity_radius = 40.0;
        let mut s = session(config, 1);
        assert!(!s.attempt_interaction(0, Vec2::new(45.0, 0.0)).is_resolved());
        assert!(s.attempt_interaction(0, Vec2::new(39.0, 0.0)).is_resolved());
    }

    #[test]
    fn test_directives_in_order() {
        let config = fixed_level(vec![Vec2::ZERO, Vec2::new(500.0, 0.0)], 0);
        let mut s = session(config, 9);

        s.attempt_interaction(1, Vec2::ZERO);
        s.attempt_interaction(0, Vec2::ZERO);
        s.attempt_interaction(1, Vec2::new(500.0, 0.0));

        let directives = s.drain_directives();
        assert_eq!(directives.len(), 4);
        assert!(matches!(directives[0], Directive::TooFar { object_id: 1, .. }));
        assert!(matches!(directives[1], Directive::Resolved { object_id: 0, score: 10, .. }));
        assert!(matches!(directives[2], Directive::Resolved { object_id: 1, score: 20, .. }));
        match &directives[3] {
            Directive::LevelComplete { summary } => {
                assert_eq!(summary.score, 20);
                assert_eq!(summary.total_findings(), 2);
                assert!(summary.hazards.is_empty());
            }
            other => panic!("expected level complete, got {:?}", other),
        }
        assert!(s.drain_directives().is_empty());
    }

    #[test]
    fn test_all_trash_goes_negative() {
        let config = fixed_level(vec![Vec2::ZERO; 5], 100);
        let mut s = session(config, 5);
        let mut expected = 0i64;
        for id in 0..5 {
            match s.attempt_interaction(id, Vec2::ZERO) {
                InteractionResult::Resolved(Discovery::Hazard(h)) => expected += i64::from(h.penalty),
                other => panic!("expected hazard, got {:?}", other),
            }
        }
        assert_eq!(s.state().score, expected);
        assert!(s.state().score < 0);
        assert_eq!(s.state().collected_hazards.len(), 5);
        assert!(s.summary().findings.is_empty());
    }

    #[test]
    fn test_completion_fires_once() {
        let config = fixed_level(vec![Vec2::ZERO], 0);
        let mut s = session(config, 3);
        s.attempt_interaction(0, Vec2::ZERO);
        assert_eq!(s.phase(), SessionPhase::Complete);

        let completions = s
            .drain_directives()
            .iter()
            .filter(|d| matches!(d, Directive::LevelComplete { .. }))
            .count();
        assert_eq!(completions, 1);
        assert_eq!(
            s.try_attempt_interaction(0, Vec2::ZERO),
            Err(InteractionError::LevelComplete)
        );
    }

    #[test]
    fn test_programmer_errors() {
        let config = fixed_level(vec![Vec2::ZERO, Vec2::ZERO], 0);
        let mut s = session(config, 3);
        assert_eq!(
            s.try_attempt_interaction(7, Vec2::ZERO),
            Err(InteractionError::UnknownObject(7))
        );
        s.attempt_interaction(0, Vec2::ZERO);
        assert_eq!(
            s.try_attempt_interaction(0, Vec2::ZERO),
            Err(InteractionError::AlreadyRevealed(0))
        );
        // Errors leave state alone
        assert_eq!(s.state().revealed_count, 1);
    }

    #[test]
    #[should_panic(expected = "already flipped")]
    fn test_reflip_panics() {
        let config = fixed_level(vec![Vec2::ZERO, Vec2::ZERO], 0);
        let mut s = session(config, 3);
        s.attempt_interaction(0, Vec2::ZERO);
        s.attempt_interaction(0, Vec2::ZERO);
    }

    #[test]
    #[should_panic(expected = "no rock with id")]
    fn test_unknown_rock_panics() {
        let mut s = session(fixed_level(vec![Vec2::ZERO], 0), 3);
        s.attempt_interaction(1, Vec2::ZERO);
    }

    #[test]
    fn test_hazard_rate_converges() {
        const N: usize = 10_000;
        let config = fixed_level(vec![Vec2::ZERO; N], 20);
        let mut s = session(config, 2024);
        let mut hazards = 0usize;
        for id in 0..N {
            if let InteractionResult::Resolved(d) = s.attempt_interaction(id, Vec2::ZERO) {
                if d.kind() == DiscoveryKind::Hazard {
                    hazards += 1;
                }
            }
        }
        let rate = hazards as f64 / N as f64;
        // 5 standard deviations of a Bernoulli(0.2) mean over N trials
        let tolerance = 5.0 * (0.2f64 * 0.8 / N as f64).sqrt();
        assert!((rate - 0.2).abs() < tolerance, "hazard rate {rate}");
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = session(LevelConfig::classic(), 77);
        let mut b = session(LevelConfig::classic(), 77);
        assert_eq!(a.objects(), b.objects());

        b.reset(78);
        assert_ne!(a.objects(), b.objects());
        assert_eq!(b.seed(), 78);
    }

    #[test]
    fn test_reset_clears_progress() {
        let config = fixed_level(vec![Vec2::ZERO], 0);
        let mut s = session(config, 1);
        s.attempt_interaction(0, Vec2::ZERO);
        assert!(s.is_complete());

        s.reset(2);
        assert_eq!(s.phase(), SessionPhase::InProgress);
        assert_eq!(s.state().score, 0);
        assert_eq!(s.state().revealed_count, 0);
        assert!(!s.object(0).unwrap().revealed);
        assert!(s.drain_directives().is_empty());
    }

    #[test]
    fn test_walk_then_interact() {
        // Spawn is (500, 800); rock straight above at 700
        let config = fixed_level(vec![Vec2::new(500.0, 700.0)], 0);
        let mut s = session(config, 1);
        assert!(!s.interact(0).is_resolved());

        let up = MovementIntent {
            up: true,
            ..Default::default()
        };
        // 200 units/s for 0.25 s = 50 units
        s.tick(&up, 0.25);
        assert_eq!(s.player().position, Vec2::new(500.0, 750.0));
        assert!(s.interact(0).is_resolved());
    }

    #[test]
    fn test_resize_keeps_state() {
        let mut s = session(LevelConfig::classic(), 11);
        s.set_player_position(s.object(0).unwrap().position);
        s.interact(0);
        let before = s.state().clone();
        let flipped_pos = s.object(0).unwrap().position;
        let unflipped_frac = s.object(1).unwrap().position / 1000.0;

        s.resize(Viewport::new(500.0, 250.0));
        s.resize(Viewport::new(500.0, 250.0));

        assert_eq!(s.state(), &before);
        assert_eq!(s.object(0).unwrap().position, flipped_pos);
        let moved = s.object(1).unwrap().position;
        assert!((moved - unflipped_frac * Vec2::new(500.0, 250.0)).length() < 0.01);
        assert!(s.viewport().contains(s.player().position));
    }

    #[test]
    fn test_nearest_unrevealed() {
        let config = fixed_level(vec![Vec2::new(900.0, 100.0), Vec2::new(500.0, 700.0)], 0);
        let s = session(config, 1);
        let (id, d) = s.nearest_unrevealed().unwrap();
        assert_eq!(id, 1);
        assert!((d - 100.0).abs() < 0.001);
    }

    proptest! {
        #[test]
        fn prop_score_matches_collection(
            seed in any::<u64>(),
            hazard_percent in 0u8..=100,
            n in 1usize..30,
        ) {
            let config = fixed_level(vec![Vec2::ZERO; n], hazard_percent);
            let mut s = session(config, seed);
            let catalog = ContentCatalog::stream_catalog();

            for id in 0..n {
                let before = s.state().revealed_count;
                prop_assert!(s.attempt_interaction(id, Vec2::ZERO).is_resolved());
                prop_assert_eq!(s.state().revealed_count, before + 1);

                let state = s.state();
                let expected: i64 = state.collected_findings.len() as i64 * 10
                    + state
                        .collected_hazards
                        .iter()
                        .map(|h| i64::from(catalog.hazard(h).unwrap().penalty))
                        .sum::<i64>();
                prop_assert_eq!(state.score, expected);
                prop_assert_eq!(
                    state.revealed_count,
                    state.collected_findings.len() + state.collected_hazards.len()
                );
                prop_assert_eq!(
                    state.revealed_count,
                    s.objects().iter().filter(|o| o.revealed).count()
                );
                prop_assert_eq!(s.is_complete(), id + 1 == n);
            }
        }

        #[test]
        fn prop_too_far_is_a_no_op(
            seed in any::<u64>(),
            angle in 0.0f32..std::f32::consts::TAU,
            extra in 0.0f32..500.0,
            attempts in 1usize..10,
        ) {
            let rock = Vec2::new(400.0, 400.0);
            let config = fixed_level(vec![rock, rock], 50);
            let mut s = session(config, seed);
            let far = rock + Vec2::from_angle(angle) * (61.0 + extra);

            for _ in 0..attempts {
                let result = s.attempt_interaction(0, far);
                prop_assert!(!result.is_resolved());
            }
            prop_assert_eq!(s.state(), &SessionState::new(2));
            prop_assert!(!s.object(0).unwrap().revealed);
            prop_assert_eq!(s.phase(), SessionPhase::InProgress);
        }
    }
}
