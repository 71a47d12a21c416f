//! Little Doug entry point
//!
//! The web build is driven from JavaScript through `little_doug::web`.
//! Natively this plays a level headlessly: the player walks to the nearest
//! rock, flips it, and repeats until the level is done.
//!
//! Usage: `little-doug [level.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use little_doug::{ContentCatalog, FieldJournal, LevelConfig, Session, Viewport};

    env_logger::init();
    log::info!("Little Doug (native) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Could not load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => LevelConfig::classic(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    let mut session = match Session::new(
        config,
        ContentCatalog::stream_catalog(),
        Viewport::default(),
        seed,
    ) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid level: {}", e);
            std::process::exit(1);
        }
    };

    let mut journal = FieldJournal::new();
    autopilot::play(&mut session, &mut journal);

    match journal.summary_text() {
        Some(text) => println!("{text}"),
        None => println!(
            "Gave up with {}/{} rocks flipped. {}",
            session.state().revealed_count,
            session.state().total_objects,
            journal.score_label()
        ),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: &str) -> Result<little_doug::LevelConfig, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(little_doug::LevelConfig::from_json(&json)?)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;
    use little_doug::consts::SIM_DT;
    use little_doug::presentation::LogPresenter;
    use little_doug::sim::MovementIntent;
    use little_doug::{FieldJournal, Session};

    /// Ten minutes of simulated walking
    const MAX_TICKS: u32 = 60 * 60 * 10;
    /// Stop steering on an axis once this close
    const DEADZONE: f32 = 4.0;

    pub fn steer(from: Vec2, to: Vec2) -> MovementIntent {
        let d = to - from;
        MovementIntent {
            left: d.x < -DEADZONE,
            right: d.x > DEADZONE,
            up: d.y < -DEADZONE,
            down: d.y > DEADZONE,
        }
    }

    pub fn play(session: &mut Session, journal: &mut FieldJournal) {
        let mut log_presenter = LogPresenter;
        let radius = session.config().proximity_radius;

        for _ in 0..MAX_TICKS {
            let Some((id, distance)) = session.nearest_unrevealed() else {
                break;
            };

            if distance < radius {
                session.interact(id);
                let directives = session.drain_directives();
                little_doug::presentation::dispatch(directives.clone(), &mut log_presenter);
                little_doug::presentation::dispatch(directives, journal);
                if session.is_complete() {
                    return;
                }
                continue;
            }

            let target = session.objects()[id].position;
            let intent = steer(session.player().position, target);
            if intent.is_idle() {
                log::warn!("Rock {} is out of reach", id);
                return;
            }
            session.tick(&intent, SIM_DT);
        }
        log::warn!("Autopilot ran out of time");
    }
}
