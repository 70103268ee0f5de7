//! Headless driving demo
//!
//! Drives the vehicle around the arena with a seeded autopilot and logs what
//! happens. No window is opened; the run is fully deterministic for a given
//! seed and configuration.
//!
//! Run with `--help` for the command line options.

use std::path::PathBuf;

use clap::Parser;
use drive_engine::foundation::logging;
use drive_engine::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Frames between progress log lines
const REPORT_INTERVAL: u32 = 120;

/// Errors that stop the demo
#[derive(thiserror::Error, Debug)]
pub enum DemoError {
    /// Loading, saving or validating the configuration failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Headless scripted drive around the arena
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "drive_demo", version, about)]
struct DemoOptions {
    /// Configuration file (`.toml` or `.ron`); defaults are used when omitted
    #[arg(value_name = "CONFIG")]
    config_path: Option<PathBuf>,

    /// Number of fixed steps to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Autopilot seed
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Write the effective configuration to this file before driving
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

/// Picks a new set of held controls every so often
struct Autopilot {
    rng: StdRng,
    intent: DriveIntent,
    frames_left: u32,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            intent: DriveIntent::FORWARD,
            frames_left: 0,
        }
    }

    /// Controls for the next frame; `blocked` forces a reverse-and-turn manoeuvre
    fn next_intent(&mut self, blocked: bool) -> DriveIntent {
        if blocked {
            let turn = if self.rng.gen_bool(0.5) {
                DriveIntent::TURN_LEFT
            } else {
                DriveIntent::TURN_RIGHT
            };
            self.intent = DriveIntent::BACKWARD | turn;
            self.frames_left = self.rng.gen_range(60..150);
        } else if self.frames_left == 0 {
            self.intent = match self.rng.gen_range(0..10) {
                0..=3 => DriveIntent::FORWARD,
                4 | 5 => DriveIntent::FORWARD | DriveIntent::TURN_LEFT,
                6 | 7 => DriveIntent::FORWARD | DriveIntent::TURN_RIGHT,
                8 => DriveIntent::BACKWARD,
                _ => DriveIntent::empty(),
            };
            self.frames_left = self.rng.gen_range(30..240);
        }

        self.frames_left = self.frames_left.saturating_sub(1);
        self.intent
    }

    /// Occasionally switch cameras
    fn wants_camera_toggle(&mut self) -> bool {
        self.rng.gen_bool(0.002)
    }
}

/// Totals gathered over a run
#[derive(Debug, Default)]
struct RunSummary {
    frames: u32,
    collisions: u32,
    distance: f32,
    top_speed: f32,
    camera_switches: u32,
}

fn run(options: &DemoOptions, config: SimulationConfig) -> Result<RunSummary, DemoError> {
    let delta_seconds = config.engine.fixed_delta_seconds;
    let mut scene = DrivingScene::new(config)?;
    let mut autopilot = Autopilot::new(options.seed);
    let mut summary = RunSummary::default();
    let mut blocked = false;
    let mut previous_position = scene.vehicle().position();

    log::info!("Running {} frames with seed {}", options.frames, options.seed);

    for frame in 1..=options.frames {
        if autopilot.wants_camera_toggle() {
            scene.toggle_camera();
            summary.camera_switches += 1;
        }

        let intent = autopilot.next_intent(blocked);
        let report = scene.step(delta_seconds, intent, CameraIntent::empty());

        blocked = report.blocked_by.is_some();
        if let Some(key) = report.blocked_by {
            summary.collisions += 1;
            log::debug!("Frame {}: blocked by {:?} at {:?}", frame, key, report.vehicle_position);
        }

        summary.frames = frame;
        summary.distance += (report.vehicle_position - previous_position).norm();
        summary.top_speed = summary.top_speed.max(report.velocity.abs());
        previous_position = report.vehicle_position;

        if frame % REPORT_INTERVAL == 0 {
            let camera = scene.active_camera();
            log::info!(
                "Frame {}: position {:.2?}, velocity {:.2}, {:?} camera at {:.2?}",
                frame,
                report.vehicle_position.as_slice(),
                report.velocity,
                scene.camera_mode(),
                camera.position().as_slice()
            );
        }
    }

    Ok(summary)
}

fn load_config(options: &DemoOptions) -> Result<SimulationConfig, DemoError> {
    match &options.config_path {
        Some(path) => Ok(SimulationConfig::load_from_file(path)?),
        None => {
            log::info!("No configuration file given, using defaults");
            Ok(SimulationConfig::default())
        }
    }
}

fn try_main() -> Result<(), DemoError> {
    let options = DemoOptions::parse();
    let config = load_config(&options)?;

    logging::init_with_filter(&config.engine.log_level);
    log::info!("Starting drive demo");

    if let Some(path) = &options.write_config {
        config.save_to_file(path)?;
        log::info!("Wrote configuration to {}", path.display());
    }

    let summary = run(&options, config)?;
    log::info!(
        "Drive finished: {} frames, {:.1} units travelled, top speed {:.2}, {} collisions, {} camera switches",
        summary.frames,
        summary.distance,
        summary.top_speed,
        summary.collisions,
        summary.camera_switches
    );
    Ok(())
}

fn main() -> Result<(), DemoError> {
    let result = try_main();

    match &result {
        Ok(()) => log::info!("Drive demo completed successfully"),
        Err(e) => log::error!("Drive demo failed: {:?}", e),
    }
    result
}
