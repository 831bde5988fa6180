//! Wave Shooter headless driver
//!
//! Runs the simulation at a fixed frame time with the autopilot at the
//! controls, logs what happens and prints a JSON summary.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use wave_shooter::Tuning;
use wave_shooter::audio::{AudioMixer, CueSink, SoundEffect, Tone};
use wave_shooter::input::RawInput;
use wave_shooter::sim::{GameEvent, GameState, autopilot, step};
use wave_shooter::snapshot::Snapshot;

#[derive(Parser, Debug)]
#[command(name = "wave-shooter")]
#[command(about = "Run the wave shooter simulation headless with the autopilot playing")]
struct Args {
    /// Run seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,
    /// Milliseconds per frame
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f32,
    /// JSON tuning file (missing fields use defaults)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Override arena width
    #[arg(long)]
    width: Option<f32>,
    /// Override arena height
    #[arg(long)]
    height: Option<f32>,
    /// Keep playing after a game over instead of stopping
    #[arg(long, default_value_t = false)]
    restart_on_death: bool,
    /// Print a snapshot line every N frames
    #[arg(long)]
    snapshot_every: Option<u32>,
}

/// Counts cues instead of playing them
#[derive(Default)]
struct CueCounter {
    played: u32,
}

impl CueSink for CueCounter {
    fn play(&mut self, effect: SoundEffect, tone: Tone, volume: f32) {
        log::trace!("Cue {:?} {:.0}->{:.0} Hz at {:.2}", effect, tone.start_hz, tone.end_hz, volume);
        self.played += 1;
    }
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    seed: u64,
    frames: u32,
    sim_ms: f64,
    score: u64,
    best_score: u64,
    wave: u32,
    best_wave: u32,
    kills: u32,
    shots: u32,
    damage_taken: i32,
    deaths: u32,
    cues: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !(args.frame_ms.is_finite() && args.frame_ms > 0.0) {
        bail!("--frame-ms must be a positive number, got {}", args.frame_ms);
    }

    let tuning = load_tuning(&args)?;
    let seed = args.seed.unwrap_or_else(time_seed);
    log::info!(
        "Wave Shooter starting: seed {}, {} frames at {} ms, arena {}x{}",
        seed,
        args.frames,
        args.frame_ms,
        tuning.arena.width,
        tuning.arena.height
    );

    let summary = run(&args, seed, tuning)?;
    let json = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
    println!("{json}");
    Ok(())
}

fn load_tuning(args: &Args) -> Result<Tuning> {
    let mut tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    if let Some(width) = args.width {
        tuning.arena.width = width;
    }
    if let Some(height) = args.height {
        tuning.arena.height = height;
    }
    tuning.validate().context("invalid arena override")?;
    Ok(tuning)
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn run(args: &Args, seed: u64, tuning: Tuning) -> Result<Summary> {
    let mut state = GameState::with_tuning(seed, tuning);
    let mut device = RawInput::new();
    let mixer = AudioMixer::new();
    let mut cues = CueCounter::default();
    let mut summary = Summary {
        seed,
        ..Default::default()
    };

    for frame in 0..args.frames {
        // The autopilot drives the virtual sticks like a touch player would
        let bot = autopilot::idle_input(&state);
        device.set_movement(bot.movement.x, bot.movement.y);
        device.set_aim(bot.aim.x, bot.aim.y);
        if bot.restart && args.restart_on_death {
            device.restart_pressed = true;
        }

        let input = device.into_tick_input();
        let events = step(&mut state, &input, args.frame_ms);
        device.apply_events(&events);
        mixer.dispatch(&events, &mut cues);
        record(&mut summary, &events);

        summary.frames = frame + 1;
        summary.best_score = summary.best_score.max(state.score);
        summary.best_wave = summary.best_wave.max(state.wave.number);

        if let Some(every) = args.snapshot_every.filter(|n| *n > 0) {
            if frame % every == 0 {
                let line = Snapshot::capture(&state)
                    .to_json()
                    .context("failed to serialize snapshot")?;
                println!("{line}");
            }
        }

        if state.is_game_over() && !args.restart_on_death {
            break;
        }
    }

    summary.sim_ms = state.clock_ms;
    summary.score = state.score;
    summary.wave = state.wave.number;
    summary.cues = cues.played;
    log::info!(
        "Finished after {} frames: score {}, wave {}, {} deaths",
        summary.frames,
        summary.score,
        summary.wave,
        summary.deaths
    );
    Ok(summary)
}

fn record(summary: &mut Summary, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::ShotFired { .. } => summary.shots += 1,
            GameEvent::EnemyKilled { .. } => summary.kills += 1,
            GameEvent::PlayerDamaged { damage, .. } => summary.damage_taken += damage,
            GameEvent::GameOver { score, wave } => {
                summary.deaths += 1;
                log::info!("Died on wave {} with {} points", wave, score);
            }
            GameEvent::WaveComplete { .. }
            | GameEvent::WaveStarted { .. }
            | GameEvent::Restarted { .. } => {}
        }
    }
}
