//! Wave progression
//!
//! `Playing -> WaveComplete -> Playing (next wave)`, with `GameOver` entered
//! only from combat and left only by a restart.

use super::state::{GameEvent, GamePhase, GameState, WaveState};
use crate::tuning::{Tuning, WaveTuning};

/// Enemy quota for a 1-based wave: `floor(base * growth^(wave - 1))`
pub fn quota_for_wave(wave: u32, tuning: &WaveTuning) -> u32 {
    let exponent = wave.saturating_sub(1) as i32;
    let quota = tuning.base_quota as f64 * (tuning.quota_growth as f64).powi(exponent);
    quota.floor().min(u32::MAX as f64) as u32
}

/// Max enemies per spawn attempt: `min(1 + floor(wave / 3), cap)`
pub fn spawn_cap_for_wave(wave: u32, tuning: &WaveTuning) -> u32 {
    (1 + wave / 3).min(tuning.max_simultaneous_spawn)
}

impl WaveState {
    /// State for the opening wave
    pub fn first(tuning: &Tuning) -> Self {
        Self::numbered(1, &tuning.waves)
    }

    /// Fresh counters for a given wave number
    pub fn numbered(number: u32, tuning: &WaveTuning) -> Self {
        Self {
            number,
            quota: quota_for_wave(number, tuning),
            spawned: 0,
            killed: 0,
            spawn_cap: spawn_cap_for_wave(number, tuning),
            phase: GamePhase::Playing,
            completed_at_ms: None,
            last_spawn_ms: 0.0,
        }
    }

    /// Quota met and nothing left alive
    pub fn is_cleared(&self, enemies_alive: usize) -> bool {
        self.killed >= self.quota && enemies_alive == 0
    }

    /// Time left before the next wave starts, while between waves
    pub fn next_wave_in_ms(&self, now_ms: f64, delay_ms: f64) -> Option<f64> {
        match (self.phase, self.completed_at_ms) {
            (GamePhase::WaveComplete, Some(at)) => Some((delay_ms - (now_ms - at)).max(0.0)),
            _ => None,
        }
    }
}

/// Advance the wave state machine
pub fn update_wave(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let now = state.clock_ms;

    if state.wave.phase == GamePhase::Playing && state.wave.is_cleared(state.enemies.len()) {
        state.wave.phase = GamePhase::WaveComplete;
        state.wave.completed_at_ms = Some(now);
        log::info!(
            "Wave {} complete ({} kills, score {})",
            state.wave.number,
            state.wave.killed,
            state.score
        );
        events.push(GameEvent::WaveComplete {
            wave: state.wave.number,
        });
    }

    if state.wave.phase == GamePhase::WaveComplete {
        let delay = state.tuning.waves.next_wave_delay_ms;
        let ready = state
            .wave
            .completed_at_ms
            .is_none_or(|at| now - at >= delay);
        if ready {
            start_next_wave(state, events);
        }
    }
}

fn start_next_wave(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let last_spawn_ms = state.wave.last_spawn_ms;
    let mut next = WaveState::numbered(state.wave.number + 1, &state.tuning.waves);
    next.last_spawn_ms = last_spawn_ms;
    state.wave = next;

    log::info!(
        "Wave {} starting: {} enemies, up to {} at once",
        state.wave.number,
        state.wave.quota,
        state.wave.spawn_cap
    );
    events.push(GameEvent::WaveStarted {
        wave: state.wave.number,
        quota: state.wave.quota,
    });
}
