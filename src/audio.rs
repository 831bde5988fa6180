//! Sound cues for game events
//!
//! Procedurally generated sound effects - no external files needed!
//! The core only decides *what* to play and how loud; each cue carries a
//! one-oscillator recipe that a platform sink can synthesize.

use serde::Serialize;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SoundEffect {
    /// Player fired
    Shot,
    /// Enemy destroyed
    Explosion,
    /// Player took contact damage
    Damage,
    /// Wave cleared
    WaveClear,
    /// Next wave begins
    WaveStart,
    /// Game over
    GameOver,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// Single oscillator with an exponential pitch and gain ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tone {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Peak gain before volume scaling
    pub gain: f32,
    pub duration_s: f32,
}

impl SoundEffect {
    /// Cue for an event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired { .. } => Some(Self::Shot),
            GameEvent::EnemyKilled { .. } => Some(Self::Explosion),
            GameEvent::PlayerDamaged { .. } => Some(Self::Damage),
            GameEvent::WaveComplete { .. } => Some(Self::WaveClear),
            GameEvent::WaveStarted { .. } => Some(Self::WaveStart),
            GameEvent::GameOver { .. } => Some(Self::GameOver),
            GameEvent::Restarted { .. } => None,
        }
    }

    /// Synthesis recipe
    pub fn tone(self) -> Tone {
        match self {
            // Short falling blip
            Self::Shot => Tone {
                waveform: Waveform::Sine,
                start_hz: 800.0,
                end_hz: 400.0,
                gain: 0.2,
                duration_s: 0.1,
            },
            // Low rumble
            Self::Explosion => Tone {
                waveform: Waveform::Square,
                start_hz: 80.0,
                end_hz: 20.0,
                gain: 0.3,
                duration_s: 0.3,
            },
            Self::Damage => Tone {
                waveform: Waveform::Sawtooth,
                start_hz: 200.0,
                end_hz: 100.0,
                gain: 0.3,
                duration_s: 0.2,
            },
            Self::WaveClear => Tone {
                waveform: Waveform::Triangle,
                start_hz: 440.0,
                end_hz: 880.0,
                gain: 0.25,
                duration_s: 0.4,
            },
            Self::WaveStart => Tone {
                waveform: Waveform::Triangle,
                start_hz: 330.0,
                end_hz: 660.0,
                gain: 0.2,
                duration_s: 0.25,
            },
            Self::GameOver => Tone {
                waveform: Waveform::Sawtooth,
                start_hz: 300.0,
                end_hz: 60.0,
                gain: 0.35,
                duration_s: 1.0,
            },
        }
    }
}

/// Where cues go to be played
pub trait CueSink {
    fn play(&mut self, effect: SoundEffect, tone: Tone, volume: f32);
}

/// Volume and mute state applied to every cue
#[derive(Debug, Clone, Serialize)]
pub struct AudioMixer {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioMixer {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = clamp_volume(vol);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = clamp_volume(vol);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Forward a step's events to the sink; returns how many cues were played
    pub fn dispatch(&self, events: &[GameEvent], sink: &mut impl CueSink) -> usize {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return 0;
        }

        let mut played = 0;
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            sink.play(effect, effect.tone(), vol);
            played += 1;
        }
        played
    }
}

fn clamp_volume(vol: f32) -> f32 {
    if vol.is_nan() { 0.0 } else { vol.clamp(0.0, 1.0) }
}
