//! Kill feedback: particle explosions and screen shake
//!
//! Purely cosmetic. Both keep animating after game over.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Explosion, GameEvent, GameState, Particle, ParticleKind, ScreenShake};
use crate::tuning::{ExplosionTuning, ShakeTuning};

/// Smoke drifts at a fraction of spark speed, lives longer and is bigger
const SMOKE_SPEED_FACTOR: f32 = 0.3;
const SMOKE_LIFE_FACTOR: f32 = 1.5;
const SMOKE_SIZE_FACTOR: f32 = 2.0;

/// Fallback spark color if the palette is empty
const SPARK_FALLBACK_COLOR: u32 = 0xff9900;

impl ScreenShake {
    /// Restart the pulse at full intensity
    pub fn start(&mut self, tuning: &ShakeTuning) {
        self.intensity = tuning.intensity;
        self.duration_ms = tuning.duration_ms;
        self.remaining_ms = tuning.duration_ms;
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }

    /// Intensity after linear decay
    pub fn current_intensity(&self) -> f32 {
        if !self.is_active() || self.duration_ms <= 0.0 {
            return 0.0;
        }
        self.intensity * (self.remaining_ms / self.duration_ms).min(1.0)
    }
}

/// Spawn sparks and smoke at `origin`; returns the explosion id
pub fn spawn_explosion(state: &mut GameState, origin: Vec2) -> Option<u32> {
    let tuning = state.tuning.explosion.clone();
    let mut particles = Vec::with_capacity(tuning.spark_count + tuning.smoke_count);

    for i in 0..tuning.spark_count {
        let angle = TAU * i as f32 / tuning.spark_count as f32;
        particles.push(spark(state, &tuning, origin, angle));
    }
    for _ in 0..tuning.smoke_count {
        let angle = state.rng.random_range(0.0..TAU);
        particles.push(smoke(&tuning, origin, angle));
    }

    if particles.is_empty() {
        return None;
    }
    let id = state.next_entity_id();
    state.explosions.push(Explosion {
        id,
        origin,
        particles,
    });
    Some(id)
}

fn spark(state: &mut GameState, tuning: &ExplosionTuning, origin: Vec2, angle: f32) -> Particle {
    let speed = tuning.particle_speed * state.rng.random_range(0.5..=1.0);
    let life = tuning.particle_lifetime * state.rng.random_range(0.8..=1.2);
    let size = tuning.particle_size * state.rng.random_range(0.5..=1.0);
    let color = if tuning.spark_colors.is_empty() {
        SPARK_FALLBACK_COLOR
    } else {
        tuning.spark_colors[state.rng.random_range(0..tuning.spark_colors.len())]
    };
    Particle {
        pos: origin,
        vel: Vec2::from_angle(angle) * speed,
        life,
        max_life: life,
        size,
        color,
        kind: ParticleKind::Spark,
    }
}

fn smoke(tuning: &ExplosionTuning, origin: Vec2, angle: f32) -> Particle {
    let life = tuning.particle_lifetime * SMOKE_LIFE_FACTOR;
    Particle {
        pos: origin,
        vel: Vec2::from_angle(angle) * tuning.particle_speed * SMOKE_SPEED_FACTOR,
        life,
        max_life: life,
        size: tuning.particle_size * SMOKE_SIZE_FACTOR,
        color: tuning.smoke_color,
        kind: ParticleKind::Smoke,
    }
}

/// Turn this step's kills into explosions and a shake pulse
pub fn emit_kill_feedback(state: &mut GameState, events: &[GameEvent]) {
    for event in events {
        if let GameEvent::EnemyKilled { pos, .. } = event {
            spawn_explosion(state, *pos);
            let shake = state.tuning.shake;
            state.shake.start(&shake);
        }
    }
}

/// Move and age particles, dropping dead particles and empty explosions
pub fn update_explosions(state: &mut GameState, dt: f32) {
    let lift = state.tuning.explosion.smoke_lift;
    let drag = state.tuning.explosion.smoke_drag;

    for explosion in &mut state.explosions {
        explosion.particles.retain_mut(|p| {
            p.pos += p.vel * dt;
            p.life -= dt;
            if p.kind == ParticleKind::Smoke {
                p.vel.y -= lift * dt;
                p.vel.x *= drag;
            }
            p.life > 0.0
        });
    }
    state.explosions.retain(|e| !e.particles.is_empty());
}

/// Decay the shake by `elapsed_ms` and pick a new jitter offset
pub fn update_shake(state: &mut GameState, elapsed_ms: f32) {
    if !state.shake.is_active() {
        state.shake.offset = Vec2::ZERO;
        return;
    }

    state.shake.remaining_ms -= elapsed_ms;
    if state.shake.remaining_ms <= 0.0 {
        state.shake.remaining_ms = 0.0;
        state.shake.offset = Vec2::ZERO;
        return;
    }

    let intensity = state.shake.current_intensity();
    let jitter_x: f32 = state.rng.random();
    let jitter_y: f32 = state.rng.random();
    state.shake.offset = Vec2::new(
        (jitter_x - 0.5) * intensity * 2.0,
        (jitter_y - 0.5) * intensity * 2.0,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EnemyKind, KillCause};

    fn kill_at(pos: Vec2) -> GameEvent {
        GameEvent::EnemyKilled {
            id: 1,
            kind: EnemyKind::Normal,
            pos,
            points: 100,
            cause: KillCause::Bullet,
        }
    }

    #[test]
    fn test_explosion_composition() {
        let mut state = GameState::new(11);
        let origin = Vec2::new(300.0, 200.0);
        spawn_explosion(&mut state, origin).expect("explosion");

        let explosion = &state.explosions[0];
        assert_eq!(explosion.origin, origin);
        let sparks: Vec<_> = explosion
            .particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Spark)
            .collect();
        let smoke: Vec<_> = explosion
            .particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Smoke)
            .collect();
        assert_eq!(sparks.len(), 8);
        assert_eq!(smoke.len(), 4);

        let palette = &state.tuning.explosion.spark_colors;
        for (i, p) in sparks.iter().enumerate() {
            let speed = p.vel.length();
            assert!((75.0 - 1e-3..=150.0 + 1e-3).contains(&speed));
            assert!((0.64 - 1e-5..=0.96 + 1e-5).contains(&p.life));
            assert_eq!(p.life, p.max_life);
            assert!((1.5..=3.0).contains(&p.size));
            assert!(palette.contains(&p.color));
            // Evenly fanned out
            let expected = Vec2::from_angle(TAU * i as f32 / 8.0);
            assert!(p.vel.normalize().dot(expected) > 0.999);
        }
        for p in smoke {
            assert!((p.vel.length() - 45.0).abs() < 1e-3);
            assert!((p.life - 1.2).abs() < 1e-6);
            assert_eq!(p.size, 6.0);
            assert_eq!(p.color, 0x666666);
            assert_eq!(p.pos, origin);
        }
    }

    #[test]
    fn test_particles_age_and_die() {
        let mut state = GameState::new(3);
        spawn_explosion(&mut state, Vec2::new(100.0, 100.0));

        update_explosions(&mut state, 0.5);
        assert_eq!(state.explosions[0].particles.len(), 12, "nothing dies before 0.64 s");

        // Every spark is gone by 0.96 s, smoke lasts until 1.2 s
        update_explosions(&mut state, 0.5);
        let remaining = &state.explosions[0].particles;
        assert_eq!(remaining.len(), 4);
        assert!(remaining.iter().all(|p| p.kind == ParticleKind::Smoke));

        update_explosions(&mut state, 0.25);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_smoke_rises_and_slows() {
        let mut state = GameState::new(3);
        state.explosions.push(Explosion {
            id: 1,
            origin: Vec2::ZERO,
            particles: vec![Particle {
                pos: Vec2::new(50.0, 50.0),
                vel: Vec2::new(40.0, 0.0),
                life: 1.0,
                max_life: 1.0,
                size: 6.0,
                color: 0x666666,
                kind: ParticleKind::Smoke,
            }],
        });
        update_explosions(&mut state, 0.1);

        let p = &state.explosions[0].particles[0];
        assert!((p.pos.x - 54.0).abs() < 1e-4);
        assert!((p.vel.y + 5.0).abs() < 1e-4);
        assert!((p.vel.x - 40.0 * 0.995).abs() < 1e-4);
        assert!((p.alpha() - 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_kill_feedback_starts_shake() {
        let mut state = GameState::new(5);
        let events = vec![
            GameEvent::PlayerDamaged { damage: 10, hp: 90 },
            kill_at(Vec2::new(10.0, 10.0)),
            kill_at(Vec2::new(20.0, 20.0)),
        ];
        emit_kill_feedback(&mut state, &events);

        assert_eq!(state.explosions.len(), 2);
        assert_eq!(state.explosions[1].origin, Vec2::new(20.0, 20.0));
        assert!(state.shake.is_active());
        assert_eq!(state.shake.current_intensity(), 6.0);
    }

    #[test]
    fn test_shake_decays_linearly() {
        let mut state = GameState::new(5);
        state.shake.start(&ShakeTuning::default());

        update_shake(&mut state, 75.0);
        assert_eq!(state.shake.remaining_ms, 75.0);
        assert!((state.shake.current_intensity() - 3.0).abs() < 1e-5);
        assert!(state.shake.offset.x.abs() <= 3.0 && state.shake.offset.y.abs() <= 3.0);

        update_shake(&mut state, 100.0);
        assert!(!state.shake.is_active());
        assert_eq!(state.shake.offset, Vec2::ZERO);
        assert_eq!(state.shake.current_intensity(), 0.0);
    }

    #[test]
    fn test_idle_shake_leaves_rng_alone() {
        let mut a = GameState::new(77);
        let b = GameState::new(77);
        update_shake(&mut a, 16.0);
        assert_eq!(a.rng, b.rng);
    }
}
