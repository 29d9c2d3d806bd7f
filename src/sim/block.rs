//! Breakable blocks
//!
//! A block zooms into place when (re)spawned, jiggles whenever the ball hits
//! anything, and bursts into debris when struck.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::easing::Ease;
use super::effects::{Effect, EffectSource, ParticleBurst, SoundCue, cue_pitch};
use super::palette::Color;
use super::shake::{Oscillator, ShakeParams};
use crate::settings::JuiceToggles;
use crate::tuning::BlockTuning;

/// Lifecycle of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockState {
    /// Built but never spawned
    Inactive,
    /// Visible, scale animating from 0 to 1
    EasingIn,
    /// Visible at full scale
    Idle,
    /// Hidden and not collidable
    Destroyed,
}

/// A block entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    /// Spawn position; shake offsets are relative to this
    pub origin: Vec2,
    pub size: Vec2,
    /// Score awarded on destruction
    pub value: u32,
    /// Grid row (for per-row coloring)
    pub row: usize,
    pub color: Color,
    pub state: BlockState,
    pub ease: Ease,
    pub ease_in_duration: f32,
    pub ease_in_delay: f32,
    /// Counts up from `-ease_in_delay`
    ease_in_time: f32,
    /// Uniform visual scale
    pub scale: f32,
    shake: Oscillator,
}

impl Block {
    pub fn new(id: u32, origin: Vec2, size: Vec2, row: usize, tuning: &BlockTuning) -> Self {
        Self {
            id,
            origin,
            size,
            value: tuning.value,
            row,
            color: Color::WHITE,
            state: BlockState::Inactive,
            ease: tuning.ease,
            ease_in_duration: tuning.ease_in_duration,
            ease_in_delay: 0.0,
            ease_in_time: 0.0,
            scale: 1.0,
            shake: Oscillator::default(),
        }
    }

    /// Drawn this frame
    pub fn is_visible(&self) -> bool {
        matches!(self.state, BlockState::EasingIn | BlockState::Idle)
    }

    /// Participates in collision
    pub fn is_collidable(&self) -> bool {
        self.is_visible()
    }

    /// Rendered position: origin plus the current shake offset
    pub fn position(&self) -> Vec2 {
        self.origin + self.shake.offset()
    }

    pub fn shake_state(&self) -> &Oscillator {
        &self.shake
    }

    /// Bring the block back and restart its ease-in
    pub fn respawn(&mut self) {
        self.state = BlockState::EasingIn;
        self.ease_in_time = -self.ease_in_delay;
        self.scale = self.ease.evaluate(0.0, 1.0, 0.0);
    }

    /// Presentation tick: ease-in, then shake
    pub fn update(&mut self, dt: f32, toggles: &JuiceToggles) {
        self.update_easing(dt, toggles);
        self.shake.advance(dt);
    }

    fn update_easing(&mut self, dt: f32, toggles: &JuiceToggles) {
        if self.state != BlockState::EasingIn {
            return;
        }

        if !toggles.ease_in_blocks || self.ease_in_duration <= 0.0 {
            self.finish_easing();
            return;
        }

        self.ease_in_time += dt;
        if self.ease_in_time >= self.ease_in_duration {
            self.finish_easing();
            return;
        }

        let t = (self.ease_in_time / self.ease_in_duration).clamp(0.0, 1.0);
        self.scale = self.ease.evaluate(0.0, 1.0, t);
    }

    fn finish_easing(&mut self) {
        self.scale = 1.0;
        self.state = BlockState::Idle;
    }

    /// Struck by the ball. `impulse` biases the debris velocity. Returns
    /// the score to award, or `None` if the block was not standing.
    pub fn destroy<R: Rng + ?Sized>(
        &mut self,
        impulse: Vec2,
        toggles: &JuiceToggles,
        tuning: &BlockTuning,
        rng: &mut R,
        effects: &mut Vec<Effect>,
    ) -> Option<u32> {
        if !self.is_visible() {
            return None;
        }
        self.state = BlockState::Destroyed;

        if toggles.block_particles {
            let count = if tuning.max_particles > tuning.min_particles {
                rng.random_range(tuning.min_particles..tuning.max_particles)
            } else {
                tuning.min_particles
            };
            effects.push(Effect::Particles(ParticleBurst {
                source: EffectSource::Block,
                position: self.position(),
                count,
                color: Some(self.color),
                velocity_bias: toggles.block_particles_velocity.then_some(impulse),
                collide: toggles.block_particles_collide,
            }));
        }

        if toggles.block_sfx {
            effects.push(Effect::Sound(SoundCue {
                source: EffectSource::Block,
                pitch: cue_pitch(toggles.randomize_pitch, tuning.pitch_range, rng),
            }));
        }

        Some(self.value)
    }

    /// Restart the jiggle, replacing any shake in progress
    pub fn shake<R: Rng + ?Sized>(&mut self, params: ShakeParams, rng: &mut R) {
        self.shake.start(params, Some(Vec2::ONE), rng);
    }
}
