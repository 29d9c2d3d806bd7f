//! Game orchestrator
//!
//! Owns every entity plus the settings they read, routes collision events
//! to the shake and score systems, and queues outbound effects for the host.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::block::Block;
use super::camera::{CameraRig, CameraShakeKind};
use super::collision::{Aabb, Contact, ContactKind, field_walls};
use super::effects::{Effect, EffectSink, ScoreDelta, dispatch};
use super::paddle::Paddle;
use super::palette::{Color, PaletteKind};
use crate::consts::WALL_THICKNESS;
use crate::settings::{JuiceToggles, Settings};
use crate::tuning::Tuning;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Game {
    pub(super) toggles: JuiceToggles,
    pub(super) tuning: Tuning,
    pub(super) palette: PaletteKind,
    /// Active balls (the first one is followed by the camera)
    pub balls: Vec<Ball>,
    /// Blocks in build order (row-major)
    pub blocks: Vec<Block>,
    pub paddle: Paddle,
    pub walls: Vec<Aabb>,
    pub wall_color: Color,
    pub background: Color,
    pub(super) camera: CameraRig,
    score: u64,
    rng: Pcg32,
    /// Effects queued since the last drain, in order of occurrence
    effects: Vec<Effect>,
    /// Fixed ticks simulated so far
    pub(super) time_ticks: u64,
    next_id: u32,
}

impl Game {
    /// Construct and build the field. Only `Session` creates games.
    pub(crate) fn new(settings: Settings, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut game = Self {
            toggles: settings.juice,
            palette: settings.palette,
            balls: Vec::new(),
            blocks: Vec::new(),
            paddle: Paddle::new(&tuning.paddle),
            walls: Vec::new(),
            wall_color: Color::WHITE,
            background: Color::BLACK,
            camera: CameraRig::new(&tuning.camera),
            score: 0,
            rng: Pcg32::seed_from_u64(tuning.seed),
            effects: Vec::new(),
            time_ticks: 0,
            next_id: 1,
            tuning,
        };
        game.build_field();
        game
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Lay out walls and the block grid, spawn the ball, apply the palette
    pub fn build_field(&mut self) {
        let field = self.tuning.field.clone();

        let center = Vec2::new(0.0, field.top - field.height / 2.0);
        self.walls = field_walls(center, field.width, field.height, WALL_THICKNESS);

        // Grid is centered horizontally and hangs two block heights below the top
        let offset = field.block_size + field.padding;
        let grid = Vec2::new(
            field.columns.saturating_sub(1) as f32,
            field.rows.saturating_sub(1) as f32,
        ) * offset;
        let start = Vec2::new(-grid.x / 2.0, field.top - field.block_size.y * 2.0);

        self.blocks.clear();
        for r in 0..field.rows {
            for c in 0..field.columns {
                let id = self.next_entity_id();
                let position = start + Vec2::new(c as f32, -(r as f32)) * offset;
                let mut block =
                    Block::new(id, position, field.block_size, r as usize, &self.tuning.block);
                block.ease_in_delay = self.blocks.len() as f32 * self.tuning.block.ease_in_stagger;
                block.respawn();
                self.blocks.push(block);
            }
        }

        self.balls.clear();
        self.add_ball();

        self.set_palette(self.palette);

        log::info!(
            "Built field: {}x{} blocks, {} ball(s)",
            field.columns,
            field.rows,
            self.balls.len()
        );
    }

    /// Spawn a ball at the configured spawn point
    pub fn add_ball(&mut self) -> u32 {
        let id = self.next_entity_id();
        let mut ball = Ball::new(id, self.tuning.ball.spawn, &self.tuning.ball);
        ball.color = self.tuning.colors.palette(self.palette).ball;
        self.balls.push(ball);
        id
    }

    /// Respond to `contact` for the ball at `ball_index`. Gameplay first
    /// (block destroy / paddle notify), then shake fan-out, then the bounce.
    pub fn resolve_contact(&mut self, ball_index: usize, contact: Contact) {
        let Some(ball) = self.balls.get(ball_index) else {
            log::warn!("contact for unknown ball index {ball_index}");
            return;
        };
        let impulse = ball.vel * self.tuning.block.ball_velocity_intensity;
        let impact = ball.direction();

        match contact.other {
            ContactKind::Block(index) => {
                let awarded = self.blocks.get_mut(index).and_then(|block| {
                    block.destroy(
                        impulse,
                        &self.toggles,
                        &self.tuning.block,
                        &mut self.rng,
                        &mut self.effects,
                    )
                });
                if let Some(value) = awarded {
                    self.award(value);
                }
            }
            ContactKind::Paddle => self.paddle.on_ball_hit(
                &self.toggles,
                &self.tuning.paddle,
                &mut self.rng,
                &mut self.effects,
            ),
            ContactKind::Ball | ContactKind::Wall => {}
        }

        self.on_ball_hit(impact);

        self.balls[ball_index].bounce(
            contact.normal,
            &self.toggles,
            &self.tuning.ball,
            &mut self.rng,
            &mut self.effects,
        );
    }

    /// Shake every block (hidden ones too, so a block respawned mid-shake
    /// carries on jiggling) and the camera, which recoils against the impact
    fn on_ball_hit(&mut self, direction: Vec2) {
        if self.toggles.shake_blocks {
            let params = self.tuning.block.shake;
            for block in &mut self.blocks {
                block.shake(params, &mut self.rng);
            }
        }

        if self.toggles.shake_camera {
            self.camera
                .shake(self.tuning.camera.shake, Some(-direction), &mut self.rng);
        }
    }

    fn award(&mut self, value: u32) {
        self.score += u64::from(value);
        self.effects.push(Effect::Score(ScoreDelta {
            delta: value,
            total: self.score,
        }));
    }

    /// Re-apply every entity color from the chosen palette
    pub fn set_palette(&mut self, kind: PaletteKind) {
        let colors = &self.tuning.colors;
        let palette = *colors.palette(kind);

        for ball in &mut self.balls {
            ball.color = palette.ball;
        }
        for block in &mut self.blocks {
            block.color = colors.block_color(kind, block.row);
        }
        self.wall_color = palette.walls;
        self.paddle.color = palette.paddle;
        self.background = palette.background;

        self.palette = kind;
        log::debug!("Applied palette {kind:?}");
    }

    /// Bring every block back to life
    pub fn reset_blocks(&mut self) {
        for block in &mut self.blocks {
            block.respawn();
        }
        log::debug!("Respawned {} blocks", self.blocks.len());
    }

    /// Replace the toggles. Flipping `music` queues an [`Effect::Music`].
    pub fn set_toggles(&mut self, toggles: JuiceToggles) {
        if toggles.music != self.toggles.music {
            self.effects.push(Effect::Music {
                playing: toggles.music,
            });
        }
        self.toggles = toggles;
    }

    /// Whether the host should be playing background music
    pub fn music_enabled(&self) -> bool {
        self.toggles.music
    }

    /// Swap the camera shake algorithm (drops any shake in progress)
    pub fn set_camera_shake(&mut self, kind: CameraShakeKind) {
        self.tuning.camera.kind = kind;
        self.camera.set_kind(kind, self.tuning.camera.look_anchor);
    }

    pub fn toggles(&self) -> &JuiceToggles {
        &self.toggles
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn palette(&self) -> PaletteKind {
        self.palette
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Effects queued since the last drain
    pub fn pending_effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Take all queued effects, oldest first
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Hand all queued effects to `sink`, oldest first
    pub fn dispatch_effects(&mut self, sink: &mut impl EffectSink) {
        for effect in self.drain_effects() {
            dispatch(&effect, sink);
        }
    }
}
