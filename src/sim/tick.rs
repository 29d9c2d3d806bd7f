//! Fixed and presentation ticks
//!
//! Physics (ball motion and contacts) runs on a fixed timestep; animation
//! (paddle, easing, shake, camera) runs once per rendered frame.

use super::collision::{Aabb, Contact, ContactKind, circle_box_contact};
use super::game::Game;
use super::palette::PaletteKind;
use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Cursor X in world space, if the pointer is known
    pub cursor_x: Option<f32>,
    /// Respawn every block
    pub reset_blocks: bool,
    /// Switch palette (no-op when already active)
    pub palette: Option<PaletteKind>,
}

impl Game {
    /// Advance physics by one fixed timestep
    pub fn fixed_tick(&mut self, dt: f32) {
        self.time_ticks += 1;

        for index in 0..self.balls.len() {
            self.balls[index].advance(dt);

            let Some(contact) = self.detect_contact(index) else {
                continue;
            };

            // Position correction
            self.balls[index].pos += contact.normal * contact.penetration;

            // Only respond when moving into the surface
            if self.balls[index].vel.dot(contact.normal) < 0.0 {
                self.resolve_contact(index, contact);
            }
        }
    }

    /// Deepest contact for the ball at `index` against walls, standing
    /// blocks and the paddle
    pub fn detect_contact(&self, index: usize) -> Option<Contact> {
        let ball = self.balls.get(index)?;

        let walls = self
            .walls
            .iter()
            .map(|wall| (ContactKind::Wall, *wall));
        let blocks = self
            .blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.is_collidable())
            .map(|(i, block)| (ContactKind::Block(i), Aabb::new(block.origin, block.size)));
        let paddle = std::iter::once((
            ContactKind::Paddle,
            Aabb::new(self.paddle.pos, self.paddle.size),
        ));

        walls
            .chain(blocks)
            .chain(paddle)
            .filter_map(|(other, aabb)| {
                circle_box_contact(ball.pos, ball.radius, &aabb).map(|(normal, penetration)| {
                    Contact {
                        other,
                        normal,
                        penetration,
                    }
                })
            })
            .max_by(|a, b| a.penetration.total_cmp(&b.penetration))
    }

    /// Advance presentation by one rendered frame
    pub fn frame_tick(&mut self, input: &TickInput, dt: f32) {
        let dt = sanitize_dt(dt);
        if let Some(palette) = input.palette {
            if palette != self.palette {
                self.set_palette(palette);
            }
        }

        if input.reset_blocks {
            self.reset_blocks();
        }

        let toggles = &self.toggles;
        let tuning = &self.tuning;

        self.paddle
            .update(input.cursor_x, tuning.field.width, toggles, &tuning.paddle);

        for ball in &mut self.balls {
            ball.present(toggles, &tuning.ball);
        }

        for block in &mut self.blocks {
            block.update(dt, toggles);
        }

        let followed = self.balls.first().map(|ball| ball.pos);
        self.camera
            .update(dt, followed, toggles, tuning.camera.follow_amount);
    }
}

/// Negative or non-finite deltas become zero
#[inline]
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() { dt.max(0.0) } else { 0.0 }
}

/// Fixed-timestep accumulator
#[derive(Debug, Clone, Default)]
pub struct Stepper {
    accumulator: f32,
}

impl Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many fixed ticks as `frame_dt` covers (capped at
    /// `MAX_SUBSTEPS`), then one presentation tick. Returns the substep count.
    /// A non-finite `frame_dt` counts as zero.
    pub fn advance(&mut self, game: &mut Game, input: &TickInput, frame_dt: f32) -> u32 {
        let dt = sanitize_dt(frame_dt).min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            game.fixed_tick(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        game.frame_tick(input, dt);
        substeps
    }
}
