//! Juice Breakout - feedback engine for a Breakout-style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, blocks, paddle, camera feedback)
//! - `settings`: Juice feature toggles and palette selection
//! - `tuning`: Data-driven numeric parameters
//! - `session`: Owning context for the single running game

pub mod error;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use session::Session;
pub use settings::{JuiceToggles, Settings};
pub use tuning::Tuning;

use std::f32::consts::TAU;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz physics)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted by the stepper (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Magnitudes below this count as zero
    pub const EPSILON: f32 = 1e-6;

    /// Particles emitted by the ball on every bounce
    pub const BALL_BOUNCE_PARTICLES: u32 = 5;
    /// Thickness of the generated field walls
    pub const WALL_THICKNESS: f32 = 1.0;
}

/// Wrap a phase into [0, 2π)
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    let wrapped = phase.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Sign of `value`, falling back to the sign of `previous` when `value` is
/// (almost) zero. Both zero yields +1.
#[inline]
pub fn sign_or(value: f32, previous: f32) -> f32 {
    if value.abs() > consts::EPSILON {
        value.signum()
    } else if previous < 0.0 {
        -1.0
    } else {
        1.0
    }
}
