//! Easing curves
//!
//! Each curve maps normalized time to normalized progress with `f(0) = 0`
//! and `f(1) = 1`; `Ease::evaluate` scales that onto `[start, end]`.

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

const BACK_OVERSHOOT: f32 = 1.70158;
const ELASTIC_PERIOD: f32 = 0.3;

/// Named easing curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ease {
    Linear,
    Spring,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InSine,
    OutSine,
    InOutSine,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InBounce,
    OutBounce,
    InOutBounce,
    InBack,
    #[default]
    OutBack,
    InOutBack,
    InElastic,
    OutElastic,
    InOutElastic,
}

impl Ease {
    pub const ALL: [Ease; 32] = [
        Ease::Linear,
        Ease::Spring,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::InQuint,
        Ease::OutQuint,
        Ease::InOutQuint,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
        Ease::InExpo,
        Ease::OutExpo,
        Ease::InOutExpo,
        Ease::InCirc,
        Ease::OutCirc,
        Ease::InOutCirc,
        Ease::InBounce,
        Ease::OutBounce,
        Ease::InOutBounce,
        Ease::InBack,
        Ease::OutBack,
        Ease::InOutBack,
        Ease::InElastic,
        Ease::OutElastic,
        Ease::InOutElastic,
    ];

    /// Interpolate from `start` to `end` at normalized time `t`.
    /// `t` is clamped to [0, 1].
    pub fn evaluate(self, start: f32, end: f32, t: f32) -> f32 {
        start + (end - start) * self.progress(t)
    }

    /// Normalized progress at time `t` in [0, 1]
    pub fn progress(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Spring => spring(t),
            Ease::InQuad => t * t,
            Ease::OutQuad => 1.0 - (1.0 - t).powi(2),
            Ease::InOutQuad => in_out(t, |x| x * x),
            Ease::InCubic => t.powi(3),
            Ease::OutCubic => 1.0 - (1.0 - t).powi(3),
            Ease::InOutCubic => in_out(t, |x| x.powi(3)),
            Ease::InQuart => t.powi(4),
            Ease::OutQuart => 1.0 - (1.0 - t).powi(4),
            Ease::InOutQuart => in_out(t, |x| x.powi(4)),
            Ease::InQuint => t.powi(5),
            Ease::OutQuint => 1.0 - (1.0 - t).powi(5),
            Ease::InOutQuint => in_out(t, |x| x.powi(5)),
            Ease::InSine => 1.0 - (t * FRAC_PI_2).cos(),
            Ease::OutSine => (t * FRAC_PI_2).sin(),
            Ease::InOutSine => -0.5 * ((PI * t).cos() - 1.0),
            Ease::InExpo => expo_in(t),
            Ease::OutExpo => 1.0 - expo_in(1.0 - t),
            Ease::InOutExpo => in_out(t, expo_in),
            Ease::InCirc => 1.0 - (1.0 - t * t).sqrt(),
            Ease::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Ease::InOutCirc => in_out(t, |x| 1.0 - (1.0 - x * x).sqrt()),
            Ease::InBounce => 1.0 - bounce_out(1.0 - t),
            Ease::OutBounce => bounce_out(t),
            Ease::InOutBounce => in_out(t, |x| 1.0 - bounce_out(1.0 - x)),
            Ease::InBack => back_in(t, BACK_OVERSHOOT),
            Ease::OutBack => 1.0 - back_in(1.0 - t, BACK_OVERSHOOT),
            Ease::InOutBack => in_out(t, |x| back_in(x, BACK_OVERSHOOT * 1.525)),
            Ease::InElastic => elastic_in(t, ELASTIC_PERIOD),
            Ease::OutElastic => 1.0 - elastic_in(1.0 - t, ELASTIC_PERIOD),
            Ease::InOutElastic => in_out(t, |x| elastic_in(x, ELASTIC_PERIOD * 1.5)),
        }
    }
}

/// Mirror an ease-in curve into a symmetric in-out curve
#[inline]
fn in_out(t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    if t < 0.5 {
        0.5 * ease_in(2.0 * t)
    } else {
        1.0 - 0.5 * ease_in(2.0 - 2.0 * t)
    }
}

fn spring(t: f32) -> f32 {
    let wave = (t * PI * (0.2 + 2.5 * t * t * t)).sin() * (1.0 - t).powf(2.2);
    (wave + t) * (1.0 + 1.2 * (1.0 - t))
}

fn expo_in(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else {
        2f32.powf(10.0 * (t - 1.0))
    }
}

fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

fn back_in(t: f32, overshoot: f32) -> f32 {
    t * t * ((overshoot + 1.0) * t - overshoot)
}

fn elastic_in(t: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let s = period / 4.0;
    let t = t - 1.0;
    -(2f32.powf(10.0 * t) * ((t - s) * TAU / period).sin())
}
