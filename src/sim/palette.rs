//! Colors and palettes
//!
//! A palette assigns one color to each kind of visual entity. Switching the
//! active palette re-applies every color; nothing is patched incrementally.

use serde::{Deserialize, Serialize};

/// Linear RGBA color, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Hue, saturation, value, each in [0, 1]
    pub fn to_hsv(&self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let v = max;
        if max <= 0.0 {
            return (0.0, 0.0, 0.0);
        }
        let s = delta / max;
        if delta <= 0.0 {
            return (0.0, s, v);
        }

        let h = if self.r == max {
            (self.g - self.b) / delta
        } else if self.g == max {
            2.0 + (self.b - self.r) / delta
        } else {
            4.0 + (self.r - self.g) / delta
        };
        ((h / 6.0).rem_euclid(1.0), s, v)
    }

    /// Build an opaque color from hue, saturation, value in [0, 1]
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        if s <= 0.0 {
            return Color::rgb(v, v, v);
        }
        let h6 = h.rem_euclid(1.0) * 6.0;
        let sector = h6.floor();
        let f = h6 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match sector as u32 {
            0 => Color::rgb(v, t, p),
            1 => Color::rgb(q, v, p),
            2 => Color::rgb(p, v, t),
            3 => Color::rgb(p, q, v),
            4 => Color::rgb(t, p, v),
            _ => Color::rgb(v, p, q),
        }
    }

    /// Same saturation and value, hue rotated by `amount` (wrapping)
    pub fn shift_hue(&self, amount: f32) -> Self {
        let (h, s, v) = self.to_hsv();
        Color {
            a: self.a,
            ..Color::from_hsv((h + amount).rem_euclid(1.0), s, v)
        }
    }
}

/// Which palette is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaletteKind {
    /// Flat monochrome look
    #[default]
    NoColor,
    /// Colored entities, uniform block color
    Color,
    /// Colored entities, block hue rotated a step per row
    BlockHues,
}

/// One color per entity kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub ball: Color,
    pub paddle: Color,
    pub walls: Color,
    pub blocks: Color,
    pub background: Color,
}

impl Palette {
    pub fn monochrome() -> Self {
        Self {
            ball: Color::WHITE,
            paddle: Color::WHITE,
            walls: Color::WHITE,
            blocks: Color::WHITE,
            background: Color::BLACK,
        }
    }

    pub fn colored() -> Self {
        Self {
            ball: Color::rgb(1.0, 0.92, 0.35),
            paddle: Color::rgb(0.35, 0.85, 1.0),
            walls: Color::rgb(0.55, 0.45, 0.85),
            blocks: Color::rgb(0.95, 0.3, 0.35),
            background: Color::rgb(0.1, 0.08, 0.18),
        }
    }
}

/// The configured palettes plus the per-row hue step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSet {
    pub no_color: Palette,
    pub colored: Palette,
    /// Hue increment per block row in `BlockHues` mode
    pub hue_step: f32,
}

impl Default for PaletteSet {
    fn default() -> Self {
        Self {
            no_color: Palette::monochrome(),
            colored: Palette::colored(),
            hue_step: 0.05,
        }
    }
}

impl PaletteSet {
    /// Base palette for a mode (`BlockHues` shares the colored palette)
    pub fn palette(&self, kind: PaletteKind) -> &Palette {
        match kind {
            PaletteKind::NoColor => &self.no_color,
            PaletteKind::Color | PaletteKind::BlockHues => &self.colored,
        }
    }

    /// Color of a block in the given row
    pub fn block_color(&self, kind: PaletteKind, row: usize) -> Color {
        let base = self.palette(kind).blocks;
        match kind {
            // Hue shifts at the start of every row, the first one included
            PaletteKind::BlockHues => base.shift_hue(self.hue_step * (row + 1) as f32),
            _ => base,
        }
    }
}
