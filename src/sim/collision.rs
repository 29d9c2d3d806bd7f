//! Circle-vs-box contact detection
//!
//! Only what the field needs: a round ball against axis-aligned walls,
//! blocks and the paddle. Contacts carry the surface normal (pointing from
//! the surface toward the ball) and the penetration depth.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Ball,
    /// Index into the orchestrator's block list
    Block(usize),
    Paddle,
    Wall,
}

/// A contact event from collision detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub other: ContactKind,
    /// Unit normal pointing toward the ball
    pub normal: Vec2,
    /// Overlap depth (for position correction)
    pub penetration: f32,
}

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size.abs() / 2.0,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }
}

/// Check a circle against a box. Returns `(normal, penetration)` on overlap.
pub fn circle_box_contact(center: Vec2, radius: f32, aabb: &Aabb) -> Option<(Vec2, f32)> {
    let closest = aabb.closest_point(center);
    let delta = center - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > 0.0 {
        if dist_sq >= radius * radius {
            return None;
        }
        let dist = dist_sq.sqrt();
        return Some((delta / dist, radius - dist));
    }

    // Center inside the box: push out along the shallowest axis
    let local = center - aabb.center;
    let overlap = aabb.half_extents - local.abs();
    if overlap.x < overlap.y {
        let sign = if local.x < 0.0 { -1.0 } else { 1.0 };
        Some((Vec2::new(sign, 0.0), overlap.x + radius))
    } else {
        let sign = if local.y < 0.0 { -1.0 } else { 1.0 };
        Some((Vec2::new(0.0, sign), overlap.y + radius))
    }
}

/// Wall boxes surrounding a field of the given inner size, centered on
/// `center`: left, right, top, bottom.
pub fn field_walls(center: Vec2, width: f32, height: f32, thickness: f32) -> Vec<Aabb> {
    let hw = width / 2.0 + thickness / 2.0;
    let hh = height / 2.0 + thickness / 2.0;
    let span_x = width + thickness * 2.0;
    let span_y = height + thickness * 2.0;
    vec![
        Aabb::new(center + Vec2::new(-hw, 0.0), Vec2::new(thickness, span_y)),
        Aabb::new(center + Vec2::new(hw, 0.0), Vec2::new(thickness, span_y)),
        Aabb::new(center + Vec2::new(0.0, hh), Vec2::new(span_x, thickness)),
        Aabb::new(center + Vec2::new(0.0, -hh), Vec2::new(span_x, thickness)),
    ]
}
