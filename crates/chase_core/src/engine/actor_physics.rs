//! Physics & Collision Resolver
//!
//! Shared by the player and the adversary. Per tick, strictly in order:
//! 1. `x += trunc(vx)`, resolve against platforms on X
//! 2. `vy = min(vy + gravity, max_fall)`, `y += trunc(vy)`, resolve on Y
//! 3. clamp `x` into the level
//!
//! Horizontal resolution always precedes vertical resolution; swapping them
//! changes how corners are clipped.

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::motion::SUPPORT_PROBE;
use crate::engine::types::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Kinematic state shared by every actor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ActorBody {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
    pub facing: Facing,
}

impl ActorBody {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { rect: Rect::new(x, y, w, h), ..Default::default() }
    }

    /// Put the body back at `(x, y)` at rest.
    pub fn reset_to(&mut self, x: i32, y: i32) {
        self.rect.x = x;
        self.rect.y = y;
        self.vx = 0.0;
        self.vy = 0.0;
        self.grounded = false;
    }

    pub fn center(&self) -> (f32, f32) {
        self.rect.center()
    }
}

/// Move on X by the truncated horizontal velocity.
#[inline]
pub fn integrate_horizontal(body: &mut ActorBody) {
    body.rect.x += body.vx as i32;
}

/// Clamp the leading edge against every overlapping platform and stop.
pub fn resolve_horizontal(body: &mut ActorBody, platforms: &[Rect]) {
    for platform in platforms {
        if body.rect.intersects(platform) {
            if body.vx > 0.0 {
                body.rect.set_right(platform.left());
            } else if body.vx < 0.0 {
                body.rect.set_left(platform.right());
            }
            body.vx = 0.0;
        }
    }
}

/// Apply gravity (clamped to `max_fall`) and move on Y.
#[inline]
pub fn integrate_vertical(body: &mut ActorBody, gravity: f32, max_fall: f32) {
    body.vy = (body.vy + gravity).min(max_fall);
    body.rect.y += body.vy as i32;
}

/// Snap to platform tops when falling and to platform bottoms when rising.
///
/// `grounded` is set on landing, or when the body already rests exactly on a
/// platform with non-negative `vy`.
pub fn resolve_vertical(body: &mut ActorBody, platforms: &[Rect]) {
    body.grounded = false;
    for platform in platforms {
        if body.rect.intersects(platform) {
            if body.vy > 0.0 {
                body.rect.set_bottom(platform.top());
                body.vy = 0.0;
                body.grounded = true;
            } else if body.vy < 0.0 {
                body.rect.set_top(platform.bottom());
                body.vy = 0.0;
            }
        }
    }
    if !body.grounded && body.vy >= 0.0 && is_supported(&body.rect, platforms) {
        body.grounded = true;
    }
}

/// Keep the body inside `[0, level_width - w]` horizontally.
pub fn clamp_to_world(body: &mut ActorBody, level_width: i32) {
    let max_x = (level_width - body.rect.w).max(0);
    body.rect.x = body.rect.x.clamp(0, max_x);
}

/// A platform directly under the rect (1 unit probe).
pub fn is_supported(rect: &Rect, platforms: &[Rect]) -> bool {
    let probe = rect.translated(0, SUPPORT_PROBE);
    platforms.iter().any(|p| probe.intersects(p))
}

/// Full physics step for one actor.
pub fn step_body(
    body: &mut ActorBody,
    platforms: &[Rect],
    gravity: f32,
    max_fall: f32,
    level_width: i32,
) {
    integrate_horizontal(body);
    resolve_horizontal(body, platforms);
    integrate_vertical(body, gravity, max_fall);
    resolve_vertical(body, platforms);
    clamp_to_world(body, level_width);

    log::trace!(
        "body step: rect=({}, {}) v=({:.2}, {:.2}) grounded={}",
        body.rect.x,
        body.rect.y,
        body.vx,
        body.vy,
        body.grounded
    );
}
