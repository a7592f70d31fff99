//! Shared dynamic state of the plunger rod.
//!
//! `PlungerDyn` is the single record shared across the
//! simulation/rendering boundary. The mover is its only writer; the
//! rendering collaborator, the collision surface, and the ball-spawn
//! provider read it. Everything runs inside the same per-tick ordering
//! (the write phase completes before any read phase begins), so no
//! locking is involved — readers on a different cadence take a
//! `snapshot()` by value instead of holding a reference across ticks.

use crate::config::PlungerConfig;

/// Mutable rod state: longitudinal position, animation frame, and a
/// dirty flag so the renderer re-samples geometry only when the
/// position actually changed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlungerDyn {
    /// Rod position along the travel axis. Always clamped to
    /// `[frame_top, frame_bottom]` by the mover.
    pub pos: f64,
    /// Animation frame index in `0..frame_count`.
    pub frame: u32,
    /// Set whenever `pos` changed since the renderer last consumed it.
    pub dirty: bool,
}

impl PlungerDyn {
    /// State at entity construction: rod parked at rest, frame 0.
    pub fn at_rest(config: &PlungerConfig) -> Self {
        Self {
            pos: config.rest_pos(),
            frame: 0,
            dirty: true,
        }
    }

    /// Write a new rod position, re-deriving the animation frame.
    ///
    /// Called only by the mover. The dirty flag is raised when either
    /// the position or the sampled frame changed.
    pub fn set_pos(&mut self, pos: f64, config: &PlungerConfig) {
        if (pos - self.pos).abs() > f64::EPSILON {
            self.dirty = true;
        }
        self.pos = pos;
        self.frame = frame_for_pos(pos, config);
    }

    /// Value copy for readers running on a different cadence.
    pub fn snapshot(&self) -> PlungerSnapshot {
        PlungerSnapshot {
            pos: self.pos,
            frame: self.frame,
        }
    }
}

/// Read-only copy of the dynamic state, safe to hold across ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlungerSnapshot {
    pub pos: f64,
    pub frame: u32,
}

/// Map a rod position onto an animation frame index.
///
/// Frame 0 is the rod at rest (fully forward), the last frame fully
/// retracted; positions in between sample linearly.
pub fn frame_for_pos(pos: f64, config: &PlungerConfig) -> u32 {
    let stroke = config.stroke();
    let t = ((pos - config.frame_top) / stroke).clamp(0.0, 1.0);
    let last = config.frame_count - 1;
    (t * last as f64).round() as u32
}

// =============================================================================
// Tests
// =============================================================================
