//! Ball-spawn provider for the plunger lane.
//!
//! A freshly created ball is placed at rest on the rod tip: centered
//! on the tip's lateral extent, a radius plus a small clearance in
//! front of the face, at the height the table surface reports for that
//! spot. It is never given spawn velocity — launching is the job of
//! the mover and the collision surface.

use crate::config::PlungerConfig;
use crate::state::PlungerSnapshot;
use crate::types::{constants, BallProperties, BallState, Vec3};

/// Height lookup into the table surface the plunger sits on.
///
/// Implemented by the surrounding table model; the plunger only needs
/// a point query at the spawn location.
pub trait SurfaceHeight {
    fn height_at(&self, x: f64, y: f64) -> f64;
}

/// A flat surface at a fixed height; sufficient for plunger lanes and
/// for tests.
pub struct FlatSurface {
    pub height: f64,
}

impl SurfaceHeight for FlatSurface {
    fn height_at(&self, _x: f64, _y: f64) -> f64 {
        self.height
    }
}

/// Compute the position and velocity of a ball spawned at the rod tip.
pub fn spawn_state(
    config: &PlungerConfig,
    rod: &PlungerSnapshot,
    props: &BallProperties,
    surface: &dyn SurfaceHeight,
) -> BallState {
    let x = config.tip_center_x();
    let y = rod.pos - props.radius - constants::SPAWN_CLEARANCE;
    let z = surface.height_at(x, y) + props.radius;
    BallState::at_rest(Vec3::new(x, y, z))
}

// =============================================================================
// Tests
// =============================================================================
