//! Core types for the plunger simulation.
//!
//! All lengths are in table units (the playfield coordinate space the
//! table document uses), velocities in units per second, masses in
//! arbitrary ball-mass units.
//!
//! Coordinate system:
//! - X: across the table (positive to the right)
//! - Y: along the table (positive toward the player)
//! - Z: vertical (positive upward)
//!
//! The plunger travels along Y. **Forward — toward the playfield and
//! the ball — is the negative Y direction**: pulling the rod back
//! increases `pos`, firing drives it toward smaller `pos`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Vec3 - 3D Vector
// =============================================================================

/// A 3D vector used for positions and velocities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a unit vector in the same direction, or zero if magnitude is zero
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < 1e-10 {
            Self::ZERO
        } else {
            *self / mag
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Linear interpolation between two vectors
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        *self + (*other - *self) * t
    }
}

// Operator overloads for Vec3
impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Ball State
// =============================================================================

/// State of a ball at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub pos: Vec3,
    pub vel: Vec3,
}

impl BallState {
    pub fn new(pos: Vec3, vel: Vec3) -> Self {
        Self { pos, vel }
    }

    /// Ball at rest at a given position
    pub fn at_rest(pos: Vec3) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
        }
    }
}

impl Default for BallState {
    fn default() -> Self {
        Self::at_rest(Vec3::ZERO)
    }
}

/// Physical properties of a ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallProperties {
    pub mass: f64,
    pub radius: f64,
}

impl BallProperties {
    /// Standard 1 1/16" pinball: 25 table units radius at 50 units per inch.
    pub fn standard() -> Self {
        Self {
            mass: 1.0,
            radius: 25.0,
        }
    }
}

impl Default for BallProperties {
    fn default() -> Self {
        Self::standard()
    }
}

// =============================================================================
// Events
// =============================================================================

/// Notifications raised by a plunger session.
///
/// `LimitEos` / `LimitBos` are the limit-switch events: end of stroke
/// (rod fully forward) and beginning of stroke (rod fully retracted).
/// Both are edge-triggered — holding the rod at a limit emits the
/// event once, not once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlungerEvent {
    /// Raised exactly once when the session is set up.
    Init,
    /// Periodic, on the facade's configured schedule.
    Timer,
    /// Rod crossed the forward travel bound.
    LimitEos,
    /// Rod crossed the retracted travel bound.
    LimitBos,
}

// =============================================================================
// Constants
// =============================================================================

/// Constants shared across the simulation.
pub mod constants {
    /// Fixed physics tick used by the surrounding game loop (seconds).
    pub const DEFAULT_TICK: f64 = 0.001;

    /// Gap left between a spawned ball and the rod tip face (table units).
    pub const SPAWN_CLEARANCE: f64 = 0.01;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================
