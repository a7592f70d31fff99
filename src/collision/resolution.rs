//! Contact response between the rod tip and a ball.
//!
//! ## Model Assumptions
//!
//! - **Kinematically driven rod**: the rod's motion is dictated by the
//!   mover; ball impact never displaces it. The response therefore
//!   treats the face as a moving wall of infinite mass.
//! - **Instantaneous contact**: the momentum transfer happens within
//!   the tick; elasticity captures the integrated compression of the
//!   real tip.
//!
//! The relative velocity along the travel axis reflects with the
//! configured elasticity; lateral velocity passes through untouched.
//! The ball's position is corrected to rest exactly at the contact
//! boundary, so no interpenetration survives resolution.

use crate::collision::detection::{ContactInfo, RodCollider, RodSweep};
use crate::types::{BallProperties, BallState};

/// Tunable contact coefficients.
#[derive(Debug, Clone)]
pub struct ContactParams {
    /// Coefficient of restitution between tip and ball.
    pub elasticity: f64,
}

impl Default for ContactParams {
    fn default() -> Self {
        Self { elasticity: 0.5 }
    }
}

/// Result of resolving one contact.
#[derive(Debug, Clone, Copy)]
pub struct ContactResult {
    /// Ball state after the response.
    pub ball: BallState,
    /// Impulse imparted to the ball along the travel axis
    /// (ball mass × velocity change).
    pub impulse: f64,
}

/// Resolver for rod-tip contacts.
pub struct ContactResolver {
    pub params: ContactParams,
}

impl Default for ContactResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactResolver {
    pub fn new() -> Self {
        Self {
            params: ContactParams::default(),
        }
    }

    pub fn with_params(params: ContactParams) -> Self {
        Self { params }
    }

    /// Apply the contact response for a detected contact.
    ///
    /// `sweep` and `dt` must be the same values the contact was
    /// detected with, so the face velocity matches.
    pub fn resolve(
        &self,
        contact: &ContactInfo,
        sweep: &RodSweep,
        ball: &BallState,
        props: &BallProperties,
        dt: f64,
    ) -> ContactResult {
        let face_speed = sweep.speed(dt);
        let face_y = sweep.face_at(contact.time, dt);

        let at_contact = RodCollider::advance_to_contact(ball, contact);

        // Relative approach speed along the travel axis; positive
        // means the gap is closing.
        let rel = at_contact.vel.y - face_speed;
        let new_vy = if rel > 0.0 {
            face_speed - self.params.elasticity * rel
        } else {
            // Already separating (overlap start case) — keep the
            // faster-moving of ball and face so the push-out sticks.
            at_contact.vel.y.min(face_speed)
        };

        // Rest the ball exactly on the contact boundary
        let mut pos = at_contact.pos;
        pos.y = face_y - props.radius;

        let mut vel = at_contact.vel;
        let impulse = props.mass * (new_vy - vel.y);
        vel.y = new_vy;

        ContactResult {
            ball: BallState { pos, vel },
            impulse,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
