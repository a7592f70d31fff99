//! Swept collision detection for the moving rod tip.
//!
//! The rod tip face is a line segment spanning x ∈ [x, x2] at
//! y = rod position, facing the ball along -Y. During a fire the rod
//! can cross several ball radii in a single tick, so an endpoint-only
//! overlap test would tunnel; instead the test covers the tick's full
//! displacement of both bodies and reports the earliest contact time.

use crate::config::PlungerConfig;
use crate::types::{constants, BallProperties, BallState, Vec3};

/// The rod tip's displacement over the current tick, derived from the
/// mover's previous and current positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RodSweep {
    /// Tip face position at the start of the tick.
    pub start: f64,
    /// Tip face position at the end of the tick.
    pub end: f64,
}

impl RodSweep {
    /// Face position at an intermediate time within the tick.
    pub fn face_at(&self, t: f64, dt: f64) -> f64 {
        if dt <= 0.0 {
            self.end
        } else {
            self.start + (self.end - self.start) * (t / dt)
        }
    }

    /// Face velocity over the tick (units/s, negative is forward).
    pub fn speed(&self, dt: f64) -> f64 {
        if dt <= 0.0 {
            0.0
        } else {
            (self.end - self.start) / dt
        }
    }
}

/// Detailed contact information for one tick.
#[derive(Debug, Clone, Copy)]
pub struct ContactInfo {
    /// Time of contact within the tick, in `[0, dt]`.
    pub time: f64,
    /// Contact point on the tip face.
    pub point: Vec3,
    /// Overlap depth when the tick started already interpenetrating.
    pub penetration: f64,
}

/// Collision surface for the rod tip.
pub struct RodCollider {
    /// Left extent of the tip face.
    pub x1: f64,
    /// Right extent of the tip face.
    pub x2: f64,
}

impl RodCollider {
    pub fn new(config: &PlungerConfig) -> Self {
        Self {
            x1: config.x,
            x2: config.x2,
        }
    }

    /// Find the earliest contact between the sweeping tip face and a
    /// ball's linear trajectory over the coming tick.
    ///
    /// Returns `None` when the bodies separate, the ball misses the
    /// face laterally, or contact falls outside the tick. A ball
    /// already overlapping the face at tick start reports an immediate
    /// contact with its penetration depth, so the resolver can push it
    /// out instead of letting it stick inside the rod.
    pub fn detect(
        &self,
        sweep: &RodSweep,
        ball: &BallState,
        props: &BallProperties,
        dt: f64,
    ) -> Option<ContactInfo> {
        if dt <= 0.0 {
            return None;
        }

        let radius = props.radius;
        let rod_speed = sweep.speed(dt);

        // Gap between the face and the ball's near edge; the ball sits
        // in front of the face at smaller Y, so its near edge is
        // ball.y + radius.
        let gap0 = sweep.start - (ball.pos.y + radius);

        if gap0 < -constants::EPSILON {
            // Already interpenetrating at tick start
            let x = ball.pos.x;
            if x < self.x1 || x > self.x2 {
                return None;
            }
            return Some(ContactInfo {
                time: 0.0,
                point: Vec3::new(x, sweep.start, ball.pos.z),
                penetration: -gap0,
            });
        }

        // Gap rate: positive means opening, negative closing.
        let closing = ball.vel.y - rod_speed;
        if closing <= constants::EPSILON {
            return None; // Separating or parallel
        }

        let t_hit = gap0 / closing;
        if t_hit > dt {
            return None;
        }

        // Lateral check at the moment of contact
        let hit_x = ball.pos.x + ball.vel.x * t_hit;
        if hit_x < self.x1 || hit_x > self.x2 {
            return None;
        }

        Some(ContactInfo {
            time: t_hit,
            point: Vec3::new(hit_x, sweep.face_at(t_hit, dt), ball.pos.z),
            penetration: 0.0,
        })
    }

    /// Advance a ball along its trajectory to the contact time.
    pub fn advance_to_contact(ball: &BallState, contact: &ContactInfo) -> BallState {
        BallState {
            pos: ball.pos + ball.vel * contact.time,
            vel: ball.vel,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: f64 = 0.001;

    fn collider() -> RodCollider {
        RodCollider { x1: 0.0, x2: 25.0 }
    }

    fn props() -> BallProperties {
        BallProperties {
            mass: 1.0,
            radius: 25.0,
        }
    }

    #[test]
    fn test_firing_rod_strikes_resting_ball() {
        let collider = collider();
        let props = props();

        // Rod sweeps forward 50 units in one tick; ball rests with a
        // small clearance in front of the starting face.
        let sweep = RodSweep {
            start: 2113.0,
            end: 2063.0,
        };
        let ball = BallState::at_rest(Vec3::new(12.5, 2113.0 - props.radius - 0.01, 25.0));

        let contact = collider.detect(&sweep, &ball, &props, TICK);
        assert!(contact.is_some(), "sweeping rod must reach the ball");
        let info = contact.unwrap();
        assert!(info.time > 0.0 && info.time <= TICK);
        assert!(
            info.time < TICK * 0.01,
            "contact should occur almost immediately, got t={}",
            info.time
        );
    }

    #[test]
    fn test_no_tunneling_at_high_speed() {
        let collider = collider();
        let props = props();

        // The rod crosses the ball's entire diameter in one tick.
        let sweep = RodSweep {
            start: 2113.0,
            end: 2000.0,
        };
        let ball = BallState::at_rest(Vec3::new(12.5, 2050.0, 25.0));

        let contact = collider.detect(&sweep, &ball, &props, TICK);
        assert!(
            contact.is_some(),
            "swept test must catch a full-diameter crossing"
        );
    }

    #[test]
    fn test_ball_falling_onto_stationary_rod() {
        let collider = collider();
        let props = props();

        let sweep = RodSweep {
            start: 2100.0,
            end: 2100.0,
        };
        // Ball above the face, moving toward it at 1000 units/s
        let ball = BallState::new(
            Vec3::new(10.0, 2100.0 - props.radius - 0.5, 25.0),
            Vec3::new(0.0, 1000.0, 0.0),
        );

        let contact = collider.detect(&sweep, &ball, &props, TICK);
        assert!(contact.is_some());
        let info = contact.unwrap();
        let expected = 0.5 / 1000.0;
        assert!(
            (info.time - expected).abs() < 1e-9,
            "time should be ~{}, got {}",
            expected,
            info.time
        );
    }

    #[test]
    fn test_separating_ball_reports_no_contact() {
        let collider = collider();
        let props = props();

        let sweep = RodSweep {
            start: 2100.0,
            end: 2100.0,
        };
        // Ball moving away from the face
        let ball = BallState::new(
            Vec3::new(10.0, 2050.0, 25.0),
            Vec3::new(0.0, -500.0, 0.0),
        );

        assert!(collider.detect(&sweep, &ball, &props, TICK).is_none());
    }

    #[test]
    fn test_lateral_miss() {
        let collider = collider();
        let props = props();

        let sweep = RodSweep {
            start: 2113.0,
            end: 2063.0,
        };
        // Ball well outside the tip extents
        let ball = BallState::at_rest(Vec3::new(200.0, 2113.0 - props.radius - 0.01, 25.0));

        assert!(
            collider.detect(&sweep, &ball, &props, TICK).is_none(),
            "ball outside [x, x2] must not collide"
        );
    }

    #[test]
    fn test_contact_outside_tick_window() {
        let collider = collider();
        let props = props();

        let sweep = RodSweep {
            start: 2100.0,
            end: 2100.0,
        };
        // Slow approach: contact would occur well after this tick
        let ball = BallState::new(
            Vec3::new(10.0, 2100.0 - props.radius - 10.0, 25.0),
            Vec3::new(0.0, 100.0, 0.0),
        );

        assert!(collider.detect(&sweep, &ball, &props, TICK).is_none());
    }

    #[test]
    fn test_overlap_reports_immediate_contact() {
        let collider = collider();
        let props = props();

        let sweep = RodSweep {
            start: 2100.0,
            end: 2100.0,
        };
        // Ball already 5 units into the face
        let ball = BallState::at_rest(Vec3::new(10.0, 2100.0 - props.radius + 5.0, 25.0));

        let contact = collider.detect(&sweep, &ball, &props, TICK);
        assert!(contact.is_some(), "overlap must resolve, not report a miss");
        let info = contact.unwrap();
        assert!((info.time).abs() < 1e-15);
        assert!(
            (info.penetration - 5.0).abs() < 1e-9,
            "penetration should be 5, got {}",
            info.penetration
        );
    }

    #[test]
    fn test_zero_length_tick() {
        let collider = collider();
        let props = props();
        let sweep = RodSweep {
            start: 2100.0,
            end: 2100.0,
        };
        let ball = BallState::at_rest(Vec3::new(10.0, 2000.0, 25.0));
        assert!(collider.detect(&sweep, &ball, &props, 0.0).is_none());
    }

    #[test]
    fn test_advance_to_contact() {
        let ball = BallState::new(
            Vec3::new(0.0, 2000.0, 25.0),
            Vec3::new(100.0, 500.0, 0.0),
        );
        let contact = ContactInfo {
            time: 0.0005,
            point: Vec3::ZERO,
            penetration: 0.0,
        };
        let advanced = RodCollider::advance_to_contact(&ball, &contact);
        assert!((advanced.pos.x - 0.05).abs() < 1e-12);
        assert!((advanced.pos.y - 2000.25).abs() < 1e-12);
        assert_eq!(advanced.vel, ball.vel);
    }
}
