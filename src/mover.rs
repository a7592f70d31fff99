//! The plunger mover: advances the rod each fixed simulation tick.
//!
//! The rod is kinematically simple but has three distinct regimes:
//!
//! ```text
//!              pull_back()                 fire()
//!    Idle ────────────────► Retracting ────────────► Fired
//!     ▲                                                │
//!     └────────── settles at rest (small speed) ◄──────┘
//! ```
//!
//! - **Retracting**: position moves linearly toward the retracted
//!   bound at the pull rate.
//! - **Fired (manual)**: semi-implicit Euler under spring force
//!   `-k·(pos - rest)` minus viscous damping, until the rod returns
//!   to rest and its speed drops below tolerance.
//! - **Fired (auto-launch)**: constant solenoid acceleration from the
//!   fully retracted bound, independent of any player pull.
//!
//! Position is hard-clamped to the travel bounds every step: the
//! bounds are inelastic walls, any residual velocity component past a
//! bound is zeroed. Crossing a bound raises the matching limit-switch
//! event exactly once per crossing (edge-triggered).

use log::debug;

use crate::config::PlungerConfig;
use crate::state::PlungerDyn;
use crate::types::PlungerEvent;

/// Tolerance for detecting the rod sitting at a travel bound.
const LIMIT_EPS: f64 = 1e-9;

/// Tunable mechanical coefficients.
///
/// The spring stiffness itself comes from the table configuration;
/// these calibrate everything the table file does not specify (settle
/// behavior, solenoid strength, manual release scaling). Defaults are
/// tuned for a ~110 unit stroke at a 1 kHz tick.
#[derive(Debug, Clone)]
pub struct SpringParams {
    /// Viscous damping on rod speed (1/s).
    pub damping: f64,
    /// Initial forward speed at fire strength 1.0 (units/s).
    pub fire_speed: f64,
    /// Constant forward acceleration in auto-launch mode (units/s²).
    pub autofire_accel: f64,
    /// Displacement from rest below which the rod may settle (units).
    pub settle_distance: f64,
    /// Speed below which the rod may settle (units/s).
    pub settle_speed: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            damping: 40.0,
            fire_speed: 6000.0,
            autofire_accel: 450_000.0,
            settle_distance: 0.1,
            settle_speed: 1.0,
        }
    }
}

/// Mechanical regime of the rod.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Parked at rest, ready for the next pull.
    Idle,
    /// Moving toward the retracted bound at a fixed rate.
    Retracting { rate: f64 },
    /// Released; integrating forward under spring or solenoid force.
    Fired { auto: bool },
}

/// Outcome of one simulation tick.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Limit-switch events raised during this tick, in order.
    pub events: Vec<PlungerEvent>,
    /// Rod speed after the tick (units/s, negative is forward).
    pub speed: f64,
}

/// Integrator for the plunger rod. Sole writer of `PlungerDyn`.
pub struct PlungerMover {
    config: PlungerConfig,
    params: SpringParams,
    phase: Phase,
    pos: f64,
    prev_pos: f64,
    speed: f64,
    eos_latched: bool,
    bos_latched: bool,
}

impl PlungerMover {
    pub fn new(config: &PlungerConfig) -> Self {
        Self::with_params(config, SpringParams::default())
    }

    pub fn with_params(config: &PlungerConfig, params: SpringParams) -> Self {
        let rest = config.rest_pos();
        Self {
            // Latches reflect the starting position so construction
            // does not count as a crossing.
            eos_latched: rest <= config.frame_top + LIMIT_EPS,
            bos_latched: rest >= config.frame_bottom - LIMIT_EPS,
            config: config.clone(),
            params,
            phase: Phase::Idle,
            pos: rest,
            prev_pos: rest,
            speed: 0.0,
        }
    }

    /// Begin retracting the rod toward the maximum-pull position.
    ///
    /// `rate` is in units/s; the sign is ignored. Has no effect if the
    /// rod is already fully retracted.
    pub fn pull_back(&mut self, rate: f64) {
        if self.pos >= self.config.frame_bottom - LIMIT_EPS {
            return;
        }
        let rate = rate.abs();
        debug!("plunger pull_back at {} units/s from pos {}", rate, self.pos);
        self.phase = Phase::Retracting { rate };
    }

    /// Release the rod.
    ///
    /// With `Some(strength)` in `[0, 1]`, release starts from the
    /// current position with an initial forward speed proportional to
    /// the strength (a hand-pulled spring let go). With `None`, or when
    /// the table is configured for auto-launch, release always starts
    /// from the fully retracted bound under constant solenoid force.
    ///
    /// A fire while retracting cancels the pull immediately.
    pub fn fire(&mut self, strength: Option<f64>) {
        let auto = strength.is_none() || self.config.auto_launch;
        if auto {
            self.pos = self.config.frame_bottom;
            self.speed = 0.0;
        } else {
            let strength = strength.unwrap_or(1.0).clamp(0.0, 1.0);
            self.speed = -strength * self.params.fire_speed;
        }
        debug!(
            "plunger fire (auto={}) from pos {} speed {}",
            auto, self.pos, self.speed
        );
        self.phase = Phase::Fired { auto };
    }

    /// Advance the mechanical model by one fixed tick and publish the
    /// new position into the shared dynamic state.
    pub fn step(&mut self, dt: f64, dyn_state: &mut PlungerDyn) -> StepResult {
        if dt <= 0.0 {
            return StepResult {
                events: Vec::new(),
                speed: self.speed,
            };
        }

        self.prev_pos = self.pos;
        let top = self.config.frame_top;
        let bottom = self.config.frame_bottom;
        let rest = self.config.rest_pos();

        match self.phase {
            Phase::Idle => {
                self.speed = 0.0;
            }
            Phase::Retracting { rate } => {
                self.speed = rate;
                self.pos += rate * dt;
                if self.pos >= bottom {
                    self.pos = bottom;
                    self.speed = 0.0;
                }
            }
            Phase::Fired { auto } => {
                let drive = if auto {
                    -self.params.autofire_accel
                } else {
                    -self.config.spring_strength * (self.pos - rest)
                };
                let accel = drive - self.params.damping * self.speed;
                // Semi-implicit Euler: stable for the stiff spring at a
                // fixed small tick.
                self.speed += accel * dt;
                self.pos += self.speed * dt;

                // Inelastic walls at both ends of the stroke
                if self.pos <= top {
                    self.pos = top;
                    self.speed = 0.0;
                    if auto {
                        // The solenoid kick ends at the stop; the
                        // return stroke belongs to the spring.
                        self.phase = Phase::Fired { auto: false };
                    }
                }
                if self.pos >= bottom {
                    self.pos = bottom;
                    self.speed = self.speed.min(0.0);
                }

                if (self.pos - rest).abs() <= self.params.settle_distance
                    && self.speed.abs() <= self.params.settle_speed
                {
                    debug!("plunger settled at pos {}", self.pos);
                    self.phase = Phase::Idle;
                    self.speed = 0.0;
                }
            }
        }

        dyn_state.set_pos(self.pos, &self.config);

        let mut events = Vec::new();
        let at_eos = self.pos <= top + LIMIT_EPS;
        if at_eos && !self.eos_latched {
            events.push(PlungerEvent::LimitEos);
        }
        self.eos_latched = at_eos;

        let at_bos = self.pos >= bottom - LIMIT_EPS;
        if at_bos && !self.bos_latched {
            events.push(PlungerEvent::LimitBos);
        }
        self.bos_latched = at_bos;

        StepResult {
            events,
            speed: self.speed,
        }
    }

    /// Rod position after the most recent step.
    pub fn position(&self) -> f64 {
        self.pos
    }

    /// Rod position at the start of the most recent step. Together
    /// with `position()` this spans the tick's full displacement for
    /// the swept collision test.
    pub fn prev_position(&self) -> f64 {
        self.prev_pos
    }

    /// Rod speed (units/s, negative is forward).
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

// =============================================================================
// Tests
// =============================================================================
