//! The plunger entity and its session lifecycle.
//!
//! A plunger exists in two phases, modeled as two types rather than
//! optional fields:
//!
//! - [`Plunger`] — configured: immutable table parameters plus the
//!   shared dynamic state, as loaded from storage.
//! - [`ActivePlunger`] — active: adds the session-scoped mover,
//!   collision surface, and control facade, created by `setup()` for
//!   one player/table pairing.
//!
//! Session operations (pull, fire, step, collide) exist only on
//! `ActivePlunger`, so invoking them before setup is a compile error
//! instead of a runtime fault. Dropping the active plunger discards
//! all in-flight motion state.

use crate::collision::{ContactParams, ContactResolver, ContactResult, RodCollider};
use crate::config::{PlungerConfig, StorageError, TableStorage};
use crate::facade::{ControlFacade, EventHandler};
use crate::mover::{PlungerMover, SpringParams};
use crate::spawn::{spawn_state, SurfaceHeight};
use crate::state::{PlungerDyn, PlungerSnapshot};
use crate::types::{BallProperties, BallState, PlungerEvent};

/// The up-to-three named parts the rendering collaborator draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlungerPart {
    Rod,
    Spring,
    Flat,
}

pub const PLUNGER_PARTS: [PlungerPart; 3] =
    [PlungerPart::Rod, PlungerPart::Spring, PlungerPart::Flat];

/// Rendering collaborator boundary: receives, per part, the animation
/// frame to sample plus the material and texture references to pair
/// with the generated mesh.
pub trait MeshSink {
    fn update_part(&mut self, part: PlungerPart, frame: u32, material: &str, texture: &str);
}

/// Session tunables, forwarded to the mover and the contact resolver.
#[derive(Debug, Clone, Default)]
pub struct SessionParams {
    pub spring: SpringParams,
    pub contact: ContactParams,
    /// Period of the facade's `Timer` notification, if any.
    pub timer_interval: Option<f64>,
}

/// A configured plunger: table parameters plus dynamic state.
pub struct Plunger {
    config: PlungerConfig,
    state: PlungerDyn,
}

impl Plunger {
    /// Build from an already-validated configuration.
    pub fn new(config: PlungerConfig) -> Result<Self, StorageError> {
        config.validate()?;
        let state = PlungerDyn::at_rest(&config);
        Ok(Self { config, state })
    }

    /// Load the named plunger item from table storage.
    pub fn from_storage(storage: &TableStorage, name: &str) -> Result<Self, StorageError> {
        Self::new(storage.load_plunger(name)?)
    }

    pub fn config(&self) -> &PlungerConfig {
        &self.config
    }

    pub fn snapshot(&self) -> PlungerSnapshot {
        self.state.snapshot()
    }

    /// Activate the plunger for a game session with default tunables.
    pub fn setup(self) -> ActivePlunger {
        self.setup_with(SessionParams::default())
    }

    /// Activate with explicit session tunables.
    pub fn setup_with(self, params: SessionParams) -> ActivePlunger {
        let mover = PlungerMover::with_params(&self.config, params.spring);
        let collider = RodCollider::new(&self.config);
        let resolver = ContactResolver::with_params(params.contact);
        let mut facade = match params.timer_interval {
            Some(interval) => ControlFacade::with_timer(interval),
            None => ControlFacade::new(),
        };
        // Delivered on the first dispatch, once subscribers attached
        facade.queue(PlungerEvent::Init);

        ActivePlunger {
            config: self.config,
            state: self.state,
            mover,
            collider,
            resolver,
            facade,
        }
    }
}

/// An active plunger session: the externally reachable control
/// surface plus the physics objects behind it.
pub struct ActivePlunger {
    config: PlungerConfig,
    state: PlungerDyn,
    mover: PlungerMover,
    collider: RodCollider,
    resolver: ContactResolver,
    facade: ControlFacade,
}

impl ActivePlunger {
    /// Begin pull-back at the table's configured pull speed.
    pub fn pull_back(&mut self) {
        let rate = self.config.pull_speed;
        self.mover.pull_back(rate);
    }

    /// Begin pull-back at an explicit rate (units/s).
    pub fn pull_back_at(&mut self, rate: f64) {
        self.mover.pull_back(rate);
    }

    /// Release from full travel (auto-launch semantics).
    pub fn fire(&mut self) {
        self.mover.fire(None);
    }

    /// Release from the current position with a strength in `[0, 1]`.
    pub fn fire_with_strength(&mut self, strength: f64) {
        self.mover.fire(Some(strength));
    }

    /// Advance one fixed simulation tick: integrate the rod, then
    /// deliver any notifications raised along the way.
    pub fn step(&mut self, dt: f64) {
        let result = self.mover.step(dt, &mut self.state);
        for event in result.events {
            self.facade.queue(event);
        }
        self.facade.tick_timer(dt);
        self.facade.dispatch();
    }

    /// Swept collision test and response for one ball over the tick
    /// that was just stepped. Returns `None` when the rod never
    /// touches the ball.
    pub fn collide(&self, ball: &BallState, props: &BallProperties, dt: f64) -> Option<ContactResult> {
        let sweep = crate::collision::RodSweep {
            start: self.mover.prev_position(),
            end: self.mover.position(),
        };
        let contact = self.collider.detect(&sweep, ball, props, dt)?;
        Some(self.resolver.resolve(&contact, &sweep, ball, props, dt))
    }

    /// Position and velocity for a ball created at the plunger tip.
    pub fn spawn_ball(&self, props: &BallProperties, surface: &dyn SurfaceHeight) -> BallState {
        spawn_state(&self.config, &self.state.snapshot(), props, surface)
    }

    /// Attach a notification subscriber.
    pub fn subscribe(&mut self, handler: EventHandler) {
        self.facade.subscribe(handler);
    }

    /// Current rod position along the travel axis.
    pub fn position(&self) -> f64 {
        self.state.pos
    }

    /// Current animation frame index.
    pub fn frame(&self) -> u32 {
        self.state.frame
    }

    pub fn config(&self) -> &PlungerConfig {
        &self.config
    }

    /// Read-only copy of the dynamic state for readers on a different
    /// cadence than physics.
    pub fn snapshot(&self) -> PlungerSnapshot {
        self.state.snapshot()
    }

    /// Push the current frame to the rendering collaborator.
    ///
    /// Meshes are re-sampled only when the rod moved since the last
    /// call; an invisible plunger pushes nothing.
    pub fn render_into(&mut self, sink: &mut dyn MeshSink) {
        if !self.config.visible || !self.state.dirty {
            return;
        }
        for part in PLUNGER_PARTS {
            sink.update_part(part, self.state.frame, &self.config.material, &self.config.texture);
        }
        self.state.dirty = false;
    }
}

// =============================================================================
// Tests
// =============================================================================
