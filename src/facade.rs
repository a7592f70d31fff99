//! Control facade: the notification side of a plunger session.
//!
//! The facade owns the subscriber list and the periodic timer
//! schedule, and nothing else — it holds no physics state and is bound
//! to exactly one session. Events raised during a tick (limit
//! switches, timer) queue up and flush to subscribers in order at the
//! end of the tick, which keeps dispatch inside the single-threaded
//! cooperative step and lets `Init` be queued at setup but delivered
//! once subscribers have attached.

use log::trace;

use crate::types::PlungerEvent;

/// Subscriber callback for plunger notifications.
pub type EventHandler = Box<dyn FnMut(PlungerEvent)>;

/// Event queue, subscriptions, and timer cadence for one session.
pub struct ControlFacade {
    handlers: Vec<EventHandler>,
    queued: Vec<PlungerEvent>,
    timer_interval: Option<f64>,
    timer_accum: f64,
}

impl ControlFacade {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            queued: Vec::new(),
            timer_interval: None,
            timer_accum: 0.0,
        }
    }

    /// Facade with a periodic `Timer` notification every `interval`
    /// seconds of simulated time.
    pub fn with_timer(interval: f64) -> Self {
        Self {
            timer_interval: Some(interval),
            ..Self::new()
        }
    }

    /// Attach a subscriber. All queued and future events reach every
    /// subscriber in attach order.
    pub fn subscribe(&mut self, handler: EventHandler) {
        self.handlers.push(handler);
    }

    /// Queue an event for the next dispatch.
    pub fn queue(&mut self, event: PlungerEvent) {
        trace!("plunger event queued: {:?}", event);
        self.queued.push(event);
    }

    /// Advance the timer schedule, queueing `Timer` events as their
    /// deadlines pass within this tick.
    pub fn tick_timer(&mut self, dt: f64) {
        let Some(interval) = self.timer_interval else {
            return;
        };
        self.timer_accum += dt;
        while self.timer_accum >= interval {
            self.timer_accum -= interval;
            self.queue(PlungerEvent::Timer);
        }
    }

    /// Flush queued events to all subscribers, in queue order.
    pub fn dispatch(&mut self) {
        for event in self.queued.drain(..) {
            for handler in self.handlers.iter_mut() {
                handler(event);
            }
        }
    }
}

impl Default for ControlFacade {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
