//! # Plunger Core
//!
//! Physics engine for a pinball spring plunger: a player pulls the
//! rod back, releases it, and the rod accelerates forward under
//! spring force, striking a ball and transferring momentum, while
//! limit switches report end/beginning-of-stroke events to game logic.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec3, ball state, events)
//! - `config`: Table storage and per-table plunger parameters
//! - `state`: Shared dynamic state (rod position, animation frame)
//! - `mover`: Fixed-timestep integrator for the rod
//! - `collision`: Swept detection and contact resolution at the tip
//! - `spawn`: Ball placement at the plunger tip
//! - `facade`: Notifications, subscriptions, timer schedule
//! - `plunger`: The entity and its Configured → Active lifecycle
//!
//! The simulation runs at a fixed tick; rendering reads the shared
//! dynamic state on its own cadence through a dirty-flagged snapshot,
//! so presentation rate never affects the mechanical outcome.

pub mod collision;
pub mod config;
pub mod facade;
pub mod mover;
pub mod plunger;
pub mod spawn;
pub mod state;
pub mod types;
