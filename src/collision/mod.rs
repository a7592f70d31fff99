//! Collision detection and resolution for the plunger rod tip.
//!
//! This module handles:
//! - **Detection**: finding when and where the moving tip face meets a
//!   ball within a tick (swept test)
//! - **Resolution**: computing the ball's post-contact velocity and
//!   correcting its position to the contact boundary
//!
//! ## Why a swept test
//!
//! A released rod covers most of its stroke in a few milliseconds —
//! far more than a ball diameter per tick — so checking endpoint
//! overlap alone would tunnel straight through the ball:
//!
//! ```text
//! tick start                tick end
//!     ║ rod                     ║ rod
//!     ║──────────●──────────────║
//!                ball
//!          └─ contact happens mid-tick
//! ```
//!
//! The sweep covers the full displacement of both the face and the
//! ball, so contact is found regardless of rod speed or tick size.

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;
