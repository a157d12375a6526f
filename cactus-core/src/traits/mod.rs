//! Driver-facing traits
//!
//! These traits define the seams between the drivers and the code that
//! observes them.

pub mod motor;

pub use motor::{Direction, DirectionListener, DirectionSource, Side, TickListener};
