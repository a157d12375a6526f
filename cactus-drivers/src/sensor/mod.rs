//! Sensor drivers
//!
//! - Wheel tick counting from an analog proximity sensor
//! - Ultrasonic range finding

pub mod range;
pub mod tachometer;

pub use range::RangeFinder;
pub use tachometer::{TickCounter, TickOutcome, TickState, CM_PER_TICK, TICKS_PER_ROTATION};
