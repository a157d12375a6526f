//! Cactus Hardware Abstraction Layer
//!
//! This crate defines the hardware primitives the Cactus drivers are built
//! on. A board crate implements them for its chip; host tests implement
//! them with scripted mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (navigation loop, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cactus-drivers (camera, servo, tacho)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cactus-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Two-wire bus transfers
//! - [`analog::AnalogInput`] - Analog voltage sampling
//! - [`output::ServoOutput`] - Position-settable servo channel
//! - [`output::PowerOutput`] - Single-channel power output
//! - [`range::RangeSensor`] - Distance sensor with a "no reading" sentinel

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod i2c;
pub mod output;
pub mod range;

// Re-export key traits at crate root for convenience
pub use analog::AnalogInput;
pub use i2c::I2cBus;
pub use output::{PowerOutput, ServoOutput};
pub use range::{RangeSensor, NO_READING};
