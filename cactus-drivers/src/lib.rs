//! Hardware driver implementations
//!
//! This crate provides the robot's drivers on top of the traits defined
//! in cactus-hal, using the data model and configuration of cactus-core:
//!
//! - Camera (PixArt IR blob tracker over I2C)
//! - Motors (continuous-rotation wheel servos, drive train)
//! - Sensors (wheel tick counter, range finder)
//! - Accessories (laser diode)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod accessory;
pub mod camera;
pub mod motor;
pub mod robot;
pub mod sensor;

#[cfg(test)]
mod mock;

pub use robot::{Robot, RobotParts};
