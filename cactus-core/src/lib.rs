//! Board-agnostic core logic for the Cactus robot drivers
//!
//! This crate contains everything that does not touch hardware:
//!
//! - Error taxonomy shared by all drivers
//! - Bounded-range argument validation
//! - Blob data model and the camera frame decoder
//! - Direction and tick listener traits
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod blob;
pub mod config;
pub mod error;
pub mod traits;
pub mod validate;

pub use error::{DriverError, ProtocolStep};
