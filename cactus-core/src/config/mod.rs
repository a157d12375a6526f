//! Configuration types
//!
//! Board-agnostic driver configuration. With the `serde` feature the types
//! can be stored as postcard binary data by the board crate.

pub mod types;

pub use types::*;
