//! Accessory drivers

pub mod laser;

pub use laser::LaserDiode;
