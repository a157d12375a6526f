//! IR camera drivers
//!
//! - PixArt blob-tracking camera (as found in game controller remotes)

pub mod pixart;

pub use pixart::PixartCamera;
