//! Wheel motor drivers
//!
//! - Continuous-rotation servo per wheel, with mirroring and direction
//!   notification
//! - Drive train pairing both wheels with their tick state

pub mod drive;
pub mod servo;

pub use drive::DriveTrain;
pub use servo::ServoMotor;
