//! Configuration type definitions
//!
//! Every struct has a `Default` matching the stock Cactus hardware.

use crate::error::DriverError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 7-bit bus address of the PixArt camera
pub const CAMERA_ADDRESS: u8 = 0x58;

/// Bus clock used for the camera
pub const CAMERA_FREQUENCY_HZ: u32 = 115_200;

/// Servo position range of the wheel servos
pub const SERVO_MAX_POSITION: u16 = 100;

/// Default tick sampling period
pub const TICK_PERIOD_MS: u32 = 100;

/// Analog level at or above which the tick sensor reads high
pub const TICK_THRESHOLD: u16 = 500;

/// Wait between resamples under [`ReadFailurePolicy::Retry`]
pub const TICK_RESAMPLE_MS: u32 = 12;

/// Total time spent resampling under [`ReadFailurePolicy::Retry`]
pub const TICK_RETRY_BUDGET_MS: u32 = 150;

/// Full power of a motor-port output
pub const LASER_MAX_POWER: i16 = 16;

/// Camera operating mode
///
/// The discriminant is the payload of the mode-select command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum CameraMode {
    Basic = 0x01,
    #[default]
    Extended = 0x03,
    Full = 0x05,
}

impl CameraMode {
    /// Payload byte of the mode-select command
    pub fn mode_byte(self) -> u8 {
        self as u8
    }

    /// Wait between the first and the second buffer read
    ///
    /// Full mode latches a larger second buffer and needs the extra margin.
    pub fn second_read_delay_us(self) -> u32 {
        match self {
            CameraMode::Basic | CameraMode::Extended => 380,
            CameraMode::Full => 1_000,
        }
    }
}

/// IR camera configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraConfig {
    /// 7-bit bus address
    pub address: u8,
    /// Bus clock in Hz
    pub frequency_hz: u32,
    /// Mode selected during initialisation
    pub mode: CameraMode,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            address: CAMERA_ADDRESS,
            frequency_hz: CAMERA_FREQUENCY_HZ,
            mode: CameraMode::default(),
        }
    }
}

/// Continuous-rotation servo configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoConfig {
    /// Largest position the channel accepts; half of it is "stopped"
    pub max_position: u16,
}

impl ServoConfig {
    /// Position at which the servo is stopped
    pub fn midpoint(&self) -> u16 {
        self.max_position / 2
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<(), DriverError> {
        if self.max_position < 2 {
            return Err(DriverError::InvalidArgument);
        }
        Ok(())
    }
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            max_position: SERVO_MAX_POSITION,
        }
    }
}

/// What the tick counter does when the analog read fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReadFailurePolicy {
    /// Treat the sample as unchanged and carry on
    #[default]
    Degrade,
    /// Resample every `resample_ms` until a read succeeds or `budget_ms`
    /// has been spent, then degrade
    Retry { resample_ms: u32, budget_ms: u32 },
}

impl ReadFailurePolicy {
    /// Retry with the stock resample interval and budget
    pub const RETRY: Self = ReadFailurePolicy::Retry {
        resample_ms: TICK_RESAMPLE_MS,
        budget_ms: TICK_RETRY_BUDGET_MS,
    };
}

/// Tick counter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickConfig {
    /// Sampling period in ms, must be positive
    pub period_ms: u32,
    /// Analog level at or above which the sensor reads high
    pub threshold: u16,
    /// Handling of failed analog reads
    pub read_failure: ReadFailurePolicy,
}

impl TickConfig {
    /// Check the configuration
    pub fn validate(&self) -> Result<(), DriverError> {
        if self.period_ms == 0 {
            return Err(DriverError::InvalidArgument);
        }
        if let ReadFailurePolicy::Retry { resample_ms: 0, .. } = self.read_failure {
            return Err(DriverError::InvalidArgument);
        }
        Ok(())
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            period_ms: TICK_PERIOD_MS,
            threshold: TICK_THRESHOLD,
            read_failure: ReadFailurePolicy::Degrade,
        }
    }
}

/// Laser diode output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaserConfig {
    /// Power at which the diode is guaranteed off
    pub off_power: i16,
    /// Power applied for the smallest non-zero setting
    pub min_power: i16,
    /// Power applied at full setting
    pub max_power: i16,
}

impl LaserConfig {
    /// Check the configuration
    pub fn validate(&self) -> Result<(), DriverError> {
        if self.min_power >= self.max_power {
            return Err(DriverError::InvalidArgument);
        }
        Ok(())
    }
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self {
            off_power: 0,
            min_power: 0,
            max_power: LASER_MAX_POWER,
        }
    }
}

/// Configuration of every driver on the robot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RobotConfig {
    pub camera: CameraConfig,
    pub servo: ServoConfig,
    pub tick: TickConfig,
    pub laser: LaserConfig,
}
