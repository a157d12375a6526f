//! Robot hardware context
//!
//! Built once at start-up from the board's peripherals. A camera that fails
//! to initialise leaves the rest of the robot usable: it is logged and the
//! camera slot stays empty.

use cactus_core::blob::BlobSet;
use cactus_core::config::{RobotConfig, TickConfig};
use cactus_core::traits::Side;
use cactus_core::DriverError;
use cactus_hal::{AnalogInput, I2cBus, PowerOutput, RangeSensor, ServoOutput};
use embedded_hal::delay::DelayNs;

use crate::accessory::LaserDiode;
use crate::camera::PixartCamera;
use crate::motor::{DriveTrain, ServoMotor};
use crate::sensor::{RangeFinder, TickCounter};

/// Board peripherals handed to [`Robot::new`]
pub struct RobotParts<B, D, S, P, R> {
    /// Bus the camera sits on
    pub bus: B,
    /// Delay for the camera protocol
    pub delay: D,
    pub left_servo: S,
    pub right_servo: S,
    pub laser: P,
    pub left_range: R,
    pub right_range: R,
}

/// All drivers of the robot
pub struct Robot<'a, B, D, S, P, R> {
    /// Blob camera, absent if it failed to initialise
    pub camera: Option<PixartCamera<B, D>>,
    /// Wheels and their tick state
    pub drive: DriveTrain<'a, S>,
    pub laser: LaserDiode<P>,
    pub left_range: RangeFinder<R>,
    pub right_range: RangeFinder<R>,
}

impl<'a, B, D, S, P, R> Robot<'a, B, D, S, P, R>
where
    B: I2cBus,
    D: DelayNs,
    S: ServoOutput,
    P: PowerOutput,
    R: RangeSensor,
{
    /// Bring up every driver
    ///
    /// Fails only on invalid configuration. Camera bus errors are not fatal.
    pub fn new(
        parts: RobotParts<B, D, S, P, R>,
        config: &RobotConfig,
    ) -> Result<Self, DriverError> {
        let camera = match PixartCamera::new(parts.bus, parts.delay, config.camera) {
            Ok(camera) => Some(camera),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("camera unavailable: {}", _e);
                None
            }
        };

        Ok(Self {
            camera,
            drive: DriveTrain::new(parts.left_servo, parts.right_servo, config.servo)?,
            laser: LaserDiode::new(parts.laser, config.laser)?,
            left_range: RangeFinder::new(parts.left_range),
            right_range: RangeFinder::new(parts.right_range),
        })
    }

    /// Whether the camera came up
    pub fn has_camera(&self) -> bool {
        self.camera.is_some()
    }

    /// Poll the camera into `out`
    ///
    /// Fails with [`DriverError::SensorUnavailable`] if there is no camera.
    pub fn read_blobs(&mut self, out: &mut BlobSet) -> Result<(), DriverError> {
        self.camera
            .as_mut()
            .ok_or(DriverError::SensorUnavailable)?
            .read_blobs(out)
    }

    /// Motor on `side`
    pub fn motor(&self, side: Side) -> &ServoMotor<'a, S> {
        self.drive.motor(side)
    }

    /// Range finder on `side`
    pub fn range(&mut self, side: Side) -> &mut RangeFinder<R> {
        match side {
            Side::Left => &mut self.left_range,
            Side::Right => &mut self.right_range,
        }
    }

    /// Build the tick counter for the wheel on `side`
    pub fn tick_counter<A: AnalogInput>(
        &self,
        side: Side,
        sampler: A,
        config: TickConfig,
    ) -> Result<TickCounter<'_, A, ServoMotor<'a, S>>, DriverError> {
        self.drive.tick_counter(side, sampler, config)
    }

    /// Stop both wheels
    pub fn stop(&self) {
        self.drive.stop();
    }
}
