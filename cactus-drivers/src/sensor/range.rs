//! Ultrasonic range finder

use cactus_core::DriverError;
use cactus_hal::RangeSensor;

/// Range finder on one side of the robot
///
/// Wraps a board [`RangeSensor`], turning its "no reading" sentinel into an
/// error.
pub struct RangeFinder<R> {
    sensor: R,
}

impl<R: RangeSensor> RangeFinder<R> {
    /// Wrap a sensor
    pub fn new(sensor: R) -> Self {
        Self { sensor }
    }

    /// Trigger a measurement and return the distance
    ///
    /// Fails with [`DriverError::SensorUnavailable`] if the sensor reports no
    /// echo or an unusable value.
    pub fn distance_cm(&mut self) -> Result<f32, DriverError> {
        self.sensor.ping();
        let distance = self.sensor.distance_cm();

        if distance.is_nan() || distance < 0.0 {
            #[cfg(feature = "defmt")]
            defmt::debug!("range finder returned no reading");
            return Err(DriverError::SensorUnavailable);
        }

        Ok(distance)
    }

    /// Release the underlying sensor
    pub fn release(self) -> R {
        self.sensor
    }
}
