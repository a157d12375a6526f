//! Laser diode driver
//!
//! The diode sits on a power output that takes a small integer drive level.
//! Brightness is set as a fraction of full power; the fraction is mapped
//! linearly onto `min_power..=max_power`, with exactly zero mapping to
//! `off_power`.

use cactus_core::config::LaserConfig;
use cactus_core::validate::check_fraction;
use cactus_core::DriverError;
use cactus_hal::PowerOutput;

/// Laser diode on a power output
pub struct LaserDiode<P> {
    output: P,
    config: LaserConfig,
    /// Last fraction applied
    power: f32,
}

impl<P: PowerOutput> LaserDiode<P> {
    /// Create a laser, switched off
    pub fn new(mut output: P, config: LaserConfig) -> Result<Self, DriverError> {
        config.validate()?;
        output.set_power(config.off_power);

        Ok(Self {
            output,
            config,
            power: 0.0,
        })
    }

    /// Set brightness as a fraction of full power
    ///
    /// Fails with [`DriverError::InvalidArgument`] outside `0.0..=1.0`,
    /// leaving the output as it was.
    pub fn set_power(&mut self, fraction: f32) -> Result<(), DriverError> {
        let fraction = check_fraction(fraction)?;
        let raw = self.raw_for(fraction);

        #[cfg(feature = "defmt")]
        defmt::trace!("laser power {} -> {}", fraction, raw);

        self.output.set_power(raw);
        self.power = fraction;
        Ok(())
    }

    /// Switch the laser off
    pub fn off(&mut self) {
        self.output.set_power(self.config.off_power);
        self.power = 0.0;
    }

    /// Last fraction applied
    pub fn power(&self) -> f32 {
        self.power
    }

    /// Drive level for the last fraction applied
    pub fn raw_power(&self) -> i16 {
        self.raw_for(self.power)
    }

    /// Whether the laser is on
    pub fn is_on(&self) -> bool {
        self.power > 0.0
    }

    /// Get the configuration
    pub fn config(&self) -> &LaserConfig {
        &self.config
    }

    /// Release the output
    pub fn release(self) -> P {
        self.output
    }

    fn raw_for(&self, fraction: f32) -> i16 {
        if fraction == 0.0 {
            return self.config.off_power;
        }
        let min = i32::from(self.config.min_power);
        let max = i32::from(self.config.max_power);
        // fraction * span is non-negative, so adding a half rounds to nearest
        let raw = min + (fraction * (max - min) as f32 + 0.5) as i32;
        // Clamped into the configured i16 range, so the narrowing is lossless
        raw.clamp(min, max) as i16
    }
}
