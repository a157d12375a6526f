//! Analog input abstractions

/// Analog voltage sampler
///
/// The returned value is in the native range of the sampler. No
/// calibration is applied at this layer.
pub trait AnalogInput {
    /// Error type for a failed conversion
    type Error;

    /// Take one sample
    fn sample(&mut self) -> Result<u16, Self::Error>;
}
