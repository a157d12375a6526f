//! Driver error taxonomy
//!
//! Errors are plain `Copy` values. HAL errors are mapped into these at the
//! driver boundary so callers only ever match on one type.

/// Bus transfer that failed during a camera protocol exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolStep {
    /// Setting the bus clock before initialisation
    SetFrequency,
    /// Writing the initialisation command at this index
    Init(u8),
    /// Writing the read marker at the start of a poll
    Marker,
    /// Reading the first frame buffer
    ReadFirst,
    /// Reading the second frame buffer
    ReadSecond,
}

/// Errors reported by the Cactus drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// A bus transfer failed
    ProtocolFailure(ProtocolStep),
    /// An argument was outside its allowed range; nothing was changed
    InvalidArgument,
    /// A sensor returned its "no reading" value
    SensorUnavailable,
}
