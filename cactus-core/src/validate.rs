//! Bounded-range argument validation
//!
//! Shared by every driver that takes a percentage or a power level, so all
//! of them reject bad input the same way and before touching any state.

use crate::error::DriverError;

/// Check that `value` lies within `[lower, upper]`
///
/// Values that do not compare (NaN) are rejected.
pub fn check_range<T: PartialOrd>(value: T, lower: T, upper: T) -> Result<T, DriverError> {
    debug_assert!(lower <= upper, "empty range");

    if value >= lower && value <= upper {
        Ok(value)
    } else {
        Err(DriverError::InvalidArgument)
    }
}

/// Check an integer percentage in `[0, 100]`
pub fn check_percent(percent: i32) -> Result<u8, DriverError> {
    check_range(percent, 0, 100).map(|p| p as u8)
}

/// Check a fraction in `[0.0, 1.0]`
pub fn check_fraction(fraction: f32) -> Result<f32, DriverError> {
    check_range(fraction, 0.0, 1.0)
}
