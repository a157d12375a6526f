//! I2C bus abstractions
//!
//! Provides traits for I2C master operations that can be implemented
//! by chip-specific HALs.

/// I2C bus master
///
/// Provides the raw transfers used to talk to peripheral devices. Every
/// transfer is either a write or a read, never both.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Set the bus clock frequency
    ///
    /// # Arguments
    /// * `hz` - Clock frequency in Hz
    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error>;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into, filled completely on success
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error> {
        T::set_frequency(self, hz)
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, address, buf)
    }
}
