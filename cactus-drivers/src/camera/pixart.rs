//! PixArt IR blob-tracking camera driver
//!
//! The camera tracks up to four bright points and reports them over I2C.
//! This driver provides:
//! - The initialisation sequence (sensitivity registers, mode select)
//! - The write-marker-then-read-twice poll protocol
//! - Decoding of polled frames into a [`BlobSet`]
//!
//! # Timing
//!
//! The camera latches its output buffers asynchronously to the bus, so
//! every step is followed by a fixed wait. Reading early returns torn
//! data. The waits are part of the protocol and are not configurable.
//!
//! ```ignore
//! let mut camera = PixartCamera::new(i2c, delay, CameraConfig::default())?;
//! let mut blobs = BlobSet::new();
//!
//! loop {
//!     camera.read_blobs(&mut blobs)?;
//!     for blob in blobs.detected() {
//!         // steer towards blob.x
//!     }
//! }
//! ```

use cactus_core::blob::{decode, BlobFrame, BlobSet};
use cactus_core::config::{CameraConfig, CameraMode};
use cactus_core::{DriverError, ProtocolStep};
use cactus_hal::I2cBus;
use embedded_hal::delay::DelayNs;

/// Byte written to request a new frame
pub const READ_MARKER: u8 = 0x36;

/// Wait after each initialisation write
pub const INIT_SETTLE_US: u32 = 100;

/// Wait between the read marker and the first buffer read
pub const MARKER_SETTLE_US: u32 = 25;

/// Number of commands in the initialisation sequence
pub const INIT_COMMANDS: usize = 6;

/// Control register value that powers the sensor up
const CONTROL_ENABLE: [u8; 2] = [0x30, 0x01];

/// Sensitivity block 1, register 0x00
const SENSITIVITY_BLOCK_1: [u8; 8] = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x90];

/// Sensitivity block 2, register 0x07
const SENSITIVITY_BLOCK_2: [u8; 3] = [0x07, 0x00, 0x41];

/// Sensitivity block 3, register 0x1A
const SENSITIVITY_BLOCK_3: [u8; 3] = [0x1A, 0x40, 0x00];

/// Mode-select register; the payload is [`CameraMode::mode_byte`]
const MODE_REGISTER: u8 = 0x33;

/// Control register value that starts tracking
const CONTROL_START: [u8; 2] = [0x30, 0x08];

/// PixArt blob camera on an I2C bus
///
/// The driver owns the bus and the frame buffers; no other component may
/// talk to the bus while the camera exists.
pub struct PixartCamera<B, D> {
    bus: B,
    delay: D,
    config: CameraConfig,
    frame: BlobFrame,
}

impl<B: I2cBus, D: DelayNs> PixartCamera<B, D> {
    /// Create and initialise the camera
    ///
    /// Fails if any initialisation transfer fails; the camera is unusable
    /// in that case and the bus is dropped with it.
    pub fn new(bus: B, delay: D, config: CameraConfig) -> Result<Self, DriverError> {
        let mut camera = Self {
            bus,
            delay,
            config,
            frame: BlobFrame::new(),
        };
        camera.initialize()?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "IR camera ready at {=u8:#x}, mode {}",
            camera.config.address,
            camera.config.mode
        );

        Ok(camera)
    }

    /// Run the initialisation sequence again
    ///
    /// Sets the bus clock, then writes each command followed by
    /// [`INIT_SETTLE_US`].
    pub fn initialize(&mut self) -> Result<(), DriverError> {
        self.bus
            .set_frequency(self.config.frequency_hz)
            .map_err(|_| DriverError::ProtocolFailure(ProtocolStep::SetFrequency))?;

        let mode_select = [MODE_REGISTER, self.config.mode.mode_byte()];
        let commands: [&[u8]; INIT_COMMANDS] = [
            &CONTROL_ENABLE,
            &SENSITIVITY_BLOCK_1,
            &SENSITIVITY_BLOCK_2,
            &SENSITIVITY_BLOCK_3,
            &mode_select,
            &CONTROL_START,
        ];

        for (index, command) in commands.iter().enumerate() {
            self.bus
                .write(self.config.address, command)
                .map_err(|_| DriverError::ProtocolFailure(ProtocolStep::Init(index as u8)))?;
            self.delay.delay_us(INIT_SETTLE_US);
        }

        Ok(())
    }

    /// Poll one raw frame
    ///
    /// Failures are returned as-is; retrying is up to the caller.
    pub fn poll(&mut self) -> Result<&BlobFrame, DriverError> {
        let address = self.config.address;

        self.bus
            .write(address, &[READ_MARKER])
            .map_err(|_| DriverError::ProtocolFailure(ProtocolStep::Marker))?;
        self.delay.delay_us(MARKER_SETTLE_US);

        self.bus
            .read(address, &mut self.frame.first)
            .map_err(|_| DriverError::ProtocolFailure(ProtocolStep::ReadFirst))?;
        self.delay.delay_us(self.config.mode.second_read_delay_us());

        self.bus
            .read(address, &mut self.frame.second)
            .map_err(|_| DriverError::ProtocolFailure(ProtocolStep::ReadSecond))?;

        Ok(&self.frame)
    }

    /// Poll a frame and decode it into `out`
    ///
    /// On failure `out` is left untouched.
    pub fn read_blobs(&mut self, out: &mut BlobSet) -> Result<(), DriverError> {
        match self.poll() {
            Ok(frame) => {
                decode(frame, out);
                Ok(())
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("IR camera poll failed: {}", e);
                Err(e)
            }
        }
    }

    /// Mode selected during initialisation
    pub fn mode(&self) -> CameraMode {
        self.config.mode
    }

    /// Get the configuration
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Give back the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}
