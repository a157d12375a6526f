//! Blob data model
//!
//! A blob is one bright point tracked by the IR camera. Each poll yields a
//! [`BlobFrame`] (two raw buffers) which [`decode`] turns into a
//! [`BlobSet`] of exactly [`BLOB_SLOTS`] records.

pub mod decoder;

pub use decoder::decode;

/// Number of blobs the camera tracks at once
pub const BLOB_SLOTS: usize = 4;

/// Size of each raw frame buffer in bytes
pub const FRAME_LEN: usize = 18;

/// Largest coordinate the camera reports (10 bits)
pub const MAX_COORDINATE: u16 = 0x3FF;

/// Largest size the camera reports (4 bits)
pub const MAX_SIZE: u8 = 0x0F;

/// One tracked point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Blob {
    /// Horizontal position, `0..=1023`
    pub x: u16,
    /// Vertical position, `0..=1023`
    pub y: u16,
    /// Rough size, `0..=15`
    pub size: u8,
    /// Bounding box, only carried by bounding-box layouts (zero otherwise)
    pub x_min: u8,
    pub x_max: u8,
    pub y_min: u8,
    pub y_max: u8,
    /// Brightness, only carried by the intensity layout (zero otherwise)
    pub intensity: u16,
}

impl Blob {
    /// Whether this slot holds a detection
    ///
    /// The camera fills unused slots with all coordinate bits set.
    pub fn is_detected(&self) -> bool {
        !(self.x == MAX_COORDINATE && self.y == MAX_COORDINATE)
    }
}

/// The blobs of one poll, strongest first
///
/// Slot `i` always holds the `i`-th detection reported by the camera.
/// A decode rewrites every slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlobSet {
    slots: [Blob; BLOB_SLOTS],
}

impl BlobSet {
    /// Create a set with all slots zeroed
    pub const fn new() -> Self {
        Self {
            slots: [Blob {
                x: 0,
                y: 0,
                size: 0,
                x_min: 0,
                x_max: 0,
                y_min: 0,
                y_max: 0,
                intensity: 0,
            }; BLOB_SLOTS],
        }
    }

    /// Get the blob in slot `index`
    pub fn get(&self, index: usize) -> Option<&Blob> {
        self.slots.get(index)
    }

    /// All slots, including empty ones
    pub fn as_slice(&self) -> &[Blob; BLOB_SLOTS] {
        &self.slots
    }

    /// Iterate over all slots in order
    pub fn iter(&self) -> impl Iterator<Item = &Blob> {
        self.slots.iter()
    }

    /// Iterate over the slots that hold a detection
    pub fn detected(&self) -> impl Iterator<Item = &Blob> {
        self.slots.iter().filter(|b| b.is_detected())
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Blob; BLOB_SLOTS] {
        &mut self.slots
    }
}

/// Raw buffers filled by one camera poll
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlobFrame {
    /// First buffer (slots 0-2)
    pub first: [u8; FRAME_LEN],
    /// Second buffer (slot 3)
    pub second: [u8; FRAME_LEN],
}

impl BlobFrame {
    /// Create a zeroed frame
    pub const fn new() -> Self {
        Self {
            first: [0; FRAME_LEN],
            second: [0; FRAME_LEN],
        }
    }
}

impl Default for BlobFrame {
    fn default() -> Self {
        Self::new()
    }
}
