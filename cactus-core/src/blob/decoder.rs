//! Blob frame decoder
//!
//! Each blob is packed into three bytes:
//!
//! ```text
//! byte 0: x[7:0]
//! byte 1: y[7:0]
//! byte 2: y[9:8] x[9:8] size[3:0]
//! ```
//!
//! Slots 0-2 are the first three triples of the first buffer, slot 3 is the
//! first triple of the second buffer. All camera modes share this layout.

use super::{Blob, BlobFrame, BlobSet};

/// Bytes per packed blob
const TRIPLE_LEN: usize = 3;

/// Slots carried by the first buffer
const FIRST_BUFFER_SLOTS: usize = 3;

const X_HIGH_MASK: u8 = 0b0011_0000;
const Y_HIGH_MASK: u8 = 0b1100_0000;
const SIZE_MASK: u8 = 0b0000_1111;

/// Unpack one blob from a three-byte run
fn decode_triple(bytes: &[u8; TRIPLE_LEN]) -> Blob {
    let [x_low, y_low, packed] = *bytes;

    Blob {
        x: u16::from(x_low) | (u16::from(packed & X_HIGH_MASK) << 4),
        y: u16::from(y_low) | (u16::from(packed & Y_HIGH_MASK) << 2),
        size: packed & SIZE_MASK,
        ..Blob::default()
    }
}

/// Slice out the `index`-th triple of a buffer
fn triple(buf: &[u8], index: usize) -> [u8; TRIPLE_LEN] {
    let off = index * TRIPLE_LEN;
    [buf[off], buf[off + 1], buf[off + 2]]
}

/// Decode a raw frame into `out`, replacing every slot
///
/// Every camera mode is decoded with the same position/size triples. The
/// bounding box and intensity fields are always left at zero.
pub fn decode(frame: &BlobFrame, out: &mut BlobSet) {
    for (i, slot) in out.slots_mut().iter_mut().enumerate() {
        *slot = if i < FIRST_BUFFER_SLOTS {
            decode_triple(&triple(&frame.first, i))
        } else {
            decode_triple(&triple(&frame.second, i - FIRST_BUFFER_SLOTS))
        };
    }
}
