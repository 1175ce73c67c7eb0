//! Builders for well-formed LOOP frames.

use crate::crc::append_crc;
use crate::frame::{ACK, FRAME_LEN, PREFIX, TRAILER};

/// An intact frame with a zeroed body. `edit` patches payload bytes (offsets
/// as in [`crate::FrameLayout`]) before the checksum is computed.
pub fn frame_with(edit: impl FnOnce(&mut [u8])) -> Vec<u8> {
    let mut payload = vec![0u8; FRAME_LEN - 3];
    payload[..3].copy_from_slice(PREFIX);
    payload[FRAME_LEN - 5..].copy_from_slice(TRAILER);
    edit(&mut payload);
    append_crc(&mut payload);

    let mut frame = Vec::with_capacity(FRAME_LEN);
    frame.push(ACK);
    frame.extend_from_slice(&payload);
    frame
}

/// Writes `value` little-endian at `offset`.
pub fn put_u16(payload: &mut [u8], offset: usize, value: u16) {
    payload[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}
