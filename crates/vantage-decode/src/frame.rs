//! LOOP frame envelope.
//!
//! On the wire a response is `ACK "LOO" body LF CR crc_hi crc_lo`, 100 bytes
//! in total. The leading ACK belongs to the command exchange; everything after
//! it is the payload the checksum covers.

use crate::crc::crc16_ccitt;
use crate::error::{DecodeError, Malformed};

pub const FRAME_LEN: usize = 100;
pub const ACK: u8 = 0x06;
pub const PREFIX: &[u8; 3] = b"LOO";
pub const TRAILER: &[u8; 2] = b"\n\r";

/// A LOOP payload whose envelope and checksum have been verified.
///
/// The only way to obtain one is [`ValidatedPayload::from_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedPayload<'a> {
    bytes: &'a [u8],
}

impl<'a> ValidatedPayload<'a> {
    pub fn from_frame(frame: &'a [u8]) -> Result<Self, DecodeError> {
        check_envelope(frame).map_err(DecodeError::Malformed)?;

        let payload = &frame[1..];
        let residue = crc16_ccitt(payload);
        if residue != 0 {
            return Err(DecodeError::Malformed(Malformed::Checksum(residue)));
        }

        Ok(Self { bytes: payload })
    }

    /// Reads one byte at `offset`. Offsets come from a [`crate::FrameLayout`]
    /// and are always inside the payload.
    pub fn u8_at(&self, offset: usize) -> u8 {
        self.bytes[offset]
    }

    pub fn u16_le_at(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }

    pub fn i16_le_at(&self, offset: usize) -> i16 {
        i16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }
}

fn check_envelope(frame: &[u8]) -> Result<(), Malformed> {
    if frame.len() != FRAME_LEN {
        return Err(Malformed::Length(frame.len()));
    }
    if frame[0] != ACK {
        return Err(Malformed::LeadingByte(frame[0]));
    }
    if &frame[1..4] != PREFIX {
        return Err(Malformed::Prefix);
    }
    // body sits between the prefix and the trailer and must be non-empty,
    // which FRAME_LEN guarantees
    let trailer_at = FRAME_LEN - 4;
    if &frame[trailer_at..trailer_at + 2] != TRAILER {
        return Err(Malformed::Trailer);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::frame_with;

    fn malformed(frame: &[u8]) -> Malformed {
        match ValidatedPayload::from_frame(frame) {
            Err(DecodeError::Malformed(m)) => m,
            other => panic!("expected malformed frame, got {other:?}"),
        }
    }

    #[test]
    fn accepts_intact_frame() {
        let frame = frame_with(|_| {});
        let payload = ValidatedPayload::from_frame(&frame).unwrap();
        assert_eq!(payload.u8_at(0), b'L');
        assert_eq!(payload.u16_le_at(FRAME_LEN - 5), u16::from_le_bytes(*TRAILER));
    }

    #[test]
    fn rejects_wrong_length() {
        let mut frame = frame_with(|_| {});
        frame.push(0);
        assert_eq!(malformed(&frame), Malformed::Length(FRAME_LEN + 1));
        assert_eq!(malformed(&frame[..FRAME_LEN - 1]), Malformed::Length(FRAME_LEN - 1));
        assert_eq!(malformed(&[]), Malformed::Length(0));
    }

    #[test]
    fn rejects_wrong_leading_byte() {
        let mut frame = frame_with(|_| {});
        frame[0] = 0x15;
        assert_eq!(malformed(&frame), Malformed::LeadingByte(0x15));
    }

    #[test]
    fn rejects_wrong_prefix() {
        // checksum is recomputed so only the prefix is wrong
        let frame = frame_with(|p| p[2] = b'P');
        assert_eq!(malformed(&frame), Malformed::Prefix);
    }

    #[test]
    fn rejects_missing_trailer() {
        let frame = frame_with(|p| p[FRAME_LEN - 5] = b'\r');
        assert_eq!(malformed(&frame), Malformed::Trailer);
    }

    #[test]
    fn rejects_checksum_mismatch() {
        let mut frame = frame_with(|_| {});
        frame[40] ^= 0x01;
        assert!(matches!(malformed(&frame), Malformed::Checksum(r) if r != 0));

        let mut frame = frame_with(|_| {});
        frame[FRAME_LEN - 1] ^= 0x80;
        assert!(matches!(malformed(&frame), Malformed::Checksum(_)));
    }

    #[test]
    fn little_endian_readers() {
        let frame = frame_with(|p| {
            p[10] = 0x34;
            p[11] = 0x12;
            p[20] = 0xFE;
            p[21] = 0xFF;
        });
        let payload = ValidatedPayload::from_frame(&frame).unwrap();
        assert_eq!(payload.u16_le_at(10), 0x1234);
        assert_eq!(payload.i16_le_at(20), -2);
        assert_eq!(payload.u8_at(11), 0x12);
    }
}
