//! CRC-16/CCITT as the station computes it (polynomial 0x1021, no reflection).
//!
//! The station appends the checksum high byte first, so running the checksum
//! over a frame *including* its trailing two bytes yields zero for an intact
//! frame. That residue check is how [`crate::ValidatedPayload`] accepts frames.

/// Computes the checksum of `data`, starting from `init`.
///
/// Table-free: each byte is folded into split high/low halves.
pub fn crc16(data: &[u8], init: u16) -> u16 {
    let mut msb = (init >> 8) as u8;
    let mut lsb = init as u8;

    for &b in data {
        let mut x = b ^ msb;
        x ^= x >> 4;
        msb = lsb ^ (x >> 3) ^ (x << 4);
        lsb = x ^ (x << 5);
    }

    u16::from_be_bytes([msb, lsb])
}

pub fn crc16_ccitt(data: &[u8]) -> u16 {
    crc16(data, 0)
}

/// Appends the checksum of `data` in wire order (high byte first).
pub fn append_crc(data: &mut Vec<u8>) {
    let crc = crc16_ccitt(data);
    data.extend_from_slice(&crc.to_be_bytes());
}
