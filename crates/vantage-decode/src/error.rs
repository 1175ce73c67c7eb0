use thiserror::Error;

/// Why a frame was rejected before any field was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    Length(usize),
    LeadingByte(u8),
    Prefix,
    Trailer,
    Checksum(u16),
}

impl std::fmt::Display for Malformed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Length(n) => write!(f, "frame is {n} bytes"),
            Self::LeadingByte(b) => write!(f, "leading byte 0x{b:02X} is not ACK"),
            Self::Prefix => f.write_str("missing LOO prefix"),
            Self::Trailer => f.write_str("missing LF CR trailer"),
            Self::Checksum(residue) => write!(f, "checksum residue 0x{residue:04X}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed packet: {0}")]
    Malformed(Malformed),
    #[error("unknown forecast icon code {0}")]
    UnknownForecastCode(u8),
}
