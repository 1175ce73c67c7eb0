//! LOOP packet protocol: checksum, envelope validation, field layout,
//! decoding and forecast mapping. No I/O lives here.

pub mod crc;
pub mod error;
pub mod forecast;
pub mod frame;
pub mod layout;
pub mod loop_packet;
#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub use crc::{append_crc, crc16, crc16_ccitt};
pub use error::{DecodeError, Malformed};
pub use forecast::{ForecastLabel, FORECAST_ICONS};
pub use frame::{ValidatedPayload, FRAME_LEN};
pub use layout::FrameLayout;
pub use loop_packet::{decode_loop, Measurement};
