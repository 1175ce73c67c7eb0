//! Station I/O: serial link, console command exchanges, wire transcript.

pub mod error;
pub mod link;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod station;
pub mod transcript;

pub use error::StationError;
pub use link::{LinkConfig, PortInfo, StationLink, TimedPort};
pub use station::{poll, request_loop, wake, WAKE_ATTEMPTS};
pub use transcript::{Direction, Transcript, TranscriptEntry};
