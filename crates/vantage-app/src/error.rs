use thiserror::Error;
use vantage_core::StationError;
use vantage_decode::DecodeError;

use crate::publish::PublishError;

/// Anything that ends a run early. Each kind has its own exit status.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Station(#[from] StationError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Station(StationError::NotReady { .. }) => 3,
            Self::Station(StationError::IncompleteData { .. }) => 4,
            Self::Station(_) => 1,
            Self::Decode(DecodeError::Malformed(_)) => 5,
            Self::Decode(DecodeError::UnknownForecastCode(_)) => 6,
            Self::Publish(_) => 7,
            Self::Other(_) => 1,
        }
    }
}
