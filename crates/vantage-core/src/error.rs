use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationError {
    #[error("failed to open {port}: {source}")]
    Open {
        port: String,
        source: serialport::Error,
    },
    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("station not ready after {attempts} wake attempts")]
    NotReady { attempts: usize },
    #[error("received incomplete data: {received} of {expected} bytes")]
    IncompleteData { expected: usize, received: usize },
}
