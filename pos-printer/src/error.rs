use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("Invalid printer address: {0}")]
    InvalidAddress(String),

    #[error("Cannot reach printer at {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Printer at {0} did not answer within {1:?}")]
    Timeout(SocketAddr, Duration),

    #[error("Write to printer failed: {0}")]
    Write(#[from] std::io::Error),
}

pub type PrintResult<T> = Result<T, PrintError>;
