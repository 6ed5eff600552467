//! Printer transports
//!
//! Only raw TCP (JetDirect, port 9100) is supported: the printer takes ESC/POS
//! bytes on a fresh connection and prints them when the peer closes.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, info, instrument, warn};

use crate::error::{PrintError, PrintResult};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Upper bound for reachability probes, so a dead printer never stalls a job
const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Something that accepts encoded print data
#[allow(async_fn_in_trait)]
pub trait Printer {
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    async fn is_online(&self) -> bool;
}

/// Raw TCP receipt printer
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl NetworkPrinter {
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        Self::from_addr(&format!("{}:{}", host, port))
    }

    /// Parse `ip:port`, e.g. `192.168.1.50:9100`
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let addr = addr
            .parse()
            .map_err(|_| PrintError::InvalidAddress(addr.to_string()))?;
        Ok(Self {
            addr,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Connect timeout for print jobs
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn connect(&self, timeout: Duration) -> PrintResult<TcpStream> {
        match tokio::time::timeout(timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(source)) => Err(PrintError::Connect {
                addr: self.addr,
                source,
            }),
            Err(_) => Err(PrintError::Timeout(self.addr, timeout)),
        }
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(self, data), fields(addr = %self.addr, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let mut stream = self.connect(self.timeout).await?;
        stream.write_all(data).await?;
        stream.flush().await?;
        stream.shutdown().await?;

        info!("Print data sent");
        Ok(())
    }

    #[instrument(skip(self), fields(addr = %self.addr))]
    async fn is_online(&self) -> bool {
        match self.connect(self.timeout.min(PROBE_TIMEOUT)).await {
            Ok(_) => {
                debug!("Printer reachable");
                true
            }
            Err(e) => {
                warn!(error = %e, "Printer offline");
                false
            }
        }
    }
}
