use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;

/// Gateway configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/crab/print | base directory |
/// | HTTP_PORT | 3100 | HTTP port |
/// | PRINT_CERT_PATH | {WORK_DIR}/certs/digital-certificate.txt | public certificate |
/// | PRINT_KEY_PATH | {WORK_DIR}/certs/private-key.pem | signing key |
/// | PRINTER_NAME | POS-80 | logical printer name |
/// | PRINTER_ADDR | 127.0.0.1:9100 | raw TCP address of the printer |
/// | PRINTER_TIMEOUT_MS | 5000 | printer connect timeout |
/// | PAPER_WIDTH | 48 | characters per line |
/// | TIMEZONE | Africa/Casablanca | ticket timestamps |
/// | ENVIRONMENT | development | environment name |
/// | LOG_LEVEL | info | log level |
/// | LOG_DIR | {WORK_DIR}/logs | daily log files, used when the directory exists |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/print PRINTER_ADDR=192.168.1.50:9100 cargo run -p print-gateway
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding certs and logs
    pub work_dir: String,
    pub http_port: u16,
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
    /// Fixed logical name of the receipt printer
    pub printer_name: String,
    pub printer_addr: String,
    pub printer_timeout_ms: u64,
    pub paper_width: usize,
    pub timezone: Tz,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/crab/print".into());
        let certs_dir = PathBuf::from(&work_dir).join("certs");

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3100),
            cert_path: std::env::var("PRINT_CERT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| certs_dir.join("digital-certificate.txt")),
            key_path: std::env::var("PRINT_KEY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| certs_dir.join("private-key.pem")),
            printer_name: std::env::var("PRINTER_NAME").unwrap_or_else(|_| "POS-80".into()),
            printer_addr: std::env::var("PRINTER_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:9100".into()),
            printer_timeout_ms: std::env::var("PRINTER_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            paper_width: std::env::var("PAPER_WIDTH")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|w| *w > 0)
                .unwrap_or(48),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::Africa::Casablanca),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            work_dir,
        }
    }

    /// Config rooted at `work_dir` with every other field at its default
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let work_dir = work_dir.into();
        let certs_dir = PathBuf::from(&work_dir).join("certs");
        Self {
            http_port: 3100,
            cert_path: certs_dir.join("digital-certificate.txt"),
            key_path: certs_dir.join("private-key.pem"),
            printer_name: "POS-80".into(),
            printer_addr: "127.0.0.1:9100".into(),
            printer_timeout_ms: 5000,
            paper_width: 48,
            timezone: chrono_tz::Africa::Casablanca,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            work_dir,
        }
    }

    pub fn printer_timeout(&self) -> Duration {
        Duration::from_millis(self.printer_timeout_ms)
    }

    /// Directory for daily log files
    pub fn log_path(&self) -> PathBuf {
        match &self.log_dir {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(&self.work_dir).join("logs"),
        }
    }
}
