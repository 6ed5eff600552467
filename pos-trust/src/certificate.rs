//! Print agent certificate
//!
//! The agent trusts commands from this server once it has been handed the
//! certificate below. It is read once from disk and served from memory for
//! the rest of the process lifetime; rotating it requires a restart.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::OnceCell;
use tracing::{info, instrument};

use crate::crypto;
use crate::error::{Result, TrustError};

/// PEM-encoded certificate, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate(Arc<str>);

impl Certificate {
    /// Wrap PEM text, checking it carries a `CERTIFICATE` block
    pub fn from_pem(pem: impl Into<String>) -> Result<Self> {
        let pem = pem.into();
        crypto::decode_pem(&pem, &["CERTIFICATE"])?;
        Ok(Self(Arc::from(pem)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SHA-256 fingerprint (hex), for logs
    pub fn fingerprint(&self) -> Result<String> {
        crypto::certificate_fingerprint(&self.0)
    }
}

/// Lazily loaded, process-wide certificate
///
/// Concurrent first callers share a single load; a failed load leaves the
/// store empty so a later call can pick up a file placed afterwards.
#[derive(Debug)]
pub struct CertificateStore {
    path: PathBuf,
    cache: OnceCell<Certificate>,
    loads: AtomicUsize,
}

impl CertificateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceCell::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Store that is already loaded (no file behind it)
    pub fn from_certificate(certificate: Certificate) -> Self {
        Self {
            path: PathBuf::new(),
            cache: OnceCell::from(certificate),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.initialized()
    }

    /// Number of reads from disk so far, failed ones included
    pub fn load_attempts(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Get the certificate, reading it from disk on first use
    pub async fn get_certificate(&self) -> Result<Certificate> {
        self.cache.get_or_try_init(|| self.load()).await.cloned()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Certificate> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        let pem = match tokio::fs::read_to_string(&self.path).await {
            Ok(pem) => pem,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TrustError::ConfigurationMissing(format!(
                    "Certificate not found at {}",
                    self.path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let certificate = Certificate::from_pem(pem)?;
        info!(fingerprint = %certificate.fingerprint()?, "Certificate loaded");
        Ok(certificate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CERT: &str = include_str!("../tests/fixtures/digital-certificate.txt");

    #[test]
    fn test_from_pem_rejects_non_certificate() {
        let key = include_str!("../tests/fixtures/private-key.pem");
        assert!(matches!(
            Certificate::from_pem(key),
            Err(TrustError::InvalidCertificate(_))
        ));
    }

    #[tokio::test]
    async fn test_preloaded_store() {
        let cert = Certificate::from_pem(CERT).unwrap();
        let store = CertificateStore::from_certificate(cert.clone());
        assert!(store.is_loaded());
        assert_eq!(store.get_certificate().await.unwrap(), cert);
        assert_eq!(store.load_attempts(), 0);
    }
}
