use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ring::signature::RsaKeyPair;
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use crate::crypto;
use crate::error::{Result, TrustError};

/// Base64 RSA-SHA256 signature answering a print agent challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignResponse {
    pub signature: String,
}

/// Signing capability handed to print agents
///
/// Callers never see the private key, they can only ask for a payload to
/// be signed.
#[async_trait]
pub trait SecureSigner: Send + Sync {
    /// Sign an agent challenge
    async fn sign_challenge(&self, payload: &[u8]) -> Result<SignResponse>;

    /// Signature algorithm name, as announced to agents
    fn algorithm(&self) -> &'static str;
}

/// RSA private key handle
///
/// Never serialized or printed.
pub struct SigningKey {
    key_pair: RsaKeyPair,
}

impl SigningKey {
    pub fn from_pem(priv_key_pem: &str) -> Result<Self> {
        Ok(Self {
            key_pair: crypto::load_rsa_key(priv_key_pem)?,
        })
    }

    pub fn modulus_bits(&self) -> usize {
        self.key_pair.public().modulus_len() * 8
    }

    /// Raw RSA PKCS#1 v1.5 / SHA-256 signature
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        crypto::sign(&self.key_pair, data)
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("modulus_bits", &self.modulus_bits())
            .finish_non_exhaustive()
    }
}

/// Signs agent challenges with the server private key
///
/// The key is read once, on first use. Every call signs from scratch:
/// challenges are single-use, so nothing is cached besides the key.
#[derive(Debug)]
pub struct SignatureService {
    path: PathBuf,
    key: OnceCell<Arc<SigningKey>>,
}

impl SignatureService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: OnceCell::new(),
        }
    }

    pub fn from_key(key: SigningKey) -> Self {
        Self {
            path: PathBuf::new(),
            key: OnceCell::from(Arc::new(key)),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.key.initialized()
    }

    /// Sign `payload`, returning the base64 signature
    ///
    /// Fails with `InvalidArgument` on an empty payload and with
    /// `ConfigurationMissing` when no key file exists.
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    pub async fn sign(&self, payload: &[u8]) -> Result<SignResponse> {
        if payload.is_empty() {
            return Err(TrustError::InvalidArgument("No data to sign".into()));
        }

        let key = self.signing_key().await?;
        let signature = key.sign(payload)?;
        debug!("Payload signed");

        Ok(SignResponse {
            signature: STANDARD.encode(signature),
        })
    }

    async fn signing_key(&self) -> Result<Arc<SigningKey>> {
        self.key
            .get_or_try_init(|| self.load())
            .await
            .map(Arc::clone)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Arc<SigningKey>> {
        let pem = match tokio::fs::read_to_string(&self.path).await {
            Ok(pem) => pem,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TrustError::ConfigurationMissing(format!(
                    "Private key not found at {}",
                    self.path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let key = SigningKey::from_pem(&pem)?;
        info!(modulus_bits = key.modulus_bits(), "Signing key loaded");
        Ok(Arc::new(key))
    }
}

#[async_trait]
impl SecureSigner for SignatureService {
    async fn sign_challenge(&self, payload: &[u8]) -> Result<SignResponse> {
        self.sign(payload).await
    }

    fn algorithm(&self) -> &'static str {
        "SHA256"
    }
}
