//! Certificate / private key consistency check

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::info;

use crate::certificate::CertificateStore;
use crate::crypto;
use crate::error::{Result, TrustError};
use crate::signer::SignatureService;

const PROBE: &[u8] = b"pos-trust self-check";

/// Sign a probe with the private key and verify it against the certificate
///
/// Catches a key that does not belong to the served certificate, which
/// would otherwise only surface as every agent challenge being rejected.
pub async fn self_check(certificates: &CertificateStore, signer: &SignatureService) -> Result<()> {
    let certificate = certificates.get_certificate().await?;
    let response = signer.sign(PROBE).await?;
    let signature = STANDARD
        .decode(&response.signature)
        .map_err(|e| TrustError::VerificationFailed(e.to_string()))?;

    crypto::verify(certificate.as_str(), PROBE, &signature)?;
    info!("Certificate and private key match");
    Ok(())
}
