use crate::error::{Result, TrustError};
use ring::{rand as ring_rand, signature};
use sha2::{Digest, Sha256};
use x509_parser::prelude::*;

const RSA_ENCRYPTION_OID: &str = "1.2.840.113549.1.1.1";

/// Parse an RSA private key from PEM (PKCS#8 `PRIVATE KEY` or PKCS#1 `RSA PRIVATE KEY`)
pub fn load_rsa_key(priv_key_pem: &str) -> Result<signature::RsaKeyPair> {
    let block = decode_pem(priv_key_pem, &["PRIVATE KEY", "RSA PRIVATE KEY"])
        .map_err(|e| TrustError::InvalidKey(e.to_string()))?;

    let parsed = if block.tag() == "RSA PRIVATE KEY" {
        signature::RsaKeyPair::from_der(block.contents())
    } else {
        signature::RsaKeyPair::from_pkcs8(block.contents())
    };

    parsed.map_err(|e| TrustError::InvalidKey(format!("Not a usable RSA key: {}", e)))
}

/// Sign data with RSA PKCS#1 v1.5 / SHA-256
pub fn sign(key_pair: &signature::RsaKeyPair, data: &[u8]) -> Result<Vec<u8>> {
    let rng = ring_rand::SystemRandom::new();
    let mut sig = vec![0; key_pair.public().modulus_len()];
    key_pair
        .sign(&signature::RSA_PKCS1_SHA256, &rng, data, &mut sig)
        .map_err(|e| TrustError::SigningFailed(e.to_string()))?;
    Ok(sig)
}

/// Verify an RSA-SHA256 signature using the public key of a PEM certificate
pub fn verify(cert_pem: &str, data: &[u8], sig: &[u8]) -> Result<()> {
    let (_, pem) = parse_x509_pem(cert_pem.as_bytes())
        .map_err(|e| TrustError::InvalidCertificate(format!("PEM parse error: {}", e)))?;
    let (_, x509) = x509_parser::parse_x509_certificate(&pem.contents)
        .map_err(|e| TrustError::InvalidCertificate(format!("X509 parse error: {}", e)))?;

    let spki = x509.tbs_certificate.subject_pki;
    let oid = spki.algorithm.algorithm.to_id_string();
    if oid != RSA_ENCRYPTION_OID {
        return Err(TrustError::VerificationFailed(format!(
            "Unsupported algorithm OID: {}",
            oid
        )));
    }

    let key_bytes = spki.subject_public_key.data;
    signature::UnparsedPublicKey::new(&signature::RSA_PKCS1_2048_8192_SHA256, key_bytes)
        .verify(data, sig)
        .map_err(|_| TrustError::VerificationFailed("Signature verification failed".into()))
}

/// SHA-256 fingerprint (hex) of the first certificate in a PEM bundle
pub fn certificate_fingerprint(cert_pem: &str) -> Result<String> {
    let block = decode_pem(cert_pem, &["CERTIFICATE"])?;
    Ok(hex::encode(Sha256::digest(block.contents())))
}

pub(crate) fn decode_pem(pem_str: &str, tags: &[&str]) -> Result<::pem::Pem> {
    let pems = ::pem::parse_many(pem_str)
        .map_err(|e| TrustError::InvalidCertificate(format!("PEM parse error: {}", e)))?;

    pems.into_iter()
        .find(|p| tags.contains(&p.tag()))
        .ok_or_else(|| {
            TrustError::InvalidCertificate(format!("PEM tag {:?} not found", tags))
        })
}
