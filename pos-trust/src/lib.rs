//! Trust material for the print agent channel
//!
//! - [`CertificateStore`]: the certificate handed to the agent
//! - [`SignatureService`]: answers agent signing challenges (RSA-SHA256)

mod certificate;
mod crypto;
mod error;
pub mod signer;
pub mod trust;

pub use certificate::{Certificate, CertificateStore};
pub use crypto::{certificate_fingerprint, verify};
pub use error::{Result, TrustError};
pub use signer::{SecureSigner, SignResponse, SignatureService, SigningKey};
pub use trust::self_check;
