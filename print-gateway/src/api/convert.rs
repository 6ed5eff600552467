//! Trust errors to API errors
//!
//! Missing material maps to 404 with the fixed messages print agents expect.

use pos_trust::TrustError;
use shared::error::{AppError, ErrorCode};

/// Map a certificate lookup failure
pub fn certificate_error(err: TrustError) -> AppError {
    match err {
        TrustError::ConfigurationMissing(_) => AppError::new(ErrorCode::CertificateNotFound),
        TrustError::InvalidCertificate(msg) => {
            AppError::with_message(ErrorCode::CertificateInvalid, msg)
        }
        other => AppError::internal(other.to_string()),
    }
}

/// Map a signing failure
pub fn signing_error(err: TrustError) -> AppError {
    match err {
        TrustError::InvalidArgument(msg) => AppError::with_message(ErrorCode::RequiredField, msg),
        TrustError::ConfigurationMissing(_) => AppError::new(ErrorCode::PrivateKeyNotFound),
        TrustError::InvalidKey(msg) => AppError::with_message(ErrorCode::PrivateKeyInvalid, msg),
        TrustError::SigningFailed(msg) => AppError::with_message(ErrorCode::SigningFailed, msg),
        other => AppError::internal(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::http::StatusCode;

    #[test]
    fn test_missing_material_is_not_found() {
        let err = certificate_error(TrustError::ConfigurationMissing("x".into()));
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Certificate not found");

        let err = signing_error(TrustError::ConfigurationMissing("x".into()));
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Private key not found");
    }

    #[test]
    fn test_empty_payload_is_bad_request() {
        let err = signing_error(TrustError::InvalidArgument("No data to sign".into()));
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "No data to sign");
    }
}
