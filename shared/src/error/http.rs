//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound | Self::CertificateNotFound | Self::PrivateKeyNotFound => {
                StatusCode::NOT_FOUND
            }

            // 500 Internal Server Error
            Self::InternalError
            | Self::CertificateInvalid
            | Self::PrivateKeyInvalid
            | Self::SigningFailed => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request
            Self::InvalidRequest | Self::RequiredField => StatusCode::BAD_REQUEST,
        }
    }
}
