//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Trust material errors
//! - 9xxx: Internal errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 3xxx: Trust ====================
    /// Print agent certificate is not configured
    CertificateNotFound = 3101,
    /// Print agent certificate cannot be parsed
    CertificateInvalid = 3102,
    /// Signing key is not configured
    PrivateKeyNotFound = 3201,
    /// Signing key cannot be used
    PrivateKeyInvalid = 3202,
    /// Signing operation failed
    SigningFailed = 3203,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a system error (9xxx)
    #[inline]
    pub const fn is_system(&self) -> bool {
        self.code() >= 9000
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            ErrorCode::CertificateNotFound => "Certificate not found",
            ErrorCode::CertificateInvalid => "Certificate is invalid",
            ErrorCode::PrivateKeyNotFound => "Private key not found",
            ErrorCode::PrivateKeyInvalid => "Private key is invalid",
            ErrorCode::SigningFailed => "Signing failed",

            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            3 => ErrorCode::NotFound,
            5 => ErrorCode::InvalidRequest,
            7 => ErrorCode::RequiredField,
            3101 => ErrorCode::CertificateNotFound,
            3102 => ErrorCode::CertificateInvalid,
            3201 => ErrorCode::PrivateKeyNotFound,
            3202 => ErrorCode::PrivateKeyInvalid,
            3203 => ErrorCode::SigningFailed,
            9001 => ErrorCode::InternalError,
            other => return Err(format!("Unknown error code: {}", other)),
        };
        Ok(code)
    }
}
