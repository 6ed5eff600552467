//! Unified error system
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes
//! - [`AppError`]: Error type with code, message and HTTP mapping
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 3xxx: Trust material (certificate, signing key)
//! - 9xxx: Internal errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::CertificateNotFound);
//! assert_eq!(err.message, "Certificate not found");
//! assert_eq!(err.http_status(), shared::http::StatusCode::NOT_FOUND);
//! ```

mod codes;
mod http;
mod types;

pub use codes::ErrorCode;
pub use types::{AppError, AppResult, ErrorBody};
