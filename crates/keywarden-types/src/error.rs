//! Error types for Keywarden
//!
//! Every failure path is explicit: components signal failure through
//! `WalletResult` rather than panicking, and the dispatch layer is the only
//! place that turns an `Err` into an abort effect.

use crate::KeyAlgorithm;
use thiserror::Error;

/// Result type for wallet operations
pub type WalletResult<T> = std::result::Result<T, WalletError>;

/// Keywarden error types
#[derive(Debug, Clone, Error)]
pub enum WalletError {
    // ========================================================================
    // Wallet Errors
    // ========================================================================

    /// No wallet record exists yet
    #[error("Wallet does not exist")]
    WalletNotFound,

    /// A wallet record already exists
    #[error("Wallet already exists")]
    WalletAlreadyExists,

    // ========================================================================
    // Key Errors
    // ========================================================================

    /// Key not found
    #[error("Key {key_id} not found")]
    KeyNotFound { key_id: String },

    /// Key algorithm does not support the requested operation
    #[error("Key {key_id} ({algorithm}) does not support {operation}")]
    UnsupportedOperation {
        key_id: String,
        algorithm: KeyAlgorithm,
        operation: &'static str,
    },

    // ========================================================================
    // User Errors
    // ========================================================================

    /// User not found
    #[error("User {user_id} not found")]
    UserNotFound { user_id: String },

    /// User already exists
    #[error("User {user_id} already exists")]
    UserAlreadyExists { user_id: String },

    /// Removal would leave the wallet without an admin
    #[error("User {user_id} is the last admin and cannot be removed")]
    LastAdmin { user_id: String },

    /// Caller's role does not permit the operation
    #[error("User {user_id} is not authorized to {operation}")]
    Unauthorized { user_id: String, operation: String },

    // ========================================================================
    // General Errors
    // ========================================================================

    /// Invalid input
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    /// A cryptographic operation failed
    #[error("Crypto failure: {reason}")]
    CryptoFailure { reason: String },

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WalletError {
    /// Create an invalid input error
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a crypto failure error
    pub fn crypto(reason: impl Into<String>) -> Self {
        Self::CryptoFailure {
            reason: reason.into(),
        }
    }

    /// Get an error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::WalletNotFound => "WALLET_NOT_FOUND",
            Self::WalletAlreadyExists => "WALLET_ALREADY_EXISTS",
            Self::KeyNotFound { .. } => "KEY_NOT_FOUND",
            Self::UnsupportedOperation { .. } => "UNSUPPORTED_OPERATION",
            Self::UserNotFound { .. } => "USER_NOT_FOUND",
            Self::UserAlreadyExists { .. } => "USER_ALREADY_EXISTS",
            Self::LastAdmin { .. } => "LAST_ADMIN",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::CryptoFailure { .. } => "CRYPTO_FAILURE",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = WalletError::KeyNotFound {
            key_id: "key_missing".to_string(),
        };
        assert_eq!(err.error_code(), "KEY_NOT_FOUND");

        let err = WalletError::invalid_input("role", "unknown role");
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_display_includes_ids() {
        let err = WalletError::UserAlreadyExists {
            user_id: "alice".to_string(),
        };
        assert!(err.to_string().contains("alice"));
    }
}
