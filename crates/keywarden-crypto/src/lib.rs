//! Keywarden Crypto - cryptographic primitives for the custodial wallet
//!
//! This crate provides:
//! - Key material generation per algorithm
//! - Digital signatures (Ed25519, ECDSA/secp256k1)
//! - Authenticated encryption (AES-256-GCM, ChaCha20-Poly1305)
//!
//! # Security Invariant
//!
//! **Key material never leaves this crate in the clear.** Callers hand in a
//! `KeyMaterial` reference and receive hex-encoded signatures or ciphertext;
//! material is zeroized when dropped.

pub mod material;
pub mod sealing;
pub mod signing;

pub use material::*;
pub use sealing::*;
pub use signing::*;

use keywarden_types::{KeyAlgorithm, WalletError};
use thiserror::Error;

/// Cryptographic errors
#[derive(Debug, Clone, Error)]
pub enum CryptoError {
    #[error("key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("{0} is not a signing algorithm")]
    NotSigningKey(KeyAlgorithm),

    #[error("{0} is not an encryption algorithm")]
    NotEncryptionKey(KeyAlgorithm),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    // One variant for every decryption failure cause. Distinguishing bad
    // encoding from a bad tag would hand callers a padding-oracle analogue.
    #[error("decryption failed")]
    DecryptionFailed,
}

pub type CryptoResult<T> = Result<T, CryptoError>;

impl From<CryptoError> for WalletError {
    fn from(err: CryptoError) -> Self {
        WalletError::CryptoFailure {
            reason: err.to_string(),
        }
    }
}
