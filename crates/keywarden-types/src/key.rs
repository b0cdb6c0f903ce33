//! Key algorithms and key metadata types
//!
//! The algorithm set is closed; each algorithm is either signing-capable or
//! encryption-capable, never both, and a key's algorithm never changes after
//! creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::WalletError;

/// Supported key algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    /// Ed25519 signatures
    Ed25519,
    /// ECDSA over secp256k1
    EcdsaSecp256k1,
    /// AES-256-GCM authenticated encryption
    Aes256Gcm,
    /// ChaCha20-Poly1305 authenticated encryption
    ChaCha20Poly1305,
}

impl KeyAlgorithm {
    /// Whether keys of this algorithm can sign and verify
    pub fn is_signing(self) -> bool {
        match self {
            KeyAlgorithm::Ed25519 | KeyAlgorithm::EcdsaSecp256k1 => true,
            KeyAlgorithm::Aes256Gcm | KeyAlgorithm::ChaCha20Poly1305 => false,
        }
    }

    /// Whether keys of this algorithm can encrypt and decrypt
    pub fn is_encryption(self) -> bool {
        !self.is_signing()
    }

    /// All supported algorithms, in a fixed order
    pub fn all() -> [KeyAlgorithm; 4] {
        [
            KeyAlgorithm::Ed25519,
            KeyAlgorithm::EcdsaSecp256k1,
            KeyAlgorithm::Aes256Gcm,
            KeyAlgorithm::ChaCha20Poly1305,
        ]
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyAlgorithm::Ed25519 => "ed25519",
            KeyAlgorithm::EcdsaSecp256k1 => "ecdsa-secp256k1",
            KeyAlgorithm::Aes256Gcm => "aes256-gcm",
            KeyAlgorithm::ChaCha20Poly1305 => "chacha20-poly1305",
        };
        write!(f, "{name}")
    }
}

impl FromStr for KeyAlgorithm {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ed25519" => Ok(KeyAlgorithm::Ed25519),
            "ecdsa-secp256k1" | "secp256k1" => Ok(KeyAlgorithm::EcdsaSecp256k1),
            "aes256-gcm" | "aes-256-gcm" => Ok(KeyAlgorithm::Aes256Gcm),
            "chacha20-poly1305" => Ok(KeyAlgorithm::ChaCha20Poly1305),
            other => Err(WalletError::invalid_input(
                "type",
                format!("unsupported key type '{other}'"),
            )),
        }
    }
}

/// Request to create one key: what `addKey` and `reset` consume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDescriptor {
    /// Free-form label
    pub description: String,
    /// Algorithm of the key to generate
    #[serde(rename = "type")]
    pub algorithm: KeyAlgorithm,
}

impl KeyDescriptor {
    pub fn new(description: impl Into<String>, algorithm: KeyAlgorithm) -> Self {
        Self {
            description: description.into(),
            algorithm,
        }
    }
}

/// Public metadata of a managed key; never carries key material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyInfo {
    /// System-generated unique identifier
    pub key_id: String,
    /// Free-form label
    pub description: String,
    /// Algorithm of the key
    #[serde(rename = "type")]
    pub algorithm: KeyAlgorithm,
    /// When the key was created
    pub created_at: DateTime<Utc>,
}
