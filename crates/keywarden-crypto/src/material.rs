//! Secret key material
//!
//! `KeyMaterial` is the opaque handle the wallet stores per key. It is
//! serialized into the wallet record, never exposed through any query, and
//! zeroized on drop.

use aes_gcm::aead::KeyInit;
use aes_gcm::Aes256Gcm;
use chacha20poly1305::ChaCha20Poly1305;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use keywarden_types::KeyAlgorithm;

use crate::CryptoResult;

/// Secret material of one managed key
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub enum KeyMaterial {
    Ed25519 { seed: [u8; 32] },
    EcdsaSecp256k1 { scalar: [u8; 32] },
    Aes256Gcm { key: [u8; 32] },
    ChaCha20Poly1305 { key: [u8; 32] },
}

impl KeyMaterial {
    /// Generate fresh material for the given algorithm
    pub fn generate(algorithm: KeyAlgorithm) -> CryptoResult<Self> {
        match algorithm {
            KeyAlgorithm::Ed25519 => {
                let signing_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
                Ok(KeyMaterial::Ed25519 {
                    seed: signing_key.to_bytes(),
                })
            }
            KeyAlgorithm::EcdsaSecp256k1 => {
                let signing_key = k256::ecdsa::SigningKey::random(&mut OsRng);
                Ok(KeyMaterial::EcdsaSecp256k1 {
                    scalar: signing_key.to_bytes().into(),
                })
            }
            KeyAlgorithm::Aes256Gcm => Ok(KeyMaterial::Aes256Gcm {
                key: Aes256Gcm::generate_key(&mut OsRng).into(),
            }),
            KeyAlgorithm::ChaCha20Poly1305 => Ok(KeyMaterial::ChaCha20Poly1305 {
                key: ChaCha20Poly1305::generate_key(&mut OsRng).into(),
            }),
        }
    }

    /// The algorithm this material belongs to
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            KeyMaterial::Ed25519 { .. } => KeyAlgorithm::Ed25519,
            KeyMaterial::EcdsaSecp256k1 { .. } => KeyAlgorithm::EcdsaSecp256k1,
            KeyMaterial::Aes256Gcm { .. } => KeyAlgorithm::Aes256Gcm,
            KeyMaterial::ChaCha20Poly1305 { .. } => KeyAlgorithm::ChaCha20Poly1305,
        }
    }
}

// Secrets stay out of logs and error chains.
impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyMaterial({})", self.algorithm())
    }
}
