//! Digital signatures
//!
//! Signatures are hex-encoded on the wire. `verify` reports a malformed or
//! mismatching signature as `Ok(false)`; only a key of the wrong capability
//! is an error.

use k256::ecdsa::signature::{Signer, Verifier};

use crate::{CryptoError, CryptoResult, KeyMaterial};

/// Sign a payload with the given material. Returns the hex-encoded signature.
pub fn sign(material: &KeyMaterial, payload: &[u8]) -> CryptoResult<String> {
    match material {
        KeyMaterial::Ed25519 { seed } => {
            let signing_key = ed25519_dalek::SigningKey::from_bytes(seed);
            let signature: ed25519_dalek::Signature = signing_key.sign(payload);
            Ok(hex::encode(signature.to_bytes()))
        }
        KeyMaterial::EcdsaSecp256k1 { scalar } => {
            let signing_key = ecdsa_signing_key(scalar)?;
            let signature: k256::ecdsa::Signature = signing_key.sign(payload);
            Ok(hex::encode(signature.to_bytes()))
        }
        other => Err(CryptoError::NotSigningKey(other.algorithm())),
    }
}

/// Verify a hex-encoded signature over a payload.
pub fn verify(material: &KeyMaterial, payload: &[u8], signature_hex: &str) -> CryptoResult<bool> {
    let signature_bytes = match hex::decode(signature_hex) {
        Ok(bytes) => bytes,
        Err(_) => return Ok(false),
    };

    match material {
        KeyMaterial::Ed25519 { seed } => {
            if signature_bytes.len() != 64 {
                return Ok(false);
            }
            let mut raw = [0u8; 64];
            raw.copy_from_slice(&signature_bytes);
            let signature = ed25519_dalek::Signature::from_bytes(&raw);
            let verifying_key = ed25519_dalek::SigningKey::from_bytes(seed).verifying_key();
            Ok(verifying_key.verify(payload, &signature).is_ok())
        }
        KeyMaterial::EcdsaSecp256k1 { scalar } => {
            let signature = match k256::ecdsa::Signature::from_slice(&signature_bytes) {
                Ok(signature) => signature,
                Err(_) => return Ok(false),
            };
            let signing_key = ecdsa_signing_key(scalar)?;
            let verifying_key = signing_key.verifying_key();
            Ok(verifying_key.verify(payload, &signature).is_ok())
        }
        other => Err(CryptoError::NotSigningKey(other.algorithm())),
    }
}

fn ecdsa_signing_key(scalar: &[u8; 32]) -> CryptoResult<k256::ecdsa::SigningKey> {
    let field_bytes = k256::FieldBytes::from(*scalar);
    k256::ecdsa::SigningKey::from_bytes(&field_bytes)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))
}
