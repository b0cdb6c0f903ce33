//! Authenticated encryption
//!
//! Ciphertext wire format is `hex(nonce ‖ ciphertext)` with a fresh random
//! nonce per call, so encrypting the same payload twice yields different
//! output. Every decryption failure cause surfaces as the same
//! `CryptoError::DecryptionFailed`.

use aes_gcm::aead::generic_array::typenum::Unsigned;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, Nonce, OsRng};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::ChaCha20Poly1305;

use crate::{CryptoError, CryptoResult, KeyMaterial};

/// Encrypt a payload with the given material. Returns hex-encoded
/// `nonce ‖ ciphertext`.
pub fn encrypt(material: &KeyMaterial, plaintext: &[u8]) -> CryptoResult<String> {
    match material {
        KeyMaterial::Aes256Gcm { key } => seal(&Aes256Gcm::new(key.into()), plaintext),
        KeyMaterial::ChaCha20Poly1305 { key } => {
            seal(&ChaCha20Poly1305::new(key.into()), plaintext)
        }
        other => Err(CryptoError::NotEncryptionKey(other.algorithm())),
    }
}

/// Decrypt hex-encoded `nonce ‖ ciphertext` produced by [`encrypt`].
pub fn decrypt(material: &KeyMaterial, ciphertext_hex: &str) -> CryptoResult<Vec<u8>> {
    match material {
        KeyMaterial::Aes256Gcm { key } => open(&Aes256Gcm::new(key.into()), ciphertext_hex),
        KeyMaterial::ChaCha20Poly1305 { key } => {
            open(&ChaCha20Poly1305::new(key.into()), ciphertext_hex)
        }
        other => Err(CryptoError::NotEncryptionKey(other.algorithm())),
    }
}

fn seal<C: Aead + AeadCore>(cipher: &C, plaintext: &[u8]) -> CryptoResult<String> {
    let nonce = C::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut wire = nonce.to_vec();
    wire.extend_from_slice(&ciphertext);
    Ok(hex::encode(wire))
}

fn open<C: Aead + AeadCore>(cipher: &C, ciphertext_hex: &str) -> CryptoResult<Vec<u8>> {
    let wire = hex::decode(ciphertext_hex).map_err(|_| CryptoError::DecryptionFailed)?;

    let nonce_len = C::NonceSize::USIZE;
    if wire.len() <= nonce_len {
        return Err(CryptoError::DecryptionFailed);
    }
    let (nonce, ciphertext) = wire.split_at(nonce_len);

    cipher
        .decrypt(Nonce::<C>::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keywarden_types::KeyAlgorithm;

    #[test]
    fn test_seal_open_roundtrip_all_encryption_algorithms() {
        for algorithm in [KeyAlgorithm::Aes256Gcm, KeyAlgorithm::ChaCha20Poly1305] {
            let material = KeyMaterial::generate(algorithm).unwrap();
            let ciphertext = encrypt(&material, b"attack at dawn").unwrap();
            let plaintext = decrypt(&material, &ciphertext).unwrap();
            assert_eq!(plaintext, b"attack at dawn");
        }
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let material = KeyMaterial::generate(KeyAlgorithm::Aes256Gcm).unwrap();
        let first = encrypt(&material, b"same payload").unwrap();
        let second = encrypt(&material, b"same payload").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let material = KeyMaterial::generate(KeyAlgorithm::ChaCha20Poly1305).unwrap();
        let mut ciphertext = encrypt(&material, b"attack at dawn").unwrap();
        // flip the last hex digit
        let flipped = if ciphertext.ends_with('0') { '1' } else { '0' };
        ciphertext.pop();
        ciphertext.push(flipped);

        assert!(matches!(
            decrypt(&material, &ciphertext),
            Err(CryptoError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_failure_is_uniform_across_causes() {
        let material = KeyMaterial::generate(KeyAlgorithm::Aes256Gcm).unwrap();
        let other = KeyMaterial::generate(KeyAlgorithm::Aes256Gcm).unwrap();
        let ciphertext = encrypt(&material, b"secret").unwrap();

        let causes = [
            decrypt(&material, "not hex at all"),
            decrypt(&material, "00ff"),
            decrypt(&other, &ciphertext),
        ];
        for result in causes {
            assert!(matches!(result, Err(CryptoError::DecryptionFailed)));
        }
    }

    #[test]
    fn test_signing_material_cannot_encrypt() {
        let material = KeyMaterial::generate(KeyAlgorithm::Ed25519).unwrap();
        assert!(matches!(
            encrypt(&material, b"x"),
            Err(CryptoError::NotEncryptionKey(KeyAlgorithm::Ed25519))
        ));
    }
}
