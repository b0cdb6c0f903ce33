//! Crypto operation dispatch
//!
//! Stateless mapping of (keyId, operation, payload) onto the primitive layer,
//! with the wallet's failure semantics: absent key and wrong capability are
//! explicit errors, a bad signature is `false`, and every decryption failure
//! is reported uniformly.

use keywarden_crypto::{sealing, signing};
use keywarden_types::{WalletError, WalletResult};

use crate::registry::{Key, KeyRegistry};

pub fn sign(registry: &KeyRegistry, key_id: &str, payload: &str) -> WalletResult<String> {
    let key = signing_key(registry, key_id, "sign")?;
    signing::sign(key.material(), payload.as_bytes()).map_err(Into::into)
}

pub fn verify(
    registry: &KeyRegistry,
    key_id: &str,
    payload: &str,
    signature: &str,
) -> WalletResult<bool> {
    let key = signing_key(registry, key_id, "verify")?;
    signing::verify(key.material(), payload.as_bytes(), signature).map_err(Into::into)
}

pub fn encrypt(registry: &KeyRegistry, key_id: &str, payload: &str) -> WalletResult<String> {
    let key = encryption_key(registry, key_id, "encrypt")?;
    sealing::encrypt(key.material(), payload.as_bytes()).map_err(Into::into)
}

pub fn decrypt(registry: &KeyRegistry, key_id: &str, ciphertext: &str) -> WalletResult<String> {
    let key = encryption_key(registry, key_id, "decrypt")?;
    // one failure shape for bad encoding, bad tag, wrong key and non-UTF-8
    // plaintext alike
    let plaintext =
        sealing::decrypt(key.material(), ciphertext).map_err(|_| decryption_failed())?;
    String::from_utf8(plaintext).map_err(|_| decryption_failed())
}

fn signing_key<'a>(
    registry: &'a KeyRegistry,
    key_id: &str,
    operation: &'static str,
) -> WalletResult<&'a Key> {
    let key = lookup(registry, key_id)?;
    if !key.algorithm.is_signing() {
        return Err(WalletError::UnsupportedOperation {
            key_id: key_id.to_string(),
            algorithm: key.algorithm,
            operation,
        });
    }
    Ok(key)
}

fn encryption_key<'a>(
    registry: &'a KeyRegistry,
    key_id: &str,
    operation: &'static str,
) -> WalletResult<&'a Key> {
    let key = lookup(registry, key_id)?;
    if !key.algorithm.is_encryption() {
        return Err(WalletError::UnsupportedOperation {
            key_id: key_id.to_string(),
            algorithm: key.algorithm,
            operation,
        });
    }
    Ok(key)
}

fn lookup<'a>(registry: &'a KeyRegistry, key_id: &str) -> WalletResult<&'a Key> {
    registry.key(key_id).ok_or_else(|| WalletError::KeyNotFound {
        key_id: key_id.to_string(),
    })
}

fn decryption_failed() -> WalletError {
    WalletError::crypto("decryption failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use keywarden_types::KeyAlgorithm;

    fn registry_with(algorithm: KeyAlgorithm) -> (KeyRegistry, String) {
        let mut registry = KeyRegistry::default();
        let key_id = registry.add_key("test key", algorithm).unwrap();
        (registry, key_id)
    }

    #[test]
    fn test_sign_verify_through_registry() {
        let (registry, key_id) = registry_with(KeyAlgorithm::Ed25519);
        let signature = sign(&registry, &key_id, "hello").unwrap();
        assert!(verify(&registry, &key_id, "hello", &signature).unwrap());
        assert!(!verify(&registry, &key_id, "hello", "garbage").unwrap());
    }

    #[test]
    fn test_encrypt_decrypt_through_registry() {
        let (registry, key_id) = registry_with(KeyAlgorithm::Aes256Gcm);
        let ciphertext = encrypt(&registry, &key_id, "payload").unwrap();
        assert_eq!(decrypt(&registry, &key_id, &ciphertext).unwrap(), "payload");
    }

    #[test]
    fn test_unknown_key_fails_uniformly() {
        let registry = KeyRegistry::default();
        assert!(matches!(
            sign(&registry, "key_missing", "x"),
            Err(WalletError::KeyNotFound { .. })
        ));
        assert!(matches!(
            verify(&registry, "key_missing", "x", "00"),
            Err(WalletError::KeyNotFound { .. })
        ));
        assert!(matches!(
            encrypt(&registry, "key_missing", "x"),
            Err(WalletError::KeyNotFound { .. })
        ));
        assert!(matches!(
            decrypt(&registry, "key_missing", "00"),
            Err(WalletError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_capability_mismatch() {
        let (registry, signing_id) = registry_with(KeyAlgorithm::EcdsaSecp256k1);
        assert!(matches!(
            encrypt(&registry, &signing_id, "x"),
            Err(WalletError::UnsupportedOperation {
                operation: "encrypt",
                ..
            })
        ));

        let (registry, sealing_id) = registry_with(KeyAlgorithm::ChaCha20Poly1305);
        assert!(matches!(
            sign(&registry, &sealing_id, "x"),
            Err(WalletError::UnsupportedOperation {
                operation: "sign",
                ..
            })
        ));
    }

    #[test]
    fn test_decrypt_failure_is_uniform() {
        let (registry, key_id) = registry_with(KeyAlgorithm::Aes256Gcm);
        let (other_registry, other_id) = registry_with(KeyAlgorithm::Aes256Gcm);
        let ciphertext = encrypt(&registry, &key_id, "secret").unwrap();

        let failures = [
            decrypt(&registry, &key_id, "not hex"),
            decrypt(&registry, &key_id, "00ff00ff"),
            decrypt(&other_registry, &other_id, &ciphertext),
        ];
        for failure in failures {
            match failure {
                Err(WalletError::CryptoFailure { reason }) => {
                    assert_eq!(reason, "decryption failed")
                }
                other => panic!("expected uniform CryptoFailure, got {other:?}"),
            }
        }
    }
}
