//! Key registry: the managed key set and its lifecycle
//!
//! KeyIds are system-generated, never client-supplied. Material is produced
//! by `keywarden-crypto` and dropped (zeroized) when a key is removed or the
//! registry is reset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use keywarden_crypto::KeyMaterial;
use keywarden_types::{KeyAlgorithm, KeyDescriptor, KeyInfo, WalletError, WalletResult};

/// A managed key: metadata plus its opaque secret material
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    pub key_id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub algorithm: KeyAlgorithm,
    material: KeyMaterial,
    pub created_at: DateTime<Utc>,
}

impl Key {
    fn generate(description: String, algorithm: KeyAlgorithm) -> WalletResult<Self> {
        let material = KeyMaterial::generate(algorithm)?;
        Ok(Self {
            key_id: new_key_id(),
            description,
            algorithm,
            material,
            created_at: Utc::now(),
        })
    }

    /// Secret material; stays inside the wallet crate.
    pub(crate) fn material(&self) -> &KeyMaterial {
        &self.material
    }

    /// Public metadata view
    pub fn info(&self) -> KeyInfo {
        KeyInfo {
            key_id: self.key_id.clone(),
            description: self.description.clone(),
            algorithm: self.algorithm,
            created_at: self.created_at,
        }
    }
}

fn new_key_id() -> String {
    format!("key_{}", uuid::Uuid::new_v4())
}

/// The wallet's key set, in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyRegistry {
    keys: Vec<Key>,
}

impl KeyRegistry {
    /// Generate and insert a new key. Returns the fresh keyId. On generation
    /// failure nothing is added.
    pub fn add_key(
        &mut self,
        description: impl Into<String>,
        algorithm: KeyAlgorithm,
    ) -> WalletResult<String> {
        let key = Key::generate(description.into(), algorithm)?;
        let key_id = key.key_id.clone();
        self.keys.push(key);
        Ok(key_id)
    }

    /// Remove a key. Its material is zeroized on drop.
    pub fn remove_key(&mut self, key_id: &str) -> WalletResult<()> {
        let position = self
            .keys
            .iter()
            .position(|k| k.key_id == key_id)
            .ok_or_else(|| WalletError::KeyNotFound {
                key_id: key_id.to_string(),
            })?;
        self.keys.remove(position);
        Ok(())
    }

    /// Replace the entire key set with freshly generated keys, one per
    /// descriptor, in order. All-or-nothing: replacements are staged first,
    /// and on any generation failure the live key set is left untouched.
    pub fn reset(&mut self, descriptors: &[KeyDescriptor]) -> WalletResult<Vec<String>> {
        let mut staged = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            staged.push(Key::generate(
                descriptor.description.clone(),
                descriptor.algorithm,
            )?);
        }

        let key_ids = staged.iter().map(|k| k.key_id.clone()).collect();
        // old keys dropped here, material zeroized
        self.keys = staged;
        Ok(key_ids)
    }

    /// Look up a key by id
    pub fn key(&self, key_id: &str) -> Option<&Key> {
        self.keys.iter().find(|k| k.key_id == key_id)
    }

    /// Fresh metadata listing, insertion-ordered, no material
    pub fn list(&self) -> Vec<KeyInfo> {
        self.keys.iter().map(Key::info).collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
