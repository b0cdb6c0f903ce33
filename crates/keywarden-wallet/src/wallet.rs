//! The wallet aggregate root
//!
//! One `Wallet` value is the whole persisted record: name, creation metadata,
//! user set and key set. The record exists only after `create`; there is no
//! destroy transition, only `reset` of the key set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use keywarden_types::{
    KeyAlgorithm, KeyDescriptor, KeyInfo, OperationClass, Role, WalletMetadata, WalletResult,
};

use crate::access::{AccessControl, User};
use crate::ops;
use crate::registry::KeyRegistry;

/// The custodial wallet: singleton aggregate of users and keys
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    name: String,
    metadata: WalletMetadata,
    access: AccessControl,
    registry: KeyRegistry,
    created_at: DateTime<Utc>,
}

impl Wallet {
    /// Construct the active wallet record. One-time creation is enforced by
    /// the service layer, which rejects `create` when a record already exists.
    pub fn create(name: impl Into<String>, metadata: WalletMetadata) -> Self {
        Self {
            name: name.into(),
            metadata,
            access: AccessControl::default(),
            registry: KeyRegistry::default(),
            created_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque creation metadata, stored verbatim
    pub fn metadata(&self) -> &WalletMetadata {
        &self.metadata
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn rename(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
    }

    // ── User administration ──────────────────────────────────────────────

    pub fn add_user(&mut self, user_id: impl Into<String>, role: Role) -> WalletResult<()> {
        self.access.add_user(user_id, role)
    }

    pub fn remove_user(&mut self, user_id: &str) -> WalletResult<()> {
        self.access.remove_user(user_id)
    }

    pub fn users(&self) -> &[User] {
        self.access.users()
    }

    /// Allow/deny an operation class for a user. Exposed for the dispatch
    /// layer; `list_keys` applies it internally.
    pub fn authorize(&self, user_id: &str, class: OperationClass) -> WalletResult<()> {
        self.access.authorize(user_id, class)
    }

    // ── Key administration ───────────────────────────────────────────────

    pub fn add_key(
        &mut self,
        description: impl Into<String>,
        algorithm: KeyAlgorithm,
    ) -> WalletResult<String> {
        self.registry.add_key(description, algorithm)
    }

    pub fn remove_key(&mut self, key_id: &str) -> WalletResult<()> {
        self.registry.remove_key(key_id)
    }

    /// Atomically replace the whole key set; rolled back on any failure.
    pub fn reset(&mut self, descriptors: &[KeyDescriptor]) -> WalletResult<Vec<String>> {
        self.registry.reset(descriptors)
    }

    /// Key metadata visible to `requesting_user`, recomputed per call
    pub fn list_keys(&self, requesting_user: &str) -> WalletResult<Vec<KeyInfo>> {
        self.access
            .authorize(requesting_user, OperationClass::KeyUsage)?;
        Ok(self.registry.list())
    }

    pub fn key_count(&self) -> usize {
        self.registry.len()
    }

    // ── Crypto operations ────────────────────────────────────────────────

    pub fn sign(&self, key_id: &str, payload: &str) -> WalletResult<String> {
        ops::sign(&self.registry, key_id, payload)
    }

    pub fn verify(&self, key_id: &str, payload: &str, signature: &str) -> WalletResult<bool> {
        ops::verify(&self.registry, key_id, payload, signature)
    }

    pub fn encrypt(&self, key_id: &str, payload: &str) -> WalletResult<String> {
        ops::encrypt(&self.registry, key_id, payload)
    }

    pub fn decrypt(&self, key_id: &str, ciphertext: &str) -> WalletResult<String> {
        ops::decrypt(&self.registry, key_id, ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keywarden_types::WalletError;

    fn active_wallet() -> Wallet {
        let mut wallet = Wallet::create("w1", WalletMetadata::default());
        wallet.add_user("root", Role::Admin).unwrap();
        wallet
    }

    #[test]
    fn test_rename() {
        let mut wallet = active_wallet();
        wallet.rename("treasury");
        assert_eq!(wallet.name(), "treasury");
    }

    #[test]
    fn test_failed_operation_leaves_wallet_unchanged() {
        let mut wallet = active_wallet();
        let key_id = wallet.add_key("master key", KeyAlgorithm::Ed25519).unwrap();
        let before = serde_json::to_string(&wallet).unwrap();

        assert!(wallet.remove_key("key_missing").is_err());
        assert!(wallet.add_user("root", Role::Member).is_err());
        assert!(wallet.remove_user("ghost").is_err());
        assert!(wallet.sign("key_missing", "x").is_err());

        let after = serde_json::to_string(&wallet).unwrap();
        assert_eq!(before, after);
        assert!(wallet.list_keys("root").unwrap().iter().any(|k| k.key_id == key_id));
    }

    #[test]
    fn test_list_keys_requires_known_user() {
        let wallet = active_wallet();
        assert!(matches!(
            wallet.list_keys("ghost"),
            Err(WalletError::UserNotFound { .. })
        ));
    }

    #[test]
    fn test_member_may_list_but_not_administer() {
        let mut wallet = active_wallet();
        wallet.add_user("alice", Role::Member).unwrap();
        wallet.add_key("shared", KeyAlgorithm::Aes256Gcm).unwrap();

        assert_eq!(wallet.list_keys("alice").unwrap().len(), 1);
        assert!(wallet.authorize("alice", OperationClass::KeyAdmin).is_err());
    }

    #[test]
    fn test_record_roundtrip_preserves_operation() {
        let mut wallet = active_wallet();
        let key_id = wallet.add_key("master key", KeyAlgorithm::Ed25519).unwrap();
        let signature = wallet.sign(&key_id, "hello").unwrap();

        // load → mutate → save equivalence: a reloaded record verifies what
        // the original signed
        let json = serde_json::to_string(&wallet).unwrap();
        let reloaded: Wallet = serde_json::from_str(&json).unwrap();
        assert!(reloaded.verify(&key_id, "hello", &signature).unwrap());
    }
}
