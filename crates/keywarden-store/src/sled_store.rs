//! Sled-backed wallet store
//!
//! Keeps the whole wallet record as one JSON blob under [`WALLET_RECORD_KEY`]
//! and flushes after every save, so a completed `save` is durable and a
//! failed call leaves the previous record in place.

use std::path::Path;

use keywarden_wallet::Wallet;
use tracing::debug;

use crate::{decode, encode, StoreError, StoreResult, WalletStore, WALLET_RECORD_KEY};

pub struct SledWalletStore {
    db: sled::Db,
}

impl SledWalletStore {
    /// Open (or create) the store at the given directory
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = sled::open(path.as_ref()).map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self { db })
    }
}

impl WalletStore for SledWalletStore {
    fn load(&self) -> StoreResult<Option<Wallet>> {
        let record = self
            .db
            .get(WALLET_RECORD_KEY)
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        match record {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn save(&self, wallet: &Wallet) -> StoreResult<()> {
        let bytes = encode(wallet)?;
        let size = bytes.len();

        self.db
            .insert(WALLET_RECORD_KEY, bytes)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        debug!(bytes = size, "wallet record saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keywarden_types::{KeyAlgorithm, Role, WalletMetadata};

    #[test]
    fn test_load_absent_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledWalletStore::open(dir.path()).unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledWalletStore::open(dir.path()).unwrap();

        let mut wallet = Wallet::create("w1", WalletMetadata::default());
        wallet.add_user("root", Role::Admin).unwrap();
        let key_id = wallet.add_key("master key", KeyAlgorithm::Ed25519).unwrap();
        let signature = wallet.sign(&key_id, "hello").unwrap();
        store.save(&wallet).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.name(), "w1");
        assert!(loaded.verify(&key_id, "hello", &signature).unwrap());
    }

    #[test]
    fn test_record_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = SledWalletStore::open(dir.path()).unwrap();
            store
                .save(&Wallet::create("persistent", WalletMetadata::default()))
                .unwrap();
        }
        let store = SledWalletStore::open(dir.path()).unwrap();
        assert_eq!(store.load().unwrap().unwrap().name(), "persistent");
    }

    #[test]
    fn test_save_overwrites_whole_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledWalletStore::open(dir.path()).unwrap();

        store
            .save(&Wallet::create("first", WalletMetadata::default()))
            .unwrap();
        store
            .save(&Wallet::create("second", WalletMetadata::default()))
            .unwrap();

        assert_eq!(store.load().unwrap().unwrap().name(), "second");
    }
}
