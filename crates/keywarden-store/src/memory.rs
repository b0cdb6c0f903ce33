//! In-memory wallet store for tests and demos
//!
//! Round-trips the record through its serialized form so every `load` yields
//! an independent value, matching the by-value semantics of the real store —
//! mutating a loaded wallet never changes what a later `load` sees.

use std::sync::RwLock;

use keywarden_wallet::Wallet;

use crate::{decode, encode, StoreError, StoreResult, WalletStore};

#[derive(Default)]
pub struct MemoryWalletStore {
    record: RwLock<Option<Vec<u8>>>,
}

impl MemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WalletStore for MemoryWalletStore {
    fn load(&self) -> StoreResult<Option<Wallet>> {
        let record = self
            .record
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        match record.as_deref() {
            Some(bytes) => Ok(Some(decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn save(&self, wallet: &Wallet) -> StoreResult<()> {
        let bytes = encode(wallet)?;
        let mut record = self
            .record
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        *record = Some(bytes);
        Ok(())
    }
}
