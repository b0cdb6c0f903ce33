//! Keywarden Store - persistence of the single wallet record
//!
//! The storage contract is deliberately small: atomic get/put of one opaque
//! blob under a fixed key. `load` returning `None` is a normal outcome (no
//! wallet has been created yet), distinct from a backend error.

pub mod memory;
pub mod sled_store;

pub use memory::MemoryWalletStore;
pub use sled_store::SledWalletStore;

use keywarden_types::WalletError;
use keywarden_wallet::Wallet;
use thiserror::Error;

/// Fixed storage key of the one wallet record per deployment
pub const WALLET_RECORD_KEY: &[u8] = b"wallet";

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("wallet record codec error: {0}")]
    Codec(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for WalletError {
    fn from(err: StoreError) -> Self {
        WalletError::Storage(err.to_string())
    }
}

/// Load/save of the wallet record, whole-record at a time
pub trait WalletStore {
    /// The persisted record, or `None` if no wallet exists yet
    fn load(&self) -> StoreResult<Option<Wallet>>;

    /// Atomically overwrite the entire record
    fn save(&self, wallet: &Wallet) -> StoreResult<()>;
}

pub(crate) fn encode(wallet: &Wallet) -> StoreResult<Vec<u8>> {
    serde_json::to_vec(wallet).map_err(|e| StoreError::Codec(e.to_string()))
}

pub(crate) fn decode(bytes: &[u8]) -> StoreResult<Wallet> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Codec(e.to_string()))
}
