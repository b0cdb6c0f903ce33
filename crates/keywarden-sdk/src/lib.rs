//! Keywarden SDK - the host-transaction surface of the wallet
//!
//! `WalletService` exposes one method per external operation. Every call
//! follows the strict `load → mutate → save` pattern: the record is reloaded
//! from the store, exactly one wallet operation runs against it, and the
//! record is written back only if that operation succeeded. A failed call
//! therefore persists nothing.
//!
//! `Ok` is the caller's emit channel, `Err` its abort channel; the service
//! itself never prints or aborts.

pub use keywarden_store::{MemoryWalletStore, SledWalletStore, WalletStore};
pub use keywarden_types::*;
pub use keywarden_wallet::Wallet;

use tracing::info;

pub struct WalletService<S: WalletStore> {
    store: S,
}

impl<S: WalletStore> WalletService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // ── Wallet lifecycle ─────────────────────────────────────────────────

    /// One-time creation. Rejects if a wallet record already exists.
    pub fn create_wallet(&self, input: &CreateWalletInput) -> WalletResult<()> {
        if self.store.load()?.is_some() {
            return Err(WalletError::WalletAlreadyExists);
        }
        let wallet = Wallet::create(&input.name, WalletMetadata::from(input));
        self.store.save(&wallet)?;
        info!(name = %input.name, "wallet created");
        Ok(())
    }

    /// Rename the wallet. A missing wallet is a silent no-op.
    pub fn rename_wallet(&self, input: &RenameWalletInput) -> WalletResult<()> {
        let Some(mut wallet) = self.store.load()? else {
            return Ok(());
        };
        wallet.rename(&input.new_name);
        self.store.save(&wallet)?;
        Ok(())
    }

    /// Atomically replace the whole key set. Nothing is persisted if any
    /// descriptor fails to generate.
    pub fn reset(&self, input: &ResetInput) -> WalletResult<Vec<String>> {
        let mut wallet = self.load_existing()?;
        let key_ids = wallet.reset(&input.keys)?;
        self.store.save(&wallet)?;
        info!(keys = key_ids.len(), "wallet key set reset");
        Ok(key_ids)
    }

    // ── User administration ──────────────────────────────────────────────

    pub fn add_user(&self, input: &AddUserInput) -> WalletResult<()> {
        let mut wallet = self.load_existing()?;
        wallet.add_user(&input.user_id, input.role)?;
        self.store.save(&wallet)?;
        info!(user_id = %input.user_id, role = %input.role, "user added");
        Ok(())
    }

    pub fn remove_user(&self, input: &RemoveUserInput) -> WalletResult<()> {
        let mut wallet = self.load_existing()?;
        wallet.remove_user(&input.user_id)?;
        self.store.save(&wallet)?;
        info!(user_id = %input.user_id, "user removed");
        Ok(())
    }

    // ── Key administration ───────────────────────────────────────────────

    /// Add a key; emits the system-generated keyId.
    pub fn add_key(&self, input: &AddKeyInput) -> WalletResult<String> {
        let mut wallet = self.load_existing()?;
        let key_id = wallet.add_key(&input.description, input.algorithm)?;
        self.store.save(&wallet)?;
        info!(key_id = %key_id, algorithm = %input.algorithm, "key added");
        Ok(key_id)
    }

    pub fn remove_key(&self, input: &RemoveKeyInput) -> WalletResult<()> {
        let mut wallet = self.load_existing()?;
        wallet.remove_key(&input.key_id)?;
        self.store.save(&wallet)?;
        info!(key_id = %input.key_id, "key removed");
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn list_keys(&self, input: &ListKeysInput) -> WalletResult<Vec<KeyInfo>> {
        self.load_existing()?.list_keys(&input.user)
    }

    pub fn sign(&self, input: &SignInput) -> WalletResult<String> {
        self.load_existing()?.sign(&input.key_id, &input.payload)
    }

    pub fn verify(&self, input: &VerifyInput) -> WalletResult<bool> {
        self.load_existing()?
            .verify(&input.key_id, &input.payload, &input.signature)
    }

    pub fn encrypt(&self, input: &EncryptInput) -> WalletResult<String> {
        self.load_existing()?.encrypt(&input.key_id, &input.payload)
    }

    pub fn decrypt(&self, input: &DecryptInput) -> WalletResult<String> {
        self.load_existing()?
            .decrypt(&input.key_id, &input.ciphertext)
    }

    fn load_existing(&self) -> WalletResult<Wallet> {
        self.store.load()?.ok_or(WalletError::WalletNotFound)
    }
}
