//! Keywarden Wallet - the custodial wallet aggregate
//!
//! This crate implements the core of the system:
//! - `AccessControl`: the user set, roles, and the capability map
//! - `KeyRegistry`: the managed key set and its lifecycle
//! - `ops`: stateless dispatch of sign/verify/encrypt/decrypt
//! - `Wallet`: the aggregate root composing the above, persisted as one record
//!
//! Every mutating operation either fully applies or leaves the aggregate
//! untouched, so a caller that skips `save` after a failure has observed
//! "nothing happened".

pub mod access;
pub mod ops;
pub mod registry;
pub mod wallet;

pub use access::*;
pub use registry::*;
pub use wallet::*;
