//! Keywarden Types - canonical domain types for the custodial wallet
//!
//! This crate is the foundation layer: every other keywarden crate depends on
//! it and it depends on none of them. It provides:
//! - Closed role and key-algorithm enumerations with their capability maps
//! - The request input structs consumed by the service surface
//! - The platform error type with stable error codes

pub mod error;
pub mod inputs;
pub mod key;
pub mod role;

pub use error::*;
pub use inputs::*;
pub use key::*;
pub use role::*;
