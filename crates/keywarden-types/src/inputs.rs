//! Request inputs consumed by the service surface
//!
//! Field names follow the external wire format, so structs rename to
//! camelCase where the Rust field name differs.

use serde::{Deserialize, Serialize};

use crate::{KeyDescriptor, Role};

/// Creation request. Besides the display name it carries forward-compatible
/// metadata fields that the wallet stores verbatim and never interprets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletInput {
    pub name: String,
    #[serde(rename = "hiddenOnUI", default)]
    pub hidden_on_ui: bool,
    #[serde(default)]
    pub customer_ref_id: Option<String>,
    #[serde(default)]
    pub auto_fuel: bool,
}

/// Opaque creation metadata, persisted with the wallet record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletMetadata {
    #[serde(rename = "hiddenOnUI")]
    pub hidden_on_ui: bool,
    pub customer_ref_id: Option<String>,
    pub auto_fuel: bool,
}

impl From<&CreateWalletInput> for WalletMetadata {
    fn from(input: &CreateWalletInput) -> Self {
        Self {
            hidden_on_ui: input.hidden_on_ui,
            customer_ref_id: input.customer_ref_id.clone(),
            auto_fuel: input.auto_fuel,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameWalletInput {
    pub new_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetInput {
    pub keys: Vec<KeyDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUserInput {
    pub user_id: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveUserInput {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddKeyInput {
    pub description: String,
    #[serde(rename = "type")]
    pub algorithm: crate::KeyAlgorithm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveKeyInput {
    pub key_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListKeysInput {
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInput {
    pub key_id: String,
    pub payload: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyInput {
    pub key_id: String,
    pub payload: String,
    pub signature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptInput {
    pub key_id: String,
    pub payload: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptInput {
    pub key_id: String,
    pub ciphertext: String,
}
