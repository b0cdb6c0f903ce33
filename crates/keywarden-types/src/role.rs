//! Roles and the operation capability map
//!
//! Both sets are closed enumerations so the authorization logic stays
//! exhaustive and statically checkable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::WalletError;

/// Capability level of a wallet user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full control: key and user administration plus key usage
    Admin,
    /// Key usage only: sign, verify, encrypt, decrypt, list keys
    Member,
}

/// Classes of wallet operations, for authorization checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationClass {
    /// sign / verify / encrypt / decrypt / listKeys
    KeyUsage,
    /// addKey / removeKey / reset
    KeyAdmin,
    /// addUser / removeUser
    UserAdmin,
    /// create / rename
    WalletAdmin,
}

impl Role {
    /// Whether this role may perform the given operation class
    pub fn allows(self, class: OperationClass) -> bool {
        match (self, class) {
            (Role::Admin, _) => true,
            (Role::Member, OperationClass::KeyUsage) => true,
            (Role::Member, _) => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Member => write!(f, "member"),
        }
    }
}

impl FromStr for Role {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            other => Err(WalletError::invalid_input(
                "role",
                format!("unknown role '{other}'"),
            )),
        }
    }
}

impl fmt::Display for OperationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationClass::KeyUsage => "use keys",
            OperationClass::KeyAdmin => "administer keys",
            OperationClass::UserAdmin => "administer users",
            OperationClass::WalletAdmin => "administer the wallet",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_allows_everything() {
        for class in [
            OperationClass::KeyUsage,
            OperationClass::KeyAdmin,
            OperationClass::UserAdmin,
            OperationClass::WalletAdmin,
        ] {
            assert!(Role::Admin.allows(class));
        }
    }

    #[test]
    fn test_member_is_usage_only() {
        assert!(Role::Member.allows(OperationClass::KeyUsage));
        assert!(!Role::Member.allows(OperationClass::KeyAdmin));
        assert!(!Role::Member.allows(OperationClass::UserAdmin));
        assert!(!Role::Member.allows(OperationClass::WalletAdmin));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("member".parse::<Role>().unwrap(), Role::Member);
        assert!("owner".parse::<Role>().is_err());
    }
}
