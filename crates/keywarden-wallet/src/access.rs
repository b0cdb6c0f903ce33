//! Access control: the user set and the authorization check

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use keywarden_types::{OperationClass, Role, WalletError, WalletResult};

/// An identified principal and its capability level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// The wallet's user set. userIds are unique; once any user exists, the last
/// Admin can never be removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessControl {
    users: Vec<User>,
}

impl AccessControl {
    /// Add a user. Fails if the userId is already present.
    pub fn add_user(&mut self, user_id: impl Into<String>, role: Role) -> WalletResult<()> {
        let user_id = user_id.into();
        if self.user(&user_id).is_some() {
            return Err(WalletError::UserAlreadyExists { user_id });
        }
        self.users.push(User {
            user_id,
            role,
            created_at: Utc::now(),
        });
        Ok(())
    }

    /// Remove a user. Fails if absent, or if the user is the last Admin.
    pub fn remove_user(&mut self, user_id: &str) -> WalletResult<()> {
        let position = self
            .users
            .iter()
            .position(|u| u.user_id == user_id)
            .ok_or_else(|| WalletError::UserNotFound {
                user_id: user_id.to_string(),
            })?;

        if self.users[position].role == Role::Admin && self.admin_count() == 1 {
            return Err(WalletError::LastAdmin {
                user_id: user_id.to_string(),
            });
        }

        self.users.remove(position);
        Ok(())
    }

    /// Allow/deny the given operation class for the given user.
    pub fn authorize(&self, user_id: &str, class: OperationClass) -> WalletResult<()> {
        let user = self.user(user_id).ok_or_else(|| WalletError::UserNotFound {
            user_id: user_id.to_string(),
        })?;

        if user.role.allows(class) {
            Ok(())
        } else {
            Err(WalletError::Unauthorized {
                user_id: user_id.to_string(),
                operation: class.to_string(),
            })
        }
    }

    /// Look up a user by id
    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.user_id == user_id)
    }

    /// All users, in insertion order
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn admin_count(&self) -> usize {
        self.users.iter().filter(|u| u.role == Role::Admin).count()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_user_rejected() {
        let mut access = AccessControl::default();
        access.add_user("alice", Role::Member).unwrap();

        let err = access.add_user("alice", Role::Admin).unwrap_err();
        assert!(matches!(err, WalletError::UserAlreadyExists { .. }));
        // the original role is untouched
        assert_eq!(access.user("alice").unwrap().role, Role::Member);
    }

    #[test]
    fn test_remove_unknown_user() {
        let mut access = AccessControl::default();
        assert!(matches!(
            access.remove_user("ghost"),
            Err(WalletError::UserNotFound { .. })
        ));
    }

    #[test]
    fn test_last_admin_cannot_be_removed() {
        let mut access = AccessControl::default();
        access.add_user("root", Role::Admin).unwrap();
        access.add_user("alice", Role::Member).unwrap();

        let err = access.remove_user("root").unwrap_err();
        assert!(matches!(err, WalletError::LastAdmin { .. }));
        assert!(access.user("root").is_some());
    }

    #[test]
    fn test_sole_admin_is_permanent() {
        let mut access = AccessControl::default();
        access.add_user("root", Role::Admin).unwrap();
        assert!(access.remove_user("root").is_err());
    }

    #[test]
    fn test_admin_removable_while_another_remains() {
        let mut access = AccessControl::default();
        access.add_user("root", Role::Admin).unwrap();
        access.add_user("ops", Role::Admin).unwrap();

        access.remove_user("root").unwrap();
        assert_eq!(access.admin_count(), 1);
    }

    #[test]
    fn test_authorize_posture() {
        let mut access = AccessControl::default();
        access.add_user("root", Role::Admin).unwrap();
        access.add_user("alice", Role::Member).unwrap();

        assert!(access.authorize("root", OperationClass::KeyAdmin).is_ok());
        assert!(access.authorize("alice", OperationClass::KeyUsage).is_ok());
        assert!(matches!(
            access.authorize("alice", OperationClass::UserAdmin),
            Err(WalletError::Unauthorized { .. })
        ));
        assert!(matches!(
            access.authorize("ghost", OperationClass::KeyUsage),
            Err(WalletError::UserNotFound { .. })
        ));
    }
}
