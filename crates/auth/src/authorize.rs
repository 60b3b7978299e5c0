use thiserror::Error;

use crate::{Permission, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: role '{role}' lacks permission '{permission}'")]
    Forbidden { role: Role, permission: Permission },
}

/// Permissions granted to a role.
///
/// Guests browse, users manage the inventory, admins additionally manage
/// accounts.
pub fn granted_permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => &[
            Permission::ViewWeapons,
            Permission::ManageWeapons,
            Permission::ManageUsers,
        ],
        Role::User => &[Permission::ViewWeapons, Permission::ManageWeapons],
        Role::Guest => &[Permission::ViewWeapons],
    }
}

/// Check whether `role` may use `required`.
///
/// - No IO
/// - No panics
pub fn authorize(role: Role, required: Permission) -> Result<(), AuthzError> {
    if granted_permissions(role).contains(&required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            role,
            permission: required,
        })
    }
}

/// Boolean form of [`authorize`] for show/hide decisions.
pub fn can(role: Role, required: Permission) -> bool {
    authorize(role, required).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guests_only_view() {
        assert!(can(Role::Guest, Permission::ViewWeapons));
        assert_eq!(
            authorize(Role::Guest, Permission::ManageWeapons),
            Err(AuthzError::Forbidden {
                role: Role::Guest,
                permission: Permission::ManageWeapons
            })
        );
        assert!(!can(Role::Guest, Permission::ManageUsers));
    }

    #[test]
    fn users_manage_weapons_but_not_accounts() {
        assert!(can(Role::User, Permission::ManageWeapons));
        assert!(!can(Role::User, Permission::ManageUsers));
    }

    #[test]
    fn admins_hold_everything() {
        for p in [
            Permission::ViewWeapons,
            Permission::ManageWeapons,
            Permission::ManageUsers,
        ] {
            assert!(can(Role::Admin, p), "admin should hold {p}");
        }
    }

    #[test]
    fn forbidden_message_names_role_and_permission() {
        let err = authorize(Role::User, Permission::ManageUsers).unwrap_err();
        assert_eq!(
            err.to_string(),
            "forbidden: role 'USER' lacks permission 'users.write'"
        );
    }
}
