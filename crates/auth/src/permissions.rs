use serde::{Deserialize, Serialize};

/// UI capability gated by role.
///
/// Named in `module.action` form so they read the same in logs as the
/// backend's own policy names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// List and open weapon records.
    ViewWeapons,
    /// Create, edit and delete weapon records.
    ManageWeapons,
    /// List, register, edit and delete users.
    ManageUsers,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewWeapons => "weapons.read",
            Permission::ManageWeapons => "weapons.write",
            Permission::ManageUsers => "users.write",
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
