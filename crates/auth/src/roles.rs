use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authorization level of the current session.
///
/// Closed set. The wire/storage names are the upper-case variants used by the
/// backend (`ADMIN`, `USER`, `GUEST`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
            Role::Guest => "GUEST",
        }
    }

    /// Whether this role can only be held together with a bearer token.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Role::Admin | Role::User)
    }

    /// Human-facing label shown in the navigation bar.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::User => "Usuario",
            Role::Guest => "Invitado",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Role::Admin => 0b001,
            Role::User => 0b010,
            Role::Guest => 0b100,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            "GUEST" => Ok(Role::Guest),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

/// Set of roles a route admits.
///
/// The empty set means "unrestricted": anyone may render the route, with or
/// without a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const UNRESTRICTED: RoleSet = RoleSet(0);
    pub const ADMIN_ONLY: RoleSet = RoleSet(0b001);
    pub const AUTHENTICATED: RoleSet = RoleSet(0b011);

    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self(roles.into_iter().fold(0, |acc, r| acc | r.bit()))
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    /// `true` when the set admits every caller (no authentication needed).
    pub fn is_unrestricted(&self) -> bool {
        self.0 == 0
    }
}
