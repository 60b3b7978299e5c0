//! Session model: what the client knows about who is signed in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// In-memory session snapshot.
///
/// Invariants (upheld by the constructors, fields are private):
/// - `token` is `Some` iff `role` is authenticated (`Admin`/`User`).
/// - `loading` is only `true` for the value produced by [`Session::unloaded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    role: Role,
    loading: bool,
}

impl Session {
    /// Pre-hydration placeholder. Role/token are provisional while loading.
    pub fn unloaded() -> Self {
        Self {
            token: None,
            role: Role::Guest,
            loading: true,
        }
    }

    /// The unauthenticated sentinel: no token, guest role.
    pub fn anonymous() -> Self {
        Self {
            token: None,
            role: Role::Guest,
            loading: false,
        }
    }

    pub fn from_grant(grant: &SessionGrant) -> Self {
        match grant {
            SessionGrant::Authenticated { token, role } => Self {
                token: Some(token.clone()),
                role: *role,
                loading: false,
            },
            SessionGrant::Guest => Self::anonymous(),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrantError {
    #[error("an authenticated session needs a non-empty token")]
    EmptyToken,

    #[error("role '{0}' cannot hold a token")]
    NotAnAuthenticatedRole(Role),
}

/// Validated input to [`crate::AuthContext::login`].
///
/// Guest sessions are explicit instead of being encoded as an empty token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionGrant {
    Authenticated { token: String, role: Role },
    Guest,
}

impl SessionGrant {
    pub fn authenticated(token: impl Into<String>, role: Role) -> Result<Self, GrantError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(GrantError::EmptyToken);
        }
        if !role.is_authenticated() {
            return Err(GrantError::NotAnAuthenticatedRole(role));
        }
        Ok(Self::Authenticated { token, role })
    }

    pub fn guest() -> Self {
        Self::Guest
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            SessionGrant::Authenticated { token, .. } => Some(token),
            SessionGrant::Guest => None,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            SessionGrant::Authenticated { role, .. } => *role,
            SessionGrant::Guest => Role::Guest,
        }
    }
}

/// On-disk record. Both fields are written together as one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: Option<String>,
    pub rol: Role,
}

impl PersistedSession {
    /// Re-validate a stored record; a record that breaks the token/role
    /// pairing is rejected rather than trusted.
    pub fn into_grant(self) -> Result<SessionGrant, GrantError> {
        match (self.token, self.rol) {
            (None, Role::Guest) => Ok(SessionGrant::Guest),
            (Some(t), Role::Guest) if t.is_empty() => Ok(SessionGrant::Guest),
            (Some(_), Role::Guest) => Err(GrantError::NotAnAuthenticatedRole(Role::Guest)),
            (None, _) => Err(GrantError::EmptyToken),
            (Some(t), role) => SessionGrant::authenticated(t, role),
        }
    }
}

impl From<&SessionGrant> for PersistedSession {
    fn from(grant: &SessionGrant) -> Self {
        Self {
            token: grant.token().map(str::to_string),
            rol: grant.role(),
        }
    }
}
