//! `armeria-auth`: client-side authentication and authorization gate.
//!
//! Session persistence, the injected auth context, route protection and the
//! role → capability mapping used to show or hide actions. This crate is
//! decoupled from HTTP: tokens are produced by the API client and handed in
//! through [`SessionGrant`].
//!
//! Everything here is UI policy. The backend re-validates token and role on
//! every request and remains the only security boundary.

pub mod authorize;
pub mod context;
pub mod guard;
pub mod permissions;
pub mod roles;
pub mod routes;
pub mod session;
pub mod store;

pub use authorize::{authorize, can, granted_permissions, AuthzError};
pub use context::AuthContext;
pub use guard::{evaluate, navigate, GuardDecision};
pub use permissions::Permission;
pub use roles::{Role, RoleParseError, RoleSet};
pub use routes::Route;
pub use session::{GrantError, PersistedSession, Session, SessionGrant};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoreError};
