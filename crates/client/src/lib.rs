//! `armeria-client`: typed access to the Armería REST backend.
//!
//! Every call is one best-effort round trip: no retries, no timeouts, no
//! caching. Loading and error presentation belong to the caller.

pub mod armas;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod usuarios;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::RequestError;
pub use models::{
    Category, Condition, Credentials, Creator, CreatorProfile, NewUser, NewWeapon, User,
    UserUpdate, Weapon, WeaponPatch,
};
