//! `armeria-core`: shared building blocks for the Armería client.
//!
//! This crate contains **pure** primitives (no IO, no HTTP, no storage).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{remove_by_id, Entity};
pub use error::{DomainError, DomainResult};
pub use id::{UserId, WeaponId};
