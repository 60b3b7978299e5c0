//! `armeria-app`
//!
//! **Responsibility:** wire the auth gate and the API client into pages.
//!
//! This crate provides:
//! - The [`Shell`]: hydration, sign-in/out, guarded navigation
//! - Stale-safe page state ([`Loadable`])
//! - The navigation bar model ([`NavBar`])
//!
//! The `armeria` binary is a **thin shell** over these pieces.

pub mod nav;
pub mod page;
pub mod settings;
pub mod shell;

pub use nav::{NavBar, NavLink, SessionAction, WeaponActions};
pub use page::{Loadable, Ticket};
pub use settings::Settings;
pub use shell::{Shell, ShellError};
