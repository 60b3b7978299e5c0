//! Client route table.

use armeria_core::{UserId, WeaponId};

use crate::RoleSet;

/// A navigable page, with its path parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    WeaponDetail(WeaponId),
    CreateWeapon,
    EditWeapon(WeaponId),
    Users,
    EditUser(UserId),
    Register,
}

impl Route {
    /// Resolve a path. Anything undeclared (or with a malformed id) falls back
    /// to [`Route::Home`].
    pub fn resolve(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["crear-arma"] => Route::CreateWeapon,
            ["arma", id] => WeaponId::new(*id).map_or(Route::Home, Route::WeaponDetail),
            ["editar-arma", id] => WeaponId::new(*id).map_or(Route::Home, Route::EditWeapon),
            ["usuarios"] => Route::Users,
            ["usuarios", id] => UserId::new(*id).map_or(Route::Home, Route::EditUser),
            ["register"] => Route::Register,
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::WeaponDetail(id) => format!("/arma/{id}"),
            Route::CreateWeapon => "/crear-arma".to_string(),
            Route::EditWeapon(id) => format!("/editar-arma/{id}"),
            Route::Users => "/usuarios".to_string(),
            Route::EditUser(id) => format!("/usuarios/{id}"),
            Route::Register => "/register".to_string(),
        }
    }

    /// Roles admitted by this route.
    pub fn required_roles(&self) -> RoleSet {
        match self {
            Route::Home | Route::Login | Route::WeaponDetail(_) => RoleSet::UNRESTRICTED,
            Route::CreateWeapon | Route::EditWeapon(_) => RoleSet::AUTHENTICATED,
            Route::Users | Route::EditUser(_) | Route::Register => RoleSet::ADMIN_ONLY,
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.path())
    }
}
