//! Navigation bar and per-role action visibility.

use armeria_auth::{can, Permission, Role, Route, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

/// The single session button in the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// "Cerrar sesión": a token is held.
    LogOut,
    /// "Iniciar sesión": anonymous or guest.
    SignIn,
}

impl SessionAction {
    pub fn label(&self) -> &'static str {
        match self {
            SessionAction::LogOut => "Cerrar sesión",
            SessionAction::SignIn => "Iniciar sesión",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    pub role_label: &'static str,
    pub links: Vec<NavLink>,
    pub action: SessionAction,
}

impl NavBar {
    pub fn for_session(session: &Session) -> Self {
        let role_label = if session.is_loading() {
            "Desconocido"
        } else {
            session.role().label()
        };

        let mut links = vec![NavLink {
            label: "Armas",
            route: Route::Home,
        }];
        if !session.is_loading() && can(session.role(), Permission::ManageUsers) {
            links.push(NavLink {
                label: "Usuarios",
                route: Route::Users,
            });
        }

        let action = if session.is_authenticated() {
            SessionAction::LogOut
        } else {
            SessionAction::SignIn
        };

        Self {
            role_label,
            links,
            action,
        }
    }
}

/// Which weapon actions the list page offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponActions {
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

impl WeaponActions {
    pub fn for_role(role: Role) -> Self {
        let manage = can(role, Permission::ManageWeapons);
        Self {
            create: manage,
            edit: manage,
            delete: manage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armeria_auth::SessionGrant;

    #[test]
    fn admin_sees_users_link_and_logout() {
        let s = Session::from_grant(&SessionGrant::authenticated("t", Role::Admin).unwrap());
        let bar = NavBar::for_session(&s);

        assert_eq!(bar.role_label, "Administrador");
        assert!(bar.links.iter().any(|l| l.route == Route::Users));
        assert_eq!(bar.action, SessionAction::LogOut);
    }

    #[test]
    fn user_has_no_users_link() {
        let s = Session::from_grant(&SessionGrant::authenticated("t", Role::User).unwrap());
        let bar = NavBar::for_session(&s);

        assert_eq!(bar.role_label, "Usuario");
        assert_eq!(bar.links.len(), 1);
    }

    #[test]
    fn guest_is_offered_sign_in() {
        let bar = NavBar::for_session(&Session::from_grant(&SessionGrant::guest()));
        assert_eq!(bar.role_label, "Invitado");
        assert_eq!(bar.action, SessionAction::SignIn);
        assert_eq!(bar.action.label(), "Iniciar sesión");
    }

    #[test]
    fn loading_shows_unknown_role() {
        assert_eq!(NavBar::for_session(&Session::unloaded()).role_label, "Desconocido");
    }

    #[test]
    fn guests_cannot_touch_weapons() {
        assert_eq!(
            WeaponActions::for_role(Role::Guest),
            WeaponActions {
                create: false,
                edit: false,
                delete: false
            }
        );
        assert!(WeaponActions::for_role(Role::User).delete);
    }
}
