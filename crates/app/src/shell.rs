//! The application shell: one auth context, one API client, guarded pages.

use std::sync::Arc;

use armeria_auth::{
    authorize, evaluate, navigate, AuthContext, AuthzError, GuardDecision, Permission, Route,
    Session, SessionGrant,
};
use armeria_client::{ApiClient, Credentials, RequestError, User, Weapon};
use armeria_core::{remove_by_id, DomainError, UserId, WeaponId};
use thiserror::Error;

use crate::Loadable;

#[derive(Debug, Error)]
pub enum ShellError {
    /// Session still hydrating; nothing may be decided yet.
    #[error("session is still loading")]
    Pending,

    #[error("'{from}' is not available; go to '{to}'")]
    Redirected { from: Route, to: Route },

    #[error(transparent)]
    Forbidden(#[from] AuthzError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// The typed name does not match the record; nothing was sent.
    #[error("name does not match '{id}'; deletion cancelled")]
    ConfirmationMismatch { id: String },
}

#[derive(Debug, Clone)]
pub struct Shell {
    auth: Arc<AuthContext>,
    api: ApiClient,
}

impl Shell {
    pub fn new(auth: Arc<AuthContext>, api: ApiClient) -> Self {
        Self { auth, api }
    }

    /// Hydrate the session. Call once at startup.
    pub fn start(&self) {
        self.auth.initialize();
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> Session {
        self.auth.snapshot()
    }

    /// Token to forward with API calls, if any.
    pub fn token(&self) -> Option<String> {
        self.auth.snapshot().token().map(str::to_string)
    }

    /// Log in against the backend. On any failure the session is untouched.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Route, ShellError> {
        let grant = self.api.login(credentials).await?;
        self.auth.login(grant);
        Ok(Route::Home)
    }

    /// Browse without an account.
    pub fn enter_as_guest(&self) -> Route {
        self.auth.login(SessionGrant::guest());
        Route::Home
    }

    pub fn sign_out(&self) -> Route {
        self.auth.logout();
        Route::Login
    }

    /// Guard decision for `path` against the current session.
    pub fn open(&self, path: &str) -> (Route, GuardDecision) {
        navigate(&self.auth.snapshot(), path)
    }

    /// Admit `route` or explain where the guard sends the caller instead.
    pub fn enter(&self, route: &Route) -> Result<Session, ShellError> {
        let session = self.auth.snapshot();
        match evaluate(&session, route.required_roles(), route) {
            GuardDecision::Render => Ok(session),
            GuardDecision::Pending => Err(ShellError::Pending),
            GuardDecision::Redirect(to) => {
                tracing::info!(from = %route, to = %to, "navigation redirected");
                Err(ShellError::Redirected {
                    from: route.clone(),
                    to,
                })
            }
        }
    }

    /// Like [`Shell::enter`], then check an action available on that page.
    pub fn enter_for(&self, route: &Route, permission: Permission) -> Result<Session, ShellError> {
        let session = self.enter(route)?;
        authorize(session.role(), permission)?;
        Ok(session)
    }

    /// Refresh the weapon list page.
    ///
    /// `Ok(false)` means the answer was stale and dropped. A failed fetch is
    /// recorded on the page, not returned.
    pub async fn load_weapons(&self, page: &mut Loadable<Vec<Weapon>>) -> Result<bool, ShellError> {
        let session = self.enter(&Route::Home)?;
        let ticket = page.begin();
        let result = self.api.list_weapons(session.token()).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "weapon list refresh failed");
        }
        Ok(page.finish(ticket, result))
    }

    /// Refresh the user list page. Admins only.
    pub async fn load_users(&self, page: &mut Loadable<Vec<User>>) -> Result<bool, ShellError> {
        let session = self.enter(&Route::Users)?;
        let ticket = page.begin();
        let result = self.api.list_users(session.token()).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "user list refresh failed");
        }
        Ok(page.finish(ticket, result))
    }

    /// Delete a weapon shown on the list page.
    ///
    /// `confirm_name` must equal the listed weapon's name; otherwise no
    /// request is sent and the list stays as it is.
    pub async fn delete_weapon(
        &self,
        page: &mut Loadable<Vec<Weapon>>,
        id: &WeaponId,
        confirm_name: &str,
    ) -> Result<(), ShellError> {
        let session = self.enter_for(&Route::Home, Permission::ManageWeapons)?;
        let listed = page.data().iter().find(|w| &w.id == id).map(|w| w.name.as_str());
        confirm(listed, confirm_name, id.as_str())?;

        self.api.delete_weapon(id, session.token()).await?;
        remove_by_id(page.data_mut(), id);
        tracing::info!(weapon = %id, "weapon deleted");
        Ok(())
    }

    /// Delete a user shown on the users page, with the same name check as
    /// [`Shell::delete_weapon`].
    pub async fn delete_user(
        &self,
        page: &mut Loadable<Vec<User>>,
        id: &UserId,
        confirm_name: &str,
    ) -> Result<(), ShellError> {
        let session = self.enter_for(&Route::Users, Permission::ManageUsers)?;
        let listed = page.data().iter().find(|u| &u.id == id).map(|u| u.name.as_str());
        confirm(listed, confirm_name, id.as_str())?;

        self.api.delete_user(id, session.token()).await?;
        remove_by_id(page.data_mut(), id);
        tracing::info!(user = %id, "user deleted");
        Ok(())
    }
}

fn confirm(listed: Option<&str>, typed: &str, id: &str) -> Result<(), ShellError> {
    match listed {
        Some(name) if name == typed => Ok(()),
        _ => {
            tracing::info!(id, "delete cancelled: name mismatch");
            Err(ShellError::ConfirmationMismatch { id: id.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armeria_auth::{MemorySessionStore, Role};
    use armeria_client::ClientConfig;

    fn shell() -> Shell {
        let auth = Arc::new(AuthContext::new(Arc::new(MemorySessionStore::new())));
        Shell::new(auth, ApiClient::new(ClientConfig::new("http://127.0.0.1:1")))
    }

    #[test]
    fn nothing_is_decided_before_start() {
        let shell = shell();
        assert!(matches!(shell.enter(&Route::Users), Err(ShellError::Pending)));
        assert_eq!(shell.open("/usuarios").1, GuardDecision::Pending);
    }

    #[test]
    fn admin_enters_admin_pages() {
        let shell = shell();
        shell.start();
        shell
            .auth()
            .login(SessionGrant::authenticated("tok123", Role::Admin).unwrap());

        assert!(shell.enter(&Route::Users).is_ok());
        assert_eq!(shell.open("/usuarios").1, GuardDecision::Render);
    }

    #[test]
    fn user_is_redirected_home_from_admin_pages() {
        let shell = shell();
        shell.start();
        shell
            .auth()
            .login(SessionGrant::authenticated("tok123", Role::User).unwrap());

        match shell.enter(&Route::Register) {
            Err(ShellError::Redirected { to, .. }) => assert_eq!(to.path(), "/"),
            other => panic!("expected redirect, got {other:?}"),
        }
    }

    #[test]
    fn anonymous_is_redirected_to_login() {
        let shell = shell();
        shell.start();

        match shell.enter(&Route::CreateWeapon) {
            Err(ShellError::Redirected { to, .. }) => assert_eq!(to, Route::Login),
            other => panic!("expected redirect, got {other:?}"),
        }
    }

    #[test]
    fn guest_browses_but_cannot_manage() {
        let shell = shell();
        shell.start();
        assert_eq!(shell.enter_as_guest(), Route::Home);

        assert!(shell.enter(&Route::Home).is_ok());
        assert!(matches!(
            shell.enter_for(&Route::Home, Permission::ManageWeapons),
            Err(ShellError::Forbidden(_))
        ));
    }

    #[test]
    fn confirmation_must_match_the_listed_name() {
        assert!(confirm(Some("Rifle"), "Rifle", "w1").is_ok());
        assert!(matches!(
            confirm(Some("Rifle"), "rifle", "w1"),
            Err(ShellError::ConfirmationMismatch { .. })
        ));
        assert!(matches!(
            confirm(None, "Rifle", "w1"),
            Err(ShellError::ConfirmationMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn user_cannot_load_the_users_page() {
        let shell = shell();
        shell.start();
        shell
            .auth()
            .login(SessionGrant::authenticated("tok123", Role::User).unwrap());

        let mut page = Loadable::default();
        assert!(matches!(
            shell.load_users(&mut page).await,
            Err(ShellError::Redirected { to: Route::Home, .. })
        ));
        assert!(!page.is_loading());
    }

    #[test]
    fn sign_out_lands_on_login() {
        let shell = shell();
        shell.start();
        shell
            .auth()
            .login(SessionGrant::authenticated("tok123", Role::User).unwrap());

        assert_eq!(shell.sign_out(), Route::Login);
        assert_eq!(shell.session(), Session::anonymous());
        assert!(shell.token().is_none());
    }
}
