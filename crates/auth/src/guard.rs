//! Route guard: may this navigation render?

use crate::{Route, RoleSet, Session};

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still hydrating; show a neutral placeholder, do not redirect.
    Pending,
    Render,
    Redirect(Route),
}

/// Decide a navigation to `route` requiring `required`.
///
/// Pure: re-run it on every navigation and on every session change.
pub fn evaluate(session: &Session, required: RoleSet, route: &Route) -> GuardDecision {
    if session.is_loading() {
        return GuardDecision::Pending;
    }

    // Already signed in: the login page sends you home.
    if *route == Route::Login && session.is_authenticated() {
        return GuardDecision::Redirect(Route::Home);
    }

    if required.is_unrestricted() {
        return GuardDecision::Render;
    }

    if !session.is_authenticated() {
        return GuardDecision::Redirect(Route::Login);
    }

    if !required.contains(session.role()) {
        return GuardDecision::Redirect(Route::Home);
    }

    GuardDecision::Render
}

/// Resolve `path` against the route table and decide it.
pub fn navigate(session: &Session, path: &str) -> (Route, GuardDecision) {
    let route = Route::resolve(path);
    let decision = evaluate(session, route.required_roles(), &route);
    (route, decision)
}
