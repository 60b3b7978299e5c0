//! The auth context: single source of truth for the current session.
//!
//! Constructed explicitly and passed to whoever needs it (no global). State
//! lives in a `watch` channel: every mutation swaps the whole [`Session`], so a
//! half-applied login is never observable, and subscribers wake on change.

use std::sync::Arc;

use tokio::sync::watch;

use crate::{PersistedSession, Session, SessionGrant, SessionStore};

pub struct AuthContext {
    store: Arc<dyn SessionStore>,
    state: watch::Sender<Session>,
}

impl AuthContext {
    /// Create an unloaded context. Call [`AuthContext::initialize`] before
    /// trusting any guard decision.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (state, _) = watch::channel(Session::unloaded());
        Self { store, state }
    }

    /// Hydrate from the store. Only the first call has an effect.
    ///
    /// A missing, unreadable or inconsistent record all end in the anonymous
    /// session; hydration itself never fails.
    pub fn initialize(&self) {
        if !self.state.borrow().is_loading() {
            return;
        }

        let applied = self.state.send_if_modified(|current| {
            if current.is_loading() {
                *current = self.hydrate();
                true
            } else {
                false
            }
        });

        if applied {
            let snapshot = self.snapshot();
            tracing::info!(
                role = %snapshot.role(),
                authenticated = snapshot.is_authenticated(),
                "session hydrated"
            );
        }
    }

    fn hydrate(&self) -> Session {
        match self.store.load() {
            Ok(Some(record)) => match record.into_grant() {
                Ok(grant) => Session::from_grant(&grant),
                Err(err) => {
                    tracing::warn!(error = %err, "discarding inconsistent persisted session");
                    Session::anonymous()
                }
            },
            Ok(None) => {
                tracing::debug!("no persisted session");
                Session::anonymous()
            }
            Err(err) => {
                tracing::warn!(error = %err, "session storage unreadable; starting anonymous");
                Session::anonymous()
            }
        }
    }

    /// Start a session and persist it.
    ///
    /// If the store rejects the write the session still applies for this
    /// process; it just won't survive a restart.
    pub fn login(&self, grant: SessionGrant) {
        // The store is written while the state lock is held, so concurrent
        // writers leave memory and disk agreeing on the last session.
        self.state.send_modify(|current| {
            if let Err(err) = self.store.save(&PersistedSession::from(&grant)) {
                tracing::warn!(error = %err, "could not persist session; keeping it in memory only");
            }
            *current = Session::from_grant(&grant);
        });
        tracing::info!(role = %grant.role(), "session started");
    }

    /// Drop the session and its persisted copy. Always succeeds.
    pub fn logout(&self) {
        self.state.send_modify(|current| {
            if let Err(err) = self.store.clear() {
                tracing::warn!(error = %err, "could not clear persisted session");
            }
            *current = Session::anonymous();
        });
        tracing::info!("session ended");
    }

    /// Synchronous read of the current session.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receiver that observes every subsequent session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }
}

impl core::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let session = self.state.borrow();
        f.debug_struct("AuthContext")
            .field("role", &session.role())
            .field("authenticated", &session.is_authenticated())
            .field("loading", &session.is_loading())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemorySessionStore, Role, StoreError};
    use proptest::prelude::*;

    /// Store whose medium has gone away (quota exceeded, storage disabled).
    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn load(&self) -> Result<Option<PersistedSession>, StoreError> {
            Err(StoreError::Unavailable)
        }
        fn save(&self, _: &PersistedSession) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
        fn clear(&self) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    fn ready(store: Arc<dyn SessionStore>) -> AuthContext {
        let ctx = AuthContext::new(store);
        ctx.initialize();
        ctx
    }

    /// Simulates a page reload: a fresh context over the same store.
    fn reload(store: &Arc<MemorySessionStore>) -> Session {
        ready(store.clone()).snapshot()
    }

    #[test]
    fn starts_loading_until_initialized() {
        let ctx = AuthContext::new(Arc::new(MemorySessionStore::new()));
        assert!(ctx.snapshot().is_loading());

        ctx.initialize();
        assert_eq!(ctx.snapshot(), Session::anonymous());
    }

    #[test]
    fn initialize_runs_once() {
        let store = Arc::new(MemorySessionStore::new());
        let ctx = ready(store.clone());

        // A record appearing later must not re-hydrate or flip loading back.
        store
            .save(&PersistedSession::from(
                &SessionGrant::authenticated("late", Role::Admin).unwrap(),
            ))
            .unwrap();
        ctx.initialize();

        assert_eq!(ctx.snapshot(), Session::anonymous());
        assert!(!ctx.snapshot().is_loading());
    }

    #[test]
    fn hydrates_from_persisted_record() {
        let grant = SessionGrant::authenticated("tok123", Role::User).unwrap();
        let store = Arc::new(MemorySessionStore::with_record(PersistedSession::from(&grant)));
        let ctx = ready(store);

        assert_eq!(ctx.snapshot().token(), Some("tok123"));
        assert_eq!(ctx.snapshot().role(), Role::User);
    }

    #[test]
    fn inconsistent_record_hydrates_anonymous() {
        let store = Arc::new(MemorySessionStore::with_record(PersistedSession {
            token: None,
            rol: Role::Admin,
        }));
        assert_eq!(ready(store).snapshot(), Session::anonymous());
    }

    #[test]
    fn logout_clears_memory_and_store() {
        let store = Arc::new(MemorySessionStore::new());
        let ctx = ready(store.clone());
        ctx.login(SessionGrant::authenticated("tok123", Role::Admin).unwrap());

        ctx.logout();
        assert_eq!(ctx.snapshot(), Session::anonymous());
        assert!(store.load().unwrap().is_none());
        assert_eq!(reload(&store), Session::anonymous());
    }

    #[test]
    fn logout_is_idempotent() {
        let store = Arc::new(MemorySessionStore::new());
        let ctx = ready(store.clone());
        ctx.login(SessionGrant::authenticated("tok123", Role::User).unwrap());

        ctx.logout();
        let once = ctx.snapshot();
        ctx.logout();
        assert_eq!(ctx.snapshot(), once);
        assert_eq!(reload(&store), once);
    }

    #[test]
    fn storage_failure_degrades_to_memory_only() {
        let ctx = ready(Arc::new(BrokenStore));
        assert_eq!(ctx.snapshot(), Session::anonymous());

        ctx.login(SessionGrant::authenticated("tok123", Role::Admin).unwrap());
        assert_eq!(ctx.snapshot().role(), Role::Admin);

        ctx.logout();
        assert_eq!(ctx.snapshot(), Session::anonymous());
    }

    #[test]
    fn subscribers_see_login_and_logout() {
        let ctx = ready(Arc::new(MemorySessionStore::new()));
        let mut rx = ctx.subscribe();
        assert!(!rx.has_changed().unwrap());

        ctx.login(SessionGrant::authenticated("tok123", Role::User).unwrap());
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().role(), Role::User);

        ctx.logout();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Session::anonymous());
    }

    #[test]
    fn concurrent_writers_keep_memory_and_store_in_step() {
        let store = Arc::new(MemorySessionStore::new());
        let ctx = Arc::new(ready(store.clone()));

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let ctx = ctx.clone();
                std::thread::spawn(move || {
                    let role = if i % 2 == 0 { Role::Admin } else { Role::User };
                    for n in 0..200 {
                        if n % 3 == 0 {
                            ctx.logout();
                        } else {
                            let token = format!("tok-{i}-{n}");
                            ctx.login(SessionGrant::authenticated(token, role).unwrap());
                        }
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }

        assert_eq!(reload(&store), ctx.snapshot());
    }

    fn any_grant() -> impl Strategy<Value = SessionGrant> {
        prop_oneof![
            Just(SessionGrant::Guest),
            ("[A-Za-z0-9._-]{1,64}", prop_oneof![Just(Role::Admin), Just(Role::User)])
                .prop_map(|(t, r)| SessionGrant::authenticated(t, r).unwrap()),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: login followed by a reload restores exactly the granted
        /// token and role.
        #[test]
        fn login_survives_reload(grant in any_grant()) {
            let store = Arc::new(MemorySessionStore::new());
            ready(store.clone()).login(grant.clone());

            let reloaded = reload(&store);
            prop_assert_eq!(reloaded.token(), grant.token());
            prop_assert_eq!(reloaded.role(), grant.role());
            prop_assert!(!reloaded.is_loading());
        }

        /// Property: whatever happened before, logout then reload is anonymous.
        #[test]
        fn logout_then_reload_is_anonymous(grants in prop::collection::vec(any_grant(), 0..5)) {
            let store = Arc::new(MemorySessionStore::new());
            let ctx = ready(store.clone());
            for g in grants {
                ctx.login(g);
            }
            ctx.logout();

            prop_assert_eq!(reload(&store), Session::anonymous());
        }
    }
}
