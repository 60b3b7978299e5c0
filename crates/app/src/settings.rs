//! Runtime settings for the shell.

use std::path::PathBuf;
use std::sync::Arc;

use armeria_auth::{FileSessionStore, MemorySessionStore, SessionStore};
use armeria_client::ClientConfig;
use armeria_observability::LogFormat;

#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ClientConfig,
    /// Where the session record lives. `None` means the platform default.
    pub session_file: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Settings {
    /// `<data dir>/armeria/session.json`, if the platform has a data dir.
    pub fn default_session_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("armeria").join("session.json"))
    }

    /// Open the session store; without any usable path the session lives in
    /// memory for this run only.
    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        match self.session_file.clone().or_else(Self::default_session_path) {
            Some(path) => {
                let store = FileSessionStore::new(path);
                tracing::debug!(path = %store.path().display(), "using file session store");
                Arc::new(store)
            }
            None => {
                tracing::warn!("no data directory; session will not persist");
                Arc::new(MemorySessionStore::new())
            }
        }
    }
}
