use super::{credentials::CredentialStore, session::SessionTokens};
use secrecy::SecretString;

/// Immutable per-process state shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    store: CredentialStore,
    sessions: SessionTokens,
    flag: SecretString,
}

impl AppState {
    #[must_use]
    pub fn new(store: CredentialStore, sessions: SessionTokens, flag: SecretString) -> Self {
        Self {
            store,
            sessions,
            flag,
        }
    }

    #[must_use]
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionTokens {
        &self.sessions
    }

    #[must_use]
    pub fn flag(&self) -> &SecretString {
        &self.flag
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("sessions", &self.sessions)
            .field("flag", &"***")
            .finish()
    }
}
