//! Credential check for `POST /`.

use super::credentials::CredentialStore;

/// Fixed rejection text. Unknown users and wrong passwords share it.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Accepted(String),
    Rejected,
}

/// Accept the pair iff the stored password equals the submitted one exactly.
#[must_use]
pub fn authenticate(store: &CredentialStore, username: &str, password: &str) -> AuthOutcome {
    match store.lookup(username) {
        Some(expected) if expected == password => AuthOutcome::Accepted(username.to_string()),
        _ => AuthOutcome::Rejected,
    }
}
