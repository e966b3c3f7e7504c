//! Fixed in-memory credential store.
//!
//! Exactly one record belongs to the administrator. Every other username,
//! including ones that were never registered, is guest-class.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Administrator,
    Guest,
}

#[derive(Clone)]
pub struct CredentialStore {
    admin_username: String,
    records: HashMap<String, SecretString>,
}

impl CredentialStore {
    /// Build the store from the administrator record.
    #[must_use]
    pub fn new(admin_username: String, admin_password: SecretString) -> Self {
        let mut records = HashMap::new();
        records.insert(admin_username.clone(), admin_password);
        Self {
            admin_username,
            records,
        }
    }

    /// Add a guest-class record. A record named after the administrator is
    /// ignored so the privileged password cannot be replaced.
    #[must_use]
    pub fn with_guest(mut self, username: String, password: SecretString) -> Self {
        if username != self.admin_username {
            self.records.insert(username, password);
        }
        self
    }

    pub fn lookup(&self, username: &str) -> Option<&str> {
        self.records.get(username).map(|password| password.expose_secret())
    }

    #[must_use]
    pub fn role_of(&self, username: &str) -> Role {
        if username == self.admin_username {
            Role::Administrator
        } else {
            Role::Guest
        }
    }

    #[must_use]
    pub fn admin_username(&self) -> &str {
        &self.admin_username
    }

    #[must_use]
    pub fn user_count(&self) -> usize {
        self.records.len()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut usernames: Vec<&String> = self.records.keys().collect();
        usernames.sort();
        f.debug_struct("CredentialStore")
            .field("admin_username", &self.admin_username)
            .field("usernames", &usernames)
            .finish()
    }
}
