//! Page selection and rendering for `GET /`.
//!
//! The page only depends on the resolved identity. Whether that identity came
//! from a real login or from a cookie the client wrote itself is invisible here.

use super::{
    credentials::{CredentialStore, Role},
    session::Identity,
};
use askama::Template;
use secrecy::{ExposeSecret, SecretString};

/// What a resolved identity is allowed to see.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Anonymous,
    Guest(String),
    Administrator(String),
}

impl Access {
    #[must_use]
    pub fn classify(identity: Identity, store: &CredentialStore) -> Self {
        match identity {
            Identity::Anonymous => Self::Anonymous,
            Identity::User(username) => match store.role_of(&username) {
                Role::Administrator => Self::Administrator(username),
                Role::Guest => Self::Guest(username),
            },
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Guest(_) => "guest",
            Self::Administrator(_) => "administrator",
        }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginPage;

#[derive(Template)]
#[template(path = "guest.html")]
struct GuestPage<'a> {
    username: &'a str,
}

#[derive(Template)]
#[template(path = "admin.html")]
struct AdminPage<'a> {
    username: &'a str,
    flag: &'a str,
}

/// Render the page for `access`. Usernames are HTML-escaped by the templates.
///
/// # Errors
/// Returns an error if a template fails to render.
pub fn render(access: &Access, secret: &SecretString) -> askama::Result<String> {
    match access {
        Access::Anonymous => LoginPage.render(),
        Access::Guest(username) => GuestPage { username }.render(),
        Access::Administrator(username) => AdminPage {
            username,
            flag: secret.expose_secret(),
        }
        .render(),
    }
}
