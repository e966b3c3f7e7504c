//! Session cookie minting and resolution.
//!
//! Flow Overview: a successful login mints a `session_user` cookie and every
//! later request resolves that cookie back into an identity. There is no
//! server-side session table in either mode.
//!
//! - `unsigned`: the cookie value is the username itself. Resolution trusts it
//!   verbatim, so a client that sets `session_user=admin` is the administrator.
//! - `signed`: the cookie value is `base64url(username).base64url(mac)` where
//!   `mac` is HMAC-SHA256 over the username. Values that fail verification
//!   resolve to anonymous.

use anyhow::{anyhow, Result};
use axum::http::{header::COOKIE, HeaderMap, HeaderValue};
use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::{fmt, str::FromStr};

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE_NAME: &str = "session_user";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    Unsigned,
    Signed,
}

impl SessionMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unsigned => "unsigned",
            Self::Signed => "signed",
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionMode {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "unsigned" => Ok(Self::Unsigned),
            "signed" => Ok(Self::Signed),
            _ => Err(format!("invalid session mode: {value}")),
        }
    }
}

/// Identity a single request is treated as having.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    User(String),
}

#[derive(Clone)]
pub enum SessionTokens {
    Unsigned,
    Signed { key: SecretString },
}

impl SessionTokens {
    #[must_use]
    pub const fn mode(&self) -> SessionMode {
        match self {
            Self::Unsigned => SessionMode::Unsigned,
            Self::Signed { .. } => SessionMode::Signed,
        }
    }

    /// Turn an authenticated username into a cookie value.
    ///
    /// # Errors
    /// Returns an error if the signing key cannot initialize the MAC.
    pub fn mint(&self, username: &str) -> Result<String> {
        match self {
            Self::Unsigned => Ok(username.to_string()),
            Self::Signed { key } => {
                let mut mac = new_mac(key)?;
                mac.update(username.as_bytes());
                let signature = mac.finalize().into_bytes();
                Ok(format!(
                    "{}.{}",
                    Base64UrlUnpadded::encode_string(username.as_bytes()),
                    Base64UrlUnpadded::encode_string(&signature)
                ))
            }
        }
    }

    /// Turn a cookie value back into the username it claims.
    #[must_use]
    pub fn decode(&self, token: &str) -> Option<String> {
        match self {
            Self::Unsigned => Some(token.to_string()),
            Self::Signed { key } => {
                let (id_part, sig_part) = token.split_once('.')?;
                let username =
                    String::from_utf8(Base64UrlUnpadded::decode_vec(id_part).ok()?).ok()?;
                let signature = Base64UrlUnpadded::decode_vec(sig_part).ok()?;

                let mut mac = new_mac(key).ok()?;
                mac.update(username.as_bytes());
                // verify_slice compares in constant time
                mac.verify_slice(&signature).ok()?;

                Some(username)
            }
        }
    }

    /// Resolve the request cookies into an identity.
    ///
    /// Missing, empty or unreadable cookies resolve to anonymous.
    #[must_use]
    pub fn resolve(&self, headers: &HeaderMap) -> Identity {
        extract_session_token(headers)
            .and_then(|token| self.decode(&token))
            .filter(|username| !username.is_empty())
            .map_or(Identity::Anonymous, Identity::User)
    }

    /// Build the `Set-Cookie` value for a freshly authenticated user.
    ///
    /// # Errors
    /// Returns an error if the token cannot be minted or is not a valid header value.
    pub fn session_cookie(&self, username: &str) -> Result<HeaderValue> {
        let token = self.mint(username)?;
        let cookie = match self {
            Self::Unsigned => format!("{SESSION_COOKIE_NAME}={token}; Path=/"),
            Self::Signed { .. } => {
                format!("{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax")
            }
        };
        HeaderValue::from_str(&cookie).map_err(|err| anyhow!("invalid session cookie: {err}"))
    }
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned => f.debug_struct("Unsigned").finish(),
            Self::Signed { .. } => f.debug_struct("Signed").field("key", &"***").finish(),
        }
    }
}

fn new_mac(key: &SecretString) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(key.expose_secret().as_bytes())
        .map_err(|err| anyhow!("invalid session key: {err}"))
}

fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    // First matching cookie wins when the client sends duplicates.
    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let Some((key, val)) = pair.trim().split_once('=') else {
                continue;
            };
            if key.trim() == SESSION_COOKIE_NAME {
                return Some(val.trim().to_string());
            }
        }
    }
    None
}
