//! # Sesame (Cookie Session Login Exercise)
//!
//! `sesame` is a deliberately small login service built for security training.
//! It serves a single path, `/`, that renders a page on `GET` and processes a
//! login form on `POST`.
//!
//! ## Identity Model
//!
//! - **Credentials:** a fixed in-memory store with one administrator and one
//!   guest account. Passwords are compared in plaintext.
//! - **Sessions:** a successful login sets the `session_user` cookie. In the
//!   default `unsigned` mode the cookie is the raw username and is trusted
//!   verbatim on later requests, so any client can claim any identity.
//! - **Content:** the administrator identity sees the protected flag; every
//!   other identity only gets a greeting.
//!
//! ## Hardened Mode
//!
//! Starting the server with `--session-mode signed` switches the cookie to an
//! HMAC-SHA256 signed token. Forged cookies then resolve to the anonymous page.
//! The two modes never mix within one process.

pub mod cli;
pub mod sesame;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
