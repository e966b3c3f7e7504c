//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary executes.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{credentials, session, ARG_ADDRESS, ARG_PORT};
use anyhow::{Context, Result};
use std::net::{IpAddr, Ipv4Addr};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(80);
    let address = matches
        .get_one::<IpAddr>(ARG_ADDRESS)
        .copied()
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    let credentials = credentials::Options::parse(matches).context("invalid credentials")?;
    let session = session::Options::parse(matches);

    Ok(Action::Server(Args {
        address,
        port,
        flag: credentials.flag,
        admin_username: credentials.admin_username,
        admin_password: credentials.admin_password,
        guest_username: credentials.guest_username,
        guest_password: credentials.guest_password,
        session_mode: session.mode,
        session_key: session.key,
    }))
}
