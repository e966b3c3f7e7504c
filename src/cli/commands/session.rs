use crate::sesame::session::SessionMode;
use clap::{builder::ValueParser, Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_SESSION_MODE: &str = "session-mode";
pub const ARG_SESSION_KEY: &str = "session-key";

pub struct Options {
    pub mode: SessionMode,
    pub key: Option<SecretString>,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            mode: matches
                .get_one::<SessionMode>(ARG_SESSION_MODE)
                .copied()
                .unwrap_or(SessionMode::Unsigned),
            key: matches
                .get_one::<String>(ARG_SESSION_KEY)
                .cloned()
                .map(SecretString::from),
        }
    }
}

#[must_use]
pub fn validator_session_mode() -> ValueParser {
    ValueParser::from(|mode: &str| mode.parse::<SessionMode>())
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SESSION_MODE)
                .long(ARG_SESSION_MODE)
                .help("Session cookie format: unsigned (raw username) or signed (HMAC-SHA256)")
                .env("SESAME_SESSION_MODE")
                .default_value("unsigned")
                .value_parser(validator_session_mode()),
        )
        .arg(
            Arg::new(ARG_SESSION_KEY)
                .long(ARG_SESSION_KEY)
                .help("HMAC key for signed sessions (random when unset)")
                .env("SESAME_SESSION_KEY")
                .hide_env_values(true),
        )
}
