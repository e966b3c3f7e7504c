use anyhow::{anyhow, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_FLAG: &str = "flag";
pub const ARG_ADMIN_USERNAME: &str = "admin-username";
pub const ARG_ADMIN_PASSWORD: &str = "admin-password";
pub const ARG_GUEST_USERNAME: &str = "guest-username";
pub const ARG_GUEST_PASSWORD: &str = "guest-password";

pub struct Options {
    pub flag: SecretString,
    pub admin_username: String,
    pub admin_password: Option<SecretString>,
    pub guest_username: String,
    pub guest_password: SecretString,
}

impl Options {
    /// Read the credential arguments.
    ///
    /// # Errors
    /// Returns an error if the flag is missing or the guest account would
    /// shadow the administrator.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let flag = matches
            .get_one::<String>(ARG_FLAG)
            .cloned()
            .ok_or_else(|| anyhow!("missing required argument: --{ARG_FLAG}"))?;
        let admin_username = matches
            .get_one::<String>(ARG_ADMIN_USERNAME)
            .cloned()
            .unwrap_or_else(|| "admin".to_string());
        let guest_username = matches
            .get_one::<String>(ARG_GUEST_USERNAME)
            .cloned()
            .unwrap_or_else(|| "guest".to_string());

        if guest_username == admin_username {
            return Err(anyhow!(
                "--{ARG_GUEST_USERNAME} must differ from --{ARG_ADMIN_USERNAME}"
            ));
        }

        Ok(Self {
            flag: SecretString::from(flag),
            admin_username,
            admin_password: matches
                .get_one::<String>(ARG_ADMIN_PASSWORD)
                .cloned()
                .map(SecretString::from),
            guest_username,
            guest_password: SecretString::from(
                matches
                    .get_one::<String>(ARG_GUEST_PASSWORD)
                    .cloned()
                    .unwrap_or_else(|| "password".to_string()),
            ),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_FLAG)
                .long(ARG_FLAG)
                .help("Secret disclosed to the administrator")
                .env("FLAG")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_ADMIN_USERNAME)
                .long(ARG_ADMIN_USERNAME)
                .help("Administrator username")
                .env("SESAME_ADMIN_USERNAME")
                .default_value("admin"),
        )
        .arg(
            Arg::new(ARG_ADMIN_PASSWORD)
                .long(ARG_ADMIN_PASSWORD)
                .help("Administrator password (random when unset)")
                .env("SESAME_ADMIN_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_GUEST_USERNAME)
                .long(ARG_GUEST_USERNAME)
                .help("Guest username")
                .env("SESAME_GUEST_USERNAME")
                .default_value("guest"),
        )
        .arg(
            Arg::new(ARG_GUEST_PASSWORD)
                .long(ARG_GUEST_PASSWORD)
                .help("Guest password")
                .env("SESAME_GUEST_PASSWORD")
                .hide_env_values(true)
                .default_value("password"),
        )
}
