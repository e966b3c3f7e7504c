use crate::sesame::{
    self,
    credentials::CredentialStore,
    session::{SessionMode, SessionTokens},
    AppState,
};
use anyhow::Result;
use rand::{distributions::Alphanumeric, Rng};
use secrecy::SecretString;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tracing::{debug, info};

const GENERATED_SECRET_LEN: usize = 48;

pub struct Args {
    pub address: IpAddr,
    pub port: u16,
    pub flag: SecretString,
    pub admin_username: String,
    pub admin_password: Option<SecretString>,
    pub guest_username: String,
    pub guest_password: SecretString,
    pub session_mode: SessionMode,
    pub session_key: Option<SecretString>,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("address", &self.address)
            .field("port", &self.port)
            .field("flag", &"***")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"***")
            .field("guest_username", &self.guest_username)
            .field("guest_password", &"***")
            .field("session_mode", &self.session_mode)
            .field("session_key", &"***")
            .finish()
    }
}

/// Build the immutable application state from the parsed arguments.
#[must_use]
pub fn state(args: Args) -> AppState {
    let admin_password = args.admin_password.unwrap_or_else(|| {
        info!("No administrator password configured, generated a random one");
        random_secret()
    });

    let store = CredentialStore::new(args.admin_username, admin_password)
        .with_guest(args.guest_username, args.guest_password);

    let sessions = match args.session_mode {
        SessionMode::Unsigned => SessionTokens::Unsigned,
        SessionMode::Signed => SessionTokens::Signed {
            key: args.session_key.unwrap_or_else(|| {
                info!("No session key configured, generated a random one");
                random_secret()
            }),
        },
    };

    AppState::new(store, sessions, args.flag)
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let addr = SocketAddr::new(args.address, args.port);
    let state = Arc::new(state(args));

    debug!("Application state: {:?}", state);
    info!(
        users = state.store().user_count(),
        session_mode = %state.sessions().mode(),
        "Credential store ready"
    );

    sesame::new(addr, state).await
}

fn random_secret() -> SecretString {
    let secret: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LEN)
        .map(char::from)
        .collect();
    SecretString::from(secret)
}
