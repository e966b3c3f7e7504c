pub mod credentials;
pub mod logging;
pub mod session;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};
use std::net::IpAddr;

pub const ARG_PORT: &str = "port";
pub const ARG_ADDRESS: &str = "address";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("sesame")
        .about("Cookie session login exercise")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long(ARG_PORT)
                .help("Port to listen on")
                .default_value("80")
                .env("SESAME_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_ADDRESS)
                .short('a')
                .long(ARG_ADDRESS)
                .help("Address to bind")
                .default_value("0.0.0.0")
                .env("SESAME_ADDRESS")
                .value_parser(clap::value_parser!(IpAddr)),
        );

    let command = credentials::with_args(command);
    let command = session::with_args(command);
    logging::with_args(command)
}
