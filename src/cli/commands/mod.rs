pub mod account;
pub mod client;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("lmsauth")
        .about("LMS credential client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(account::login())
        .subcommand(account::signup())
        .subcommand(account::logout())
        .subcommand(account::token());

    let command = client::with_args(command);
    logging::with_args(command)
}

/// Every environment variable the command reads.
#[cfg(test)]
pub(crate) const ENV_VARS: [&str; 12] = [
    "LMSAUTH_URL",
    "LMSAUTH_AUTH_PATH",
    "LMSAUTH_DASHBOARD",
    "LMSAUTH_STORAGE_KEY",
    "LMSAUTH_STORAGE_FILE",
    "LMSAUTH_REJECT_EMPTY",
    "LMSAUTH_SECRET",
    "LMSAUTH_USERNAME",
    "LMSAUTH_PASSWORD",
    "LMSAUTH_ADMIN_USERNAME",
    "LMSAUTH_ADMIN_PASSWORD",
    "LMSAUTH_LOG_LEVEL",
];

/// Run `f` with every `LMSAUTH_*` variable unset.
#[cfg(test)]
pub(crate) fn without_env<R>(f: impl FnOnce() -> R) -> R {
    temp_env::with_vars(ENV_VARS.map(|key| (key, None::<&str>)), f)
}
