use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const CMD_LOGIN: &str = "login";
pub const CMD_SIGNUP: &str = "signup";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_TOKEN: &str = "token";

pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_ADMIN_USERNAME: &str = "admin-username";
pub const ARG_ADMIN_PASSWORD: &str = "admin-password";
pub const ARG_NAME: &str = "name";
pub const ARG_AUTHORITY: &str = "authority";
pub const ARG_BATCH: &str = "batch";

fn username_arg() -> Arg {
    Arg::new(ARG_USERNAME)
        .short('u')
        .long(ARG_USERNAME)
        .help("Account username")
        .env("LMSAUTH_USERNAME")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long(ARG_PASSWORD)
        .help("Account password, only its SHA-256 digest is sent")
        .env("LMSAUTH_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn login() -> Command {
    Command::new(CMD_LOGIN)
        .about("Log in and store the issued token")
        .arg(username_arg())
        .arg(password_arg())
}

#[must_use]
pub fn signup() -> Command {
    Command::new(CMD_SIGNUP)
        .about("Create an account, authorized by an administrator")
        .arg(username_arg())
        .arg(password_arg())
        .arg(
            Arg::new(ARG_ADMIN_USERNAME)
                .long(ARG_ADMIN_USERNAME)
                .help("Username of the administrator authorizing the signup")
                .env("LMSAUTH_ADMIN_USERNAME")
                .required(true),
        )
        .arg(
            Arg::new(ARG_ADMIN_PASSWORD)
                .long(ARG_ADMIN_PASSWORD)
                .help("Administrator password, only its SHA-256 digest is sent")
                .env("LMSAUTH_ADMIN_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_NAME)
                .long(ARG_NAME)
                .help("Display name of the new account")
                .required(true),
        )
        .arg(
            Arg::new(ARG_AUTHORITY)
                .long(ARG_AUTHORITY)
                .help("Authority level of the new account (2 = batch scoped)")
                .required(true)
                .value_parser(clap::value_parser!(u8)),
        )
        .arg(
            Arg::new(ARG_BATCH)
                .long(ARG_BATCH)
                .help("Batch identifier, only sent when --authority is 2"),
        )
}

#[must_use]
pub fn logout() -> Command {
    Command::new(CMD_LOGOUT).about("Remove the stored token")
}

#[must_use]
pub fn token() -> Command {
    Command::new(CMD_TOKEN).about("Print the stored token")
}

/// # Errors
/// Returns an error if `id` is missing.
pub fn read_required(matches: &ArgMatches, id: &str) -> anyhow::Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("missing required argument: --{id}"))
}

/// Like [`read_required`] but wraps the value so it never shows up in `Debug` output.
///
/// # Errors
/// Returns an error if `id` is missing.
pub fn read_secret(matches: &ArgMatches, id: &str) -> anyhow::Result<SecretString> {
    read_required(matches, id).map(SecretString::from)
}
