//! Maps validated CLI matches to an [`Action`].

use crate::auth::{Authority, SignupForm};
use crate::cli::actions::{login, session, signup, Action};
use crate::cli::commands::{
    account::{
        read_required, read_secret, ARG_ADMIN_PASSWORD, ARG_ADMIN_USERNAME, ARG_AUTHORITY,
        ARG_BATCH, ARG_NAME, ARG_PASSWORD, ARG_USERNAME, CMD_LOGIN, CMD_LOGOUT, CMD_SIGNUP,
        CMD_TOKEN,
    },
    client,
};
use anyhow::{anyhow, Context, Result};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the URL is invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let client = client::Options::parse(matches)?;

    match matches.subcommand() {
        Some((CMD_LOGIN, sub_m)) => Ok(Action::Login(login::Args {
            client,
            username: read_required(sub_m, ARG_USERNAME)?,
            password: read_secret(sub_m, ARG_PASSWORD)?,
        })),
        Some((CMD_SIGNUP, sub_m)) => {
            let authority = sub_m
                .get_one::<u8>(ARG_AUTHORITY)
                .copied()
                .map(Authority::from)
                .context("missing required argument: --authority")?;

            Ok(Action::Signup(signup::Args {
                client,
                form: SignupForm {
                    username: read_required(sub_m, ARG_USERNAME)?,
                    password: read_secret(sub_m, ARG_PASSWORD)?,
                    admin_username: read_required(sub_m, ARG_ADMIN_USERNAME)?,
                    admin_password: read_secret(sub_m, ARG_ADMIN_PASSWORD)?,
                    name: read_required(sub_m, ARG_NAME)?,
                    authority,
                    batch: sub_m.get_one::<String>(ARG_BATCH).cloned(),
                },
            }))
        }
        Some((CMD_LOGOUT, _)) => Ok(Action::Logout(session::Args { client })),
        Some((CMD_TOKEN, _)) => Ok(Action::Token(session::Args { client })),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("missing command")),
    }
}
