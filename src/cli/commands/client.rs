//! Arguments shared by every subcommand: where the auth service lives and
//! where the token is kept.

use crate::config::{ClientConfig, InputPolicy};
use crate::storage::FileStore;
use clap::{Arg, ArgAction, ArgMatches, Command};
use secrecy::SecretString;
use std::path::PathBuf;

pub const ARG_URL: &str = "url";
pub const ARG_AUTH_PATH: &str = "auth-path";
pub const ARG_DASHBOARD: &str = "dashboard";
pub const ARG_STORAGE_KEY: &str = "storage-key";
pub const ARG_STORAGE_FILE: &str = "storage-file";
pub const ARG_REJECT_EMPTY: &str = "reject-empty";
pub const ARG_SECRET: &str = "secret";

#[derive(Debug)]
pub struct Options {
    pub config: ClientConfig,
    pub storage_file: PathBuf,
}

impl Options {
    /// Parse client arguments from matches.
    ///
    /// # Errors
    /// Returns an error if `--url` is missing or is not an http(s) URL.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        // clap passes "" through when an env var is set but empty
        let get_non_empty = |id: &str| {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
        };

        let url = get_non_empty(ARG_URL)
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_URL}"))?;

        let mut config = ClientConfig::new(&url)?;

        if let Some(path) = get_non_empty(ARG_AUTH_PATH) {
            config = config.with_auth_path(&path);
        }
        if let Some(route) = get_non_empty(ARG_DASHBOARD) {
            config = config.with_dashboard_route(&route);
        }
        if let Some(key) = get_non_empty(ARG_STORAGE_KEY) {
            config = config.with_storage_key(&key);
        }
        if matches.get_flag(ARG_REJECT_EMPTY) {
            config = config.with_input_policy(InputPolicy::RejectEmpty);
        }
        config = config.with_secret(get_non_empty(ARG_SECRET).map(SecretString::from));

        let storage_file = get_non_empty(ARG_STORAGE_FILE)
            .map_or_else(FileStore::default_path, PathBuf::from);

        Ok(Self {
            config,
            storage_file,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_URL)
                .long(ARG_URL)
                .help("Base URL of the LMS, example: https://lms.example.edu")
                .env("LMSAUTH_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_AUTH_PATH)
                .long(ARG_AUTH_PATH)
                .help("Path of the authentication endpoint")
                .env("LMSAUTH_AUTH_PATH")
                .default_value(crate::config::DEFAULT_AUTH_PATH)
                .global(true),
        )
        .arg(
            Arg::new(ARG_DASHBOARD)
                .long(ARG_DASHBOARD)
                .help("Route to open after a successful login")
                .env("LMSAUTH_DASHBOARD")
                .default_value(crate::config::DEFAULT_DASHBOARD_ROUTE)
                .global(true),
        )
        .arg(
            Arg::new(ARG_STORAGE_KEY)
                .long(ARG_STORAGE_KEY)
                .help("Key the token is stored under")
                .env("LMSAUTH_STORAGE_KEY")
                .default_value(crate::config::DEFAULT_STORAGE_KEY)
                .global(true),
        )
        .arg(
            Arg::new(ARG_STORAGE_FILE)
                .long(ARG_STORAGE_FILE)
                .help("Token storage file (default: $XDG_STATE_HOME/lmsauth/storage.json)")
                .env("LMSAUTH_STORAGE_FILE")
                .global(true),
        )
        .arg(
            Arg::new(ARG_REJECT_EMPTY)
                .long(ARG_REJECT_EMPTY)
                .help("Refuse empty usernames or passwords before contacting the server")
                .env("LMSAUTH_REJECT_EMPTY")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new(ARG_SECRET)
                .long(ARG_SECRET)
                .help("Shared secret; when set, request and response bodies are sealed")
                .env("LMSAUTH_SECRET")
                .hide_env_values(true)
                .global(true),
        )
}
