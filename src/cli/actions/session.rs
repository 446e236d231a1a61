//! Local token management; neither action talks to the server.

use crate::cli::commands::client;
use crate::storage::{FileStore, TokenStore};
use anyhow::{Context, Result};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub client: client::Options,
}

/// Remove the stored token.
/// # Errors
/// Returns an error if the storage file cannot be read or written.
pub fn logout(args: &Args) -> Result<()> {
    let store = FileStore::new(&args.client.storage_file);
    store
        .clear(&args.client.config.storage_key)
        .with_context(|| format!("could not update {}", store.path().display()))?;

    info!("token removed");

    Ok(())
}

/// Print the stored token.
/// # Errors
/// Returns an error if the storage file cannot be read or no token is stored.
pub fn token(args: &Args) -> Result<()> {
    let store = FileStore::new(&args.client.storage_file);
    let token = store
        .get(&args.client.config.storage_key)
        .with_context(|| format!("could not read {}", store.path().display()))?
        .context("no token stored, run `lmsauth login` first")?;

    println!("{token}");

    Ok(())
}
