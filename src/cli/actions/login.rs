use crate::auth::{AuthFlow, HttpTransport, Outcome};
use crate::cli::{
    commands::client,
    console::{ConsoleNavigator, ConsoleNotifier},
};
use crate::storage::FileStore;
use anyhow::{bail, Result};
use secrecy::SecretString;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub client: client::Options,
    pub username: String,
    pub password: SecretString,
}

/// Execute the login action.
/// # Errors
/// Returns an error if the request fails, the response is malformed, the token
/// cannot be stored, or the server rejects the credentials.
pub async fn execute(args: Args) -> Result<()> {
    let transport = HttpTransport::new(&args.client.config)?;
    let store = FileStore::new(args.client.storage_file);

    debug!(
        url = transport.url(),
        storage = %store.path().display(),
        "submitting login"
    );

    let flow = AuthFlow::new(
        args.client.config,
        transport,
        store,
        ConsoleNavigator,
        ConsoleNotifier,
    );

    finish(flow.login(&args.username, &args.password).await?)
}

/// Turn a rejection into a non-zero exit; the notifier already told the user why.
pub(crate) fn finish(outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Authenticated { .. } => Ok(()),
        Outcome::Rejected { status, .. } => bail!("authentication rejected (HTTP {status})"),
    }
}
