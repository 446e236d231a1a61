use crate::auth::{AuthFlow, HttpTransport, SignupForm};
use crate::cli::{
    actions::login::finish,
    commands::client,
    console::{ConsoleNavigator, ConsoleNotifier},
};
use crate::storage::FileStore;
use anyhow::Result;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub client: client::Options,
    pub form: SignupForm,
}

/// Execute the signup action.
/// # Errors
/// Returns an error if the request fails, the response is malformed, the token
/// cannot be stored, or the server rejects the signup.
pub async fn execute(args: Args) -> Result<()> {
    let transport = HttpTransport::new(&args.client.config)?;
    let store = FileStore::new(args.client.storage_file);

    debug!(
        url = transport.url(),
        storage = %store.path().display(),
        "submitting signup"
    );

    let flow = AuthFlow::new(
        args.client.config,
        transport,
        store,
        ConsoleNavigator,
        ConsoleNotifier,
    );

    finish(flow.signup(args.form).await?)
}
