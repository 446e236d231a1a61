use crate::cli::actions::{login, session, signup, Action};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => login::execute(args).await,
        Action::Signup(args) => signup::execute(args).await,
        Action::Logout(args) => session::logout(&args),
        Action::Token(args) => session::token(&args),
    }
}
