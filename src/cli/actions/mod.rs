pub mod login;
pub mod session;
pub mod signup;

// Internal "interpreter" for `Action`.
mod run;

#[derive(Debug)]
pub enum Action {
    Login(login::Args),
    Signup(signup::Args),
    Logout(session::Args),
    Token(session::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
