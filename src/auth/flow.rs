//! Login and signup flows.
//!
//! Each flow is one request/response exchange. The flow digests the passwords,
//! hands the request to a [`Transport`] and then drives exactly one of two
//! terminal side effects through injected capabilities: store the token and
//! navigate, or notify the user. Errors leave every capability untouched.

use super::digest::is_digest;
use super::error::{Error, Result};
use super::types::{AuthRequest, AuthResponse, SignupForm};
use crate::config::{ClientConfig, InputPolicy};
use crate::storage::TokenStore;
use secrecy::{ExposeSecret, SecretString};
use std::future::Future;
use tracing::{debug, info, instrument, warn};

/// Status and body of an `/auth` response, before interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends an [`AuthRequest`] to the auth service.
pub trait Transport {
    /// # Errors
    /// Returns an error if the request could not be delivered or the response
    /// body could not be read.
    fn send(&self, request: &AuthRequest) -> impl Future<Output = Result<RawResponse>> + Send;
}

/// Moves the user somewhere else after a successful login.
pub trait Navigator {
    fn navigate(&self, url: &str);
}

/// Shows a blocking message to the user.
pub trait Notifier {
    fn notify(&self, message: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The token was stored and the navigator was invoked.
    Authenticated { token: String, name: Option<String> },
    /// The notifier was shown `message`; nothing was stored.
    Rejected {
        status: u16,
        message: String,
        code: Option<u16>,
    },
}

pub struct AuthFlow<T, S, N, U> {
    config: ClientConfig,
    transport: T,
    store: S,
    navigator: N,
    notifier: U,
}

impl<T, S, N, U> AuthFlow<T, S, N, U>
where
    T: Transport,
    S: TokenStore,
    N: Navigator,
    U: Notifier,
{
    pub fn new(config: ClientConfig, transport: T, store: S, navigator: N, notifier: U) -> Self {
        Self {
            config,
            transport,
            store,
            navigator,
            notifier,
        }
    }

    /// Log in with a username and raw password.
    ///
    /// # Errors
    /// Returns an error on rejected input, transport failure, a malformed
    /// response or a storage failure. A non-2xx answer is not an error.
    #[instrument(skip(self, password), fields(auth_url = %self.config.auth_url()))]
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Outcome> {
        self.check_input(&[username], &[password])?;

        let request = AuthRequest::login(username, password);

        self.submit(&request).await
    }

    /// Create an account, authorized by an existing administrator.
    ///
    /// # Errors
    /// Same as [`AuthFlow::login`].
    #[instrument(skip(self, form), fields(auth_url = %self.config.auth_url(), username = %form.username, authority = form.authority.0))]
    pub async fn signup(&self, form: SignupForm) -> Result<Outcome> {
        self.check_input(
            &[form.username.as_str(), form.admin_username.as_str()],
            &[&form.password, &form.admin_password],
        )?;

        if form.batch.is_some() && !form.authority.is_batch_scoped() {
            debug!("batch ignored for authority {}", form.authority.0);
        }

        let request = form.into_request();

        self.submit(&request).await
    }

    /// Drop the stored token.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn logout(&self) -> Result<()> {
        self.store.clear(&self.config.storage_key)?;
        Ok(())
    }

    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn current_token(&self) -> Result<Option<String>> {
        Ok(self.store.get(&self.config.storage_key)?)
    }

    fn check_input(&self, names: &[&str], passwords: &[&SecretString]) -> Result<()> {
        if self.config.input_policy == InputPolicy::Permissive {
            return Ok(());
        }

        if names.iter().any(|name| name.is_empty()) {
            return Err(Error::InvalidInput("username must not be empty"));
        }

        if passwords.iter().any(|p| p.expose_secret().is_empty()) {
            return Err(Error::InvalidInput("password must not be empty"));
        }

        Ok(())
    }

    async fn submit(&self, request: &AuthRequest) -> Result<Outcome> {
        let digests = std::iter::once(&request.password)
            .chain(request.signup_details.iter().map(|d| &d.admin_password));
        for password in digests {
            if !is_digest(password.as_str())? {
                return Err(Error::InvalidInput(
                    "password digest must be 64 lowercase hex characters",
                ));
            }
        }

        let response = self.transport.send(request).await?;

        debug!("auth response status: {}", response.status);

        let outcome = interpret(&response)?;

        match &outcome {
            Outcome::Authenticated { token, name } => {
                self.store.set(&self.config.storage_key, token)?;
                info!(display_name = name.as_deref().unwrap_or_default(), "authenticated");
                self.navigator.navigate(&self.config.dashboard_url());
            }
            Outcome::Rejected {
                status,
                message,
                code,
            } => {
                warn!(status, code = ?code, "auth rejected: {}", message);
                self.notifier.notify(message);
            }
        }

        Ok(outcome)
    }
}

/// Map a raw response onto an [`Outcome`] without side effects.
///
/// # Errors
/// Returns an error if the body is not JSON or lacks the field its status requires.
pub fn interpret(response: &RawResponse) -> Result<Outcome> {
    let body: AuthResponse = serde_json::from_str(&response.body)?;

    if response.is_success() {
        let success = body.success.ok_or(Error::MalformedResponse {
            status: response.status,
            field: "success.token",
        })?;

        Ok(Outcome::Authenticated {
            token: success.token,
            name: success.name,
        })
    } else {
        let error = body.error.ok_or(Error::MalformedResponse {
            status: response.status,
            field: "error.message",
        })?;

        Ok(Outcome::Rejected {
            status: response.status,
            message: error.message,
            code: body.code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::digest::PasswordDigest;
    use crate::auth::types::Authority;
    use crate::storage::MemoryStore;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct FakeTransport {
        response: RawResponse,
        sent: Mutex<Vec<Value>>,
    }

    impl FakeTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                response: RawResponse::new(status, body),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<Value> {
            self.sent.lock().expect("lock").clone()
        }
    }

    impl Transport for &FakeTransport {
        async fn send(&self, request: &AuthRequest) -> Result<RawResponse> {
            self.sent
                .lock()
                .expect("lock")
                .push(serde_json::to_value(request)?);
            Ok(self.response.clone())
        }
    }

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("lock").clone()
        }
    }

    impl Navigator for &Recorder {
        fn navigate(&self, url: &str) {
            self.calls.lock().expect("lock").push(url.to_string());
        }
    }

    impl Notifier for &Recorder {
        fn notify(&self, message: &str) {
            self.calls.lock().expect("lock").push(message.to_string());
        }
    }

    struct Harness {
        transport: FakeTransport,
        store: MemoryStore,
        navigator: Recorder,
        notifier: Recorder,
    }

    impl Harness {
        fn new(status: u16, body: &str) -> Self {
            Self {
                transport: FakeTransport::new(status, body),
                store: MemoryStore::new(),
                navigator: Recorder::default(),
                notifier: Recorder::default(),
            }
        }

        fn flow(
            &self,
            config: ClientConfig,
        ) -> AuthFlow<&FakeTransport, &MemoryStore, &Recorder, &Recorder> {
            AuthFlow::new(
                config,
                &self.transport,
                &self.store,
                &self.navigator,
                &self.notifier,
            )
        }
    }

    fn config() -> ClientConfig {
        ClientConfig::new("https://lms.example.edu").expect("valid url")
    }

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn form(authority: u8, batch: Option<&str>) -> SignupForm {
        SignupForm {
            username: "student01".to_string(),
            password: secret("student-secret"),
            admin_username: "admin".to_string(),
            admin_password: secret("admin-secret"),
            name: "Student One".to_string(),
            authority: Authority(authority),
            batch: batch.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn login_success_stores_token_and_navigates() -> Result<()> {
        let harness = Harness::new(200, r#"{"success":{"token":"T"}}"#);
        let flow = harness.flow(config());

        let outcome = flow.login("alice", &secret("hunter2")).await?;

        assert_eq!(
            outcome,
            Outcome::Authenticated {
                token: "T".to_string(),
                name: None
            }
        );
        assert_eq!(harness.store.get("token")?.as_deref(), Some("T"));
        assert_eq!(
            harness.navigator.calls(),
            vec!["https://lms.example.edu/dashboard"]
        );
        assert!(harness.notifier.calls().is_empty());
        assert_eq!(
            harness.transport.sent(),
            vec![json!({
                "username": "alice",
                "password": "f52fbd32b2b3b86ff88ef6c490628285f482af15ddcb29541f94bcf526a3f6c7"
            })]
        );
        Ok(())
    }

    #[tokio::test]
    async fn login_rejection_notifies_without_side_effects() -> Result<()> {
        let harness = Harness::new(401, r#"{"error":{"message":"bad creds"},"code":401}"#);
        let flow = harness.flow(config());

        let outcome = flow.login("alice", &secret("wrong")).await?;

        assert_eq!(
            outcome,
            Outcome::Rejected {
                status: 401,
                message: "bad creds".to_string(),
                code: Some(401)
            }
        );
        assert!(harness.store.is_empty());
        assert!(harness.navigator.calls().is_empty());
        assert_eq!(harness.notifier.calls(), vec!["bad creds"]);
        Ok(())
    }

    #[tokio::test]
    async fn success_overwrites_previous_token() -> Result<()> {
        let harness = Harness::new(200, r#"{"success":{"token":"new","name":"Alice"}}"#);
        harness.store.set("token", "old")?;
        let flow = harness.flow(config());

        let outcome = flow.login("alice", &secret("hunter2")).await?;

        assert!(matches!(outcome, Outcome::Authenticated { name: Some(ref n), .. } if n == "Alice"));
        assert_eq!(flow.current_token()?.as_deref(), Some("new"));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let harness = Harness::new(200, "<html>oops</html>");
        let flow = harness.flow(config());

        let result = flow.login("alice", &secret("hunter2")).await;

        assert!(matches!(result, Err(Error::Json(_))));
        assert!(harness.store.is_empty());
        assert!(harness.navigator.calls().is_empty());
        assert!(harness.notifier.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_expected_fields_are_errors() {
        let harness = Harness::new(200, r#"{"error":{"message":"odd"}}"#);
        let result = harness.flow(config()).login("alice", &secret("x")).await;
        assert!(matches!(
            result,
            Err(Error::MalformedResponse {
                status: 200,
                field: "success.token"
            })
        ));
        assert!(harness.store.is_empty());

        let harness = Harness::new(500, r#"{"code":500}"#);
        let result = harness.flow(config()).login("alice", &secret("x")).await;
        assert!(matches!(
            result,
            Err(Error::MalformedResponse {
                status: 500,
                field: "error.message"
            })
        ));
        assert!(harness.notifier.calls().is_empty());
    }

    #[tokio::test]
    async fn signup_posts_nested_body_with_digests() -> Result<()> {
        let harness = Harness::new(201, r#"{"success":{"token":"S"}}"#);
        let flow = harness.flow(config());

        flow.signup(form(2, Some("2024-A"))).await?;

        let sent = harness.transport.sent();
        assert_eq!(sent.len(), 1);
        let details = &sent[0]["signup_details"];
        assert_eq!(details["batch"], "2024-A");
        assert_eq!(details["authority"], 2);
        assert_eq!(
            details["admin_password"],
            crate::auth::digest("admin-secret").as_str()
        );
        assert_eq!(harness.store.get("token")?.as_deref(), Some("S"));

        let body = sent[0].to_string();
        assert!(!body.contains("student-secret"));
        assert!(!body.contains("admin-secret"));
        Ok(())
    }

    #[tokio::test]
    async fn signup_drops_batch_for_other_roles() -> Result<()> {
        let harness = Harness::new(200, r#"{"success":{"token":"S"}}"#);
        let flow = harness.flow(config());

        flow.signup(form(1, Some("2024-A"))).await?;

        assert_eq!(harness.transport.sent()[0]["signup_details"]["batch"], Value::Null);
        Ok(())
    }

    #[tokio::test]
    async fn signup_rejection_uses_same_contract() -> Result<()> {
        let harness = Harness::new(403, r#"{"error":{"message":"not an admin"},"code":403}"#);
        let flow = harness.flow(config());

        let outcome = flow.signup(form(0, None)).await?;

        assert!(matches!(outcome, Outcome::Rejected { status: 403, .. }));
        assert_eq!(harness.notifier.calls(), vec!["not an admin"]);
        assert!(harness.store.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn permissive_policy_submits_empty_input() -> Result<()> {
        let harness = Harness::new(401, r#"{"error":{"message":"bad creds"}}"#);
        let flow = harness.flow(config());

        flow.login("", &secret("")).await?;

        assert_eq!(
            harness.transport.sent()[0]["password"],
            crate::auth::digest("").as_str()
        );
        Ok(())
    }

    #[tokio::test]
    async fn reject_empty_policy_stops_before_sending() {
        let harness = Harness::new(200, r#"{"success":{"token":"T"}}"#);
        let flow = harness.flow(config().with_input_policy(InputPolicy::RejectEmpty));

        assert!(matches!(
            flow.login("", &secret("hunter2")).await,
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            flow.login("alice", &secret("")).await,
            Err(Error::InvalidInput(_))
        ));

        let mut signup = form(1, None);
        signup.admin_password = secret("");
        assert!(matches!(
            flow.signup(signup).await,
            Err(Error::InvalidInput(_))
        ));

        assert!(harness.transport.sent().is_empty());
        assert!(harness.store.is_empty());
    }

    #[tokio::test]
    async fn undigested_password_never_leaves_the_client() {
        let harness = Harness::new(200, r#"{"success":{"token":"T"}}"#);
        let flow = harness.flow(config());

        let mut request = AuthRequest::login("alice", &secret("hunter2"));
        request.password = PasswordDigest("hunter2".to_string());
        assert!(matches!(
            flow.submit(&request).await,
            Err(Error::InvalidInput(_))
        ));

        let mut request = form(2, None).into_request();
        if let Some(details) = request.signup_details.as_mut() {
            details.admin_password = PasswordDigest("ADMIN-SECRET".to_string());
        }
        assert!(matches!(
            flow.submit(&request).await,
            Err(Error::InvalidInput(_))
        ));

        assert!(harness.transport.sent().is_empty());
        assert!(harness.store.is_empty());
        assert!(harness.navigator.calls().is_empty());
    }

    #[tokio::test]
    async fn custom_route_and_key() -> Result<()> {
        let harness = Harness::new(200, r#"{"success":{"token":"T"}}"#);
        let flow = harness.flow(
            config()
                .with_dashboard_route("/student/home")
                .with_storage_key("lms-token"),
        );

        flow.login("alice", &secret("hunter2")).await?;

        assert_eq!(harness.store.get("lms-token")?.as_deref(), Some("T"));
        assert_eq!(harness.store.get("token")?, None);
        assert_eq!(
            harness.navigator.calls(),
            vec!["https://lms.example.edu/student/home"]
        );

        flow.logout()?;
        assert_eq!(flow.current_token()?, None);
        Ok(())
    }

    #[test]
    fn interpret_treats_any_2xx_as_success() -> Result<()> {
        for status in [200, 201, 204, 299] {
            let outcome = interpret(&RawResponse::new(status, r#"{"success":{"token":"T"}}"#))?;
            assert!(matches!(outcome, Outcome::Authenticated { .. }));
        }
        let outcome = interpret(&RawResponse::new(
            302,
            r#"{"error":{"message":"moved"}}"#,
        ))?;
        assert!(matches!(outcome, Outcome::Rejected { status: 302, .. }));
        Ok(())
    }
}
