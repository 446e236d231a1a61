//! Client configuration: where the auth service lives, where to send the user
//! after a successful login, and how the token is keyed in storage.

use crate::auth::{Error, Result};
use secrecy::SecretString;
use tracing::debug;
use url::Url;

pub const DEFAULT_AUTH_PATH: &str = "/auth";
pub const DEFAULT_DASHBOARD_ROUTE: &str = "/dashboard";
pub const DEFAULT_STORAGE_KEY: &str = "token";

/// What to do with empty usernames or passwords before anything is hashed or sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputPolicy {
    /// Submit whatever was entered and let the service decide.
    #[default]
    Permissive,
    /// Fail locally when a username or password is empty.
    RejectEmpty,
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub auth_path: String,
    pub dashboard_route: String,
    pub storage_key: String,
    pub input_policy: InputPolicy,
    /// Shared secret for the sealed envelope. Plain JSON is sent when unset.
    pub secret: Option<SecretString>,
}

impl ClientConfig {
    /// # Errors
    /// Returns an error if `base_url` is not an absolute http(s) URL with a host.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        Ok(Self {
            base_url,
            auth_path: DEFAULT_AUTH_PATH.to_string(),
            dashboard_route: DEFAULT_DASHBOARD_ROUTE.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            input_policy: InputPolicy::default(),
            secret: None,
        })
    }

    #[must_use]
    pub fn with_auth_path(mut self, path: &str) -> Self {
        self.auth_path = path.to_string();
        self
    }

    #[must_use]
    pub fn with_dashboard_route(mut self, route: &str) -> Self {
        self.dashboard_route = route.to_string();
        self
    }

    #[must_use]
    pub fn with_storage_key(mut self, key: &str) -> Self {
        self.storage_key = key.to_string();
        self
    }

    #[must_use]
    pub const fn with_input_policy(mut self, policy: InputPolicy) -> Self {
        self.input_policy = policy;
        self
    }

    #[must_use]
    pub fn with_secret(mut self, secret: Option<SecretString>) -> Self {
        self.secret = secret;
        self
    }

    #[must_use]
    pub fn auth_url(&self) -> String {
        build_url_with_base(&self.base_url, &self.auth_path)
    }

    #[must_use]
    pub fn dashboard_url(&self) -> String {
        build_url_with_base(&self.base_url, &self.dashboard_route)
    }
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let url = Url::parse(base_url.trim()).map_err(|e| Error::Url(format!("{base_url}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(Error::Url(format!("unsupported scheme {scheme}"))),
    }

    if url.host().is_none() {
        return Err(Error::Url("no host specified".to_string()));
    }

    let base_url = url.as_str().trim_end_matches('/').to_string();

    debug!("base URL: {}", base_url);

    Ok(base_url)
}

/// Joins `path` onto `base_url` with exactly one slash between them.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
