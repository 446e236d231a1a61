use super::envelope::Envelope;
use super::error::{Error, Result};
use super::flow::{RawResponse, Transport};
use super::types::AuthRequest;
use crate::{config::ClientConfig, APP_USER_AGENT};
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::{debug, info_span, Instrument};

/// [`Transport`] over HTTP. Posts to `base_url + auth_path` and returns the
/// status and body untouched, apart from opening a sealed body.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    url: String,
    envelope: Option<Envelope>,
}

impl HttpTransport {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            client,
            url: config.auth_url(),
            envelope: config.secret.as_ref().map(Envelope::new),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    fn open(&self, body: String) -> Result<String> {
        let Some(envelope) = &self.envelope else {
            return Ok(body);
        };

        match envelope.open(&body) {
            Ok(plain) => Ok(plain),
            // the worker answers requests it cannot open with plain JSON
            Err(Error::Envelope(reason)) if body.trim_start().starts_with('{') => {
                debug!("response not sealed ({reason}), using it as is");
                Ok(body)
            }
            Err(e) => Err(e),
        }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &AuthRequest) -> Result<RawResponse> {
        let payload = serde_json::to_string(request)?;

        let (body, content_type) = match &self.envelope {
            Some(envelope) => (envelope.seal(&payload), "text/plain"),
            None => (payload, "application/json"),
        };

        let span = info_span!(
            "auth.submit",
            http.method = "POST",
            url = %self.url,
            signup = request.is_signup(),
            sealed = self.envelope.is_some()
        );

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .instrument(span)
            .await?;

        let status = response.status().as_u16();
        let body = self.open(response.text().await?)?;

        Ok(RawResponse { status, body })
    }
}
