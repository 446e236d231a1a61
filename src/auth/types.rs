//! Request and response payloads for `POST /auth`. Requests carry password
//! digests only; raw passwords stay inside `SecretString` until they are hashed.

use super::digest::{digest, PasswordDigest};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Account privilege tier as understood by the auth service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(pub u8);

impl Authority {
    /// The only tier that is tied to a batch.
    pub const BATCH_SCOPED: Self = Self(2);

    #[must_use]
    pub const fn is_batch_scoped(self) -> bool {
        self.0 == Self::BATCH_SCOPED.0
    }
}

impl From<u8> for Authority {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// Body of `POST /auth`. The service tells signup from login by the presence
/// of `signup_details`.
#[derive(Clone, Debug, Serialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: PasswordDigest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signup_details: Option<SignupDetails>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignupDetails {
    pub name: String,
    pub admin_username: String,
    pub admin_password: PasswordDigest,
    pub authority: Authority,
    pub batch: Option<String>,
}

impl AuthRequest {
    /// Builds the login shape, hashing `password` on the way in.
    #[must_use]
    pub fn login(username: &str, password: &SecretString) -> Self {
        Self {
            username: username.to_string(),
            password: digest(password.expose_secret()),
            signup_details: None,
        }
    }

    #[must_use]
    pub const fn is_signup(&self) -> bool {
        self.signup_details.is_some()
    }
}

/// Raw signup input as collected from the user.
#[derive(Debug)]
pub struct SignupForm {
    pub username: String,
    pub password: SecretString,
    pub admin_username: String,
    pub admin_password: SecretString,
    pub name: String,
    pub authority: Authority,
    pub batch: Option<String>,
}

impl SignupForm {
    /// Hashes both passwords independently and drops `batch` unless the
    /// authority is batch scoped.
    #[must_use]
    pub fn into_request(self) -> AuthRequest {
        let batch = if self.authority.is_batch_scoped() {
            self.batch
        } else {
            None
        };

        AuthRequest {
            username: self.username,
            password: digest(self.password.expose_secret()),
            signup_details: Some(SignupDetails {
                name: self.name,
                admin_username: self.admin_username,
                admin_password: digest(self.admin_password.expose_secret()),
                authority: self.authority,
                batch,
            }),
        }
    }
}

/// Response body of `POST /auth`. Which half is populated depends on the status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: Option<AuthSuccess>,
    #[serde(default)]
    pub error: Option<AuthErrorBody>,
    #[serde(default)]
    pub code: Option<u16>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthSuccess {
    pub token: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn form(authority: u8, batch: Option<&str>) -> SignupForm {
        SignupForm {
            username: "student01".to_string(),
            password: SecretString::from("student-secret".to_string()),
            admin_username: "admin".to_string(),
            admin_password: SecretString::from("admin-secret".to_string()),
            name: "Student One".to_string(),
            authority: Authority(authority),
            batch: batch.map(str::to_string),
        }
    }

    #[test]
    fn test_login_shape() {
        let request = AuthRequest::login("alice", &SecretString::from("password".to_string()));
        let body = serde_json::to_value(&request).expect("Failed to serialize");

        assert_eq!(
            body,
            json!({
                "username": "alice",
                "password": "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
            })
        );
        assert!(!request.is_signup());
    }

    #[test]
    fn test_signup_shape() {
        let request = form(2, Some("2024-A")).into_request();
        let body = serde_json::to_value(&request).expect("Failed to serialize");

        assert_eq!(body["username"], "student01");
        assert_eq!(body["password"], digest("student-secret").as_str());
        assert_eq!(body["signup_details"]["name"], "Student One");
        assert_eq!(body["signup_details"]["admin_username"], "admin");
        assert_eq!(
            body["signup_details"]["admin_password"],
            digest("admin-secret").as_str()
        );
        assert_eq!(body["signup_details"]["authority"], 2);
        assert_eq!(body["signup_details"]["batch"], "2024-A");
    }

    #[test]
    fn test_batch_is_null_outside_batch_scoped_role() {
        for authority in [0, 1, 3, 4, 255] {
            let request = form(authority, Some("2024-A")).into_request();
            let body = serde_json::to_value(&request).expect("Failed to serialize");
            assert_eq!(body["signup_details"]["batch"], Value::Null);
            assert!(body["signup_details"]
                .as_object()
                .is_some_and(|details| details.contains_key("batch")));
        }
    }

    #[test]
    fn test_batch_kept_for_batch_scoped_role() {
        let request = form(2, None).into_request();
        let details = request.signup_details.expect("signup details");
        assert_eq!(details.batch, None);

        let request = form(2, Some("")).into_request();
        let details = request.signup_details.expect("signup details");
        assert_eq!(details.batch.as_deref(), Some(""));
    }

    #[test]
    fn test_plaintext_never_serialized() {
        let login = AuthRequest::login("alice", &SecretString::from("hunter2".to_string()));
        let signup = form(1, None).into_request();

        let login = serde_json::to_string(&login).expect("Failed to serialize");
        let signup = serde_json::to_string(&signup).expect("Failed to serialize");

        assert!(!login.contains("hunter2"));
        assert!(!signup.contains("student-secret"));
        assert!(!signup.contains("admin-secret"));
    }

    #[test]
    fn test_deserialize_responses() {
        let ok: AuthResponse =
            serde_json::from_str(r#"{"success":{"token":"T"}}"#).expect("Failed to deserialize");
        assert_eq!(
            ok.success,
            Some(AuthSuccess {
                token: "T".to_string(),
                name: None
            })
        );

        let err: AuthResponse =
            serde_json::from_str(r#"{"error":{"message":"bad creds"},"code":401}"#)
                .expect("Failed to deserialize");
        assert_eq!(err.error.map(|e| e.message), Some("bad creds".to_string()));
        assert_eq!(err.code, Some(401));
    }
}
