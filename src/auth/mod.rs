//! Credential submission: password digests, the `/auth` wire model and the
//! login/signup flows that drive the injected capabilities.

pub mod digest;
pub mod envelope;
pub mod error;
pub mod flow;
pub mod http;
pub mod types;

pub use self::digest::{digest, is_digest, PasswordDigest};
pub use self::error::{Error, Result};
pub use self::flow::{AuthFlow, Navigator, Notifier, Outcome, RawResponse, Transport};
pub use self::http::HttpTransport;
pub use self::types::{AuthRequest, AuthResponse, Authority, SignupDetails, SignupForm};
