//! # lmsauth (LMS credential client)
//!
//! `lmsauth` submits login and signup requests to the LMS `/auth` endpoint.
//!
//! ## Password handling
//!
//! Raw passwords are only ever held as [`secrecy::SecretString`]. Before a request
//! is built they are reduced to a lowercase hex SHA-256 [`auth::PasswordDigest`];
//! the request types cannot carry anything else, so plaintext never reaches the wire.
//!
//! ## Side effects
//!
//! A flow has exactly two terminal outcomes:
//!
//! - **Authenticated:** the issued token is written to the [`storage::TokenStore`]
//!   under the configured key and the [`auth::Navigator`] is sent to the dashboard route.
//! - **Rejected:** the server's error message is handed to the [`auth::Notifier`];
//!   storage and navigation are untouched.
//!
//! Transport failures and malformed responses are returned as errors and leave every
//! capability untouched. Nothing is retried.

pub mod auth;
pub mod cli;
pub mod config;
pub mod storage;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
