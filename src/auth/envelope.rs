//! Sealed request bodies for deployments where the auth worker expects an
//! encrypted payload instead of plain JSON.
//!
//! AES-256-CBC with a fixed IV, base64 encoded. The key is the first 32 hex
//! characters of SHA-1 over the shared secret, used as raw bytes.

use super::error::{Error, Result};
use base64ct::{Base64, Encoding};
use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};
use std::fmt;

const IV: [u8; 16] = [7; 16];
const KEY_LEN: usize = 32;

pub struct Envelope {
    key: [u8; KEY_LEN],
}

impl Envelope {
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(secret.expose_secret().as_bytes());
        let hex = hex::encode(hasher.finalize());

        // sha1 hex is 40 chars, always enough for the key
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&hex.as_bytes()[..KEY_LEN]);

        Self { key }
    }

    #[must_use]
    pub fn seal(&self, plaintext: &str) -> String {
        let cipher = libaes::Cipher::new_256(&self.key);
        Base64::encode_string(&cipher.cbc_encrypt(&IV, plaintext.as_bytes()))
    }

    /// # Errors
    /// Returns an error if `sealed` is not base64 or does not decrypt to UTF-8.
    pub fn open(&self, sealed: &str) -> Result<String> {
        let data = Base64::decode_vec(sealed.trim())
            .map_err(|e| Error::Envelope(format!("invalid base64: {e}")))?;

        let cipher = libaes::Cipher::new_256(&self.key);
        let plaintext = cipher.cbc_decrypt(&IV, &data);
        if plaintext.is_empty() && !data.is_empty() {
            return Err(Error::Envelope("unable to decrypt".to_string()));
        }

        String::from_utf8(plaintext).map_err(|_| Error::Envelope("unable to decrypt".to_string()))
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope").finish_non_exhaustive()
    }
}
