//! API key handling using the secrecy crate
//!
//! The API key is wrapped in a [`secrecy::Secret`] so it is zeroed on drop
//! and redacted from `Debug` output. Call `expose_secret()` only where the
//! authorization header is built.
//!
//! # Example
//!
//! ```rust
//! use lucca_export::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let key = secret_string("0f9e-api-key".to_string());
//! assert_eq!(key.expose_secret().as_ref(), "0f9e-api-key");
//! assert!(!format!("{key:?}").contains("0f9e"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret};
use serde::{Deserialize, Deserializer};
use zeroize::Zeroize;

/// String newtype satisfying the traits `Secret` requires
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Whether the value is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string: zeroed on drop, redacted in `Debug`
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string into a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
