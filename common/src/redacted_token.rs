//! Bearer credential handling with redacted Debug output.

use crate::{ErrorLocation, RedactError};

use std::fmt;

use serde::ser::Error;
use serde::{Deserialize, Deserializer};
use zeroize::Zeroize;

/// An access or refresh token that never exposes its value in logs or debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct RedactedToken {
    inner: String,
}

impl RedactedToken {
    /// Wrap a raw token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: token.into(),
        }
    }

    /// Get the actual token value for transmission.
    ///
    /// # Security Note
    /// Only call this when attaching the token to an outgoing request.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Get the token length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<&str> for RedactedToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for RedactedToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl fmt::Debug for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedToken([REDACTED])")
    }
}

impl fmt::Display for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED TOKEN]")
    }
}

impl Drop for RedactedToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl<'de> Deserialize<'de> for RedactedToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

// Prevent accidental serialization
impl serde::Serialize for RedactedToken {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::SerializationRefused {
            type_name: "RedactedToken",
            location: ErrorLocation::caller(),
        }))
    }
}
