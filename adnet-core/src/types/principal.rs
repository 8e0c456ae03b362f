//! Caller principal type.
//!
//! A [`Principal`] is the identity the surrounding execution environment
//! attributes to an operation. The registry never computes identities; it only
//! compares them for equality when enforcing ownership.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::PRINCIPAL_MAX_LEN;
use crate::error::{AdNetError, Result};

/// An opaque, validated principal/account identifier.
///
/// Principals are compared for equality only; no ordering or delegation
/// semantics exist. The string form is whatever the deployment environment
/// uses (a chain address, an account name), kept opaque here.
///
/// # Example
/// ```
/// use adnet_core::Principal;
///
/// let a: Principal = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM".parse().unwrap();
/// let b: Principal = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM".parse().unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    /// Creates a principal from a string, validating its shape.
    ///
    /// Accepted: non-empty, at most [`PRINCIPAL_MAX_LEN`] bytes, ASCII graphic
    /// characters only (no whitespace, no control characters).
    pub fn new(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(AdNetError::InvalidPrincipal("empty principal".into()));
        }
        if s.len() > PRINCIPAL_MAX_LEN {
            return Err(AdNetError::InvalidPrincipal(format!(
                "principal too long: {} bytes, maximum {}",
                s.len(),
                PRINCIPAL_MAX_LEN
            )));
        }
        if !s.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(AdNetError::InvalidPrincipal(
                "principal contains whitespace or non-printable characters".into(),
            ));
        }
        Ok(Self(s))
    }

    /// Returns the principal as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Principal {
    type Err = AdNetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Principal {
    type Error = AdNetError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl From<Principal> for String {
    fn from(p: Principal) -> Self {
        p.0
    }
}

impl AsRef<str> for Principal {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
