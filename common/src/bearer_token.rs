//! The Input API credential.

use std::fmt;

use zeroize::Zeroizing;

const BEARER_SCHEME: &str = "Bearer ";

/// A bearer credential that never exposes its value in logs or debug output.
///
/// The value is wiped from memory on drop, and so is every header string
/// built from it.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    inner: Zeroizing<String>,
}

impl BearerToken {
    pub fn new(token: String) -> Self {
        Self {
            inner: Zeroizing::new(token),
        }
    }

    /// `Bearer <token>`, the full `Authorization` header value.
    ///
    /// # Security Note
    /// Only call this when building the request.
    pub fn authorization_header(&self) -> Zeroizing<String> {
        let mut header = String::with_capacity(BEARER_SCHEME.len() + self.inner.len());
        header.push_str(BEARER_SCHEME);
        header.push_str(&self.inner);
        Zeroizing::new(header)
    }

    /// Token length in bytes (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken([REDACTED])")
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED TOKEN]")
    }
}
