//! Passwords held only as long as a command needs them

use std::fmt;
use std::ops::Deref;

use zeroize::Zeroizing;

/// A password string that is zeroed on drop and never printed
pub struct Secret {
    inner: Zeroizing<String>,
}

impl Secret {
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            inner: Zeroizing::new(s.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl Deref for Secret {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access() {
        let secret = Secret::new("Aa1!aaaa");
        assert_eq!(secret.as_str(), "Aa1!aaaa");
        assert_eq!(secret.len(), 8);
    }

    #[test]
    fn test_never_printed() {
        let secret: Secret = String::from("Aa1!aaaa").into();
        assert_eq!(secret.to_string(), "[REDACTED]");
        assert!(!format!("{:?}", secret).contains("Aa1"));
    }

    #[test]
    fn test_buffer_is_wiped_by_zeroize() {
        use zeroize::Zeroize;

        let mut secret = Secret::new("Aa1!aaaa");
        secret.inner.zeroize();
        assert!(secret.as_str().is_empty());
    }
}
