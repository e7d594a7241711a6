//! Shopper email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input is empty (or only whitespace).
    #[error("email cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input has no @ symbol, or more than one.
    #[error("email must contain exactly one @ symbol")]
    AtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
}

/// An email address identifying a shopper account.
///
/// Only the structure is checked: 1-254 characters (RFC 5321 limit) with a
/// non-empty local part and domain around a single @. Surrounding whitespace
/// is trimmed, case is preserved.
///
/// ```
/// use furniture_finder_core::Email;
///
/// assert!(Email::parse("sarah.johnson@email.com").is_ok());
/// assert!(Email::parse("sarah.johnson").is_err());
/// assert!(Email::parse("a@b@c").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] describing the first structural problem found.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::AtSymbol)?;
        if domain.contains('@') {
            return Err(EmailError::AtSymbol);
        }
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the part after the @.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }

    /// Compares two addresses ignoring ASCII case.
    ///
    /// Account lookup treats `Sarah.Johnson@Email.com` and
    /// `sarah.johnson@email.com` as the same shopper.
    #[must_use]
    pub fn eq_ignore_ascii_case(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_demo_accounts() {
        for raw in [
            "ethan.carter@email.com",
            "sarah.johnson@email.com",
            "mike.wilson@email.com",
        ] {
            assert_eq!(Email::parse(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
        assert_eq!(Email::parse("no-at-symbol"), Err(EmailError::AtSymbol));
        assert_eq!(Email::parse("a@b@c.com"), Err(EmailError::AtSymbol));
        assert_eq!(Email::parse("@email.com"), Err(EmailError::EmptyLocalPart));
        assert_eq!(Email::parse("mike@"), Err(EmailError::EmptyDomain));

        let long = format!("{}@email.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let email = Email::parse("  mike.wilson@email.com\n").unwrap();
        assert_eq!(email.as_str(), "mike.wilson@email.com");
        assert_eq!(email.domain(), "email.com");
    }

    #[test]
    fn test_eq_ignore_ascii_case() {
        let a = Email::parse("Ethan.Carter@Email.com").unwrap();
        let b: Email = "ethan.carter@email.com".parse().unwrap();
        assert!(a.eq_ignore_ascii_case(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_is_plain_string() {
        let email = Email::parse("sarah.johnson@email.com").unwrap();
        assert_eq!(
            serde_json::to_string(&email).unwrap(),
            "\"sarah.johnson@email.com\""
        );
    }
}
