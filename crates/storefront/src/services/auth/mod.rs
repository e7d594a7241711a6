//! Account lookup for login.
//!
//! There is no credential store: the shop front ships a fixed directory of
//! demo accounts and accepts any non-blank password for a known email. This
//! is a demo stub, not a security boundary.

mod error;

pub use error::AuthError;

use furniture_finder_core::{Email, User};

/// Directory of accounts that may log in.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// Create a directory over the given accounts.
    #[must_use]
    pub const fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// The built-in demo accounts.
    #[must_use]
    pub fn demo() -> Self {
        let users = [
            ("1", "Ethan Carter", "ethan.carter@email.com"),
            ("2", "Sarah Johnson", "sarah.johnson@email.com"),
            ("3", "Mike Wilson", "mike.wilson@email.com"),
        ]
        .into_iter()
        .filter_map(|(id, name, email)| {
            Email::parse(email)
                .ok()
                .map(|email| User::new(id, name, email))
        })
        .collect();

        Self { users }
    }

    /// All accounts, in directory order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Find an account by email, ignoring ASCII case.
    #[must_use]
    pub fn find_by_email(&self, email: &Email) -> Option<&User> {
        self.users.iter().find(|u| u.email.eq_ignore_ascii_case(email))
    }

    /// Check login credentials and return the matching account.
    ///
    /// The password must be non-blank but is otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is blank,
    /// `AuthError::InvalidEmail` if the email is malformed, and
    /// `AuthError::InvalidCredentials` if no account has that email.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let email = Email::parse(email)?;
        let user = self
            .find_by_email(&email)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        tracing::info!(user_id = %user.id, "Login accepted");
        Ok(user)
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use furniture_finder_core::UserId;

    use super::*;

    #[test]
    fn test_demo_directory() {
        let directory = UserDirectory::demo();
        assert_eq!(directory.users().len(), 3);
        assert_eq!(directory.users()[1].name, "Sarah Johnson");
    }

    #[test]
    fn test_any_password_accepted_for_known_email() {
        let directory = UserDirectory::demo();
        for password in ["x", "hunter2", "a much longer passphrase"] {
            let user = directory
                .authenticate("mike.wilson@email.com", password)
                .unwrap();
            assert_eq!(user.id, UserId::new("3"));
        }
    }

    #[test]
    fn test_email_match_ignores_case_and_whitespace() {
        let directory = UserDirectory::demo();
        let user = directory
            .authenticate("  Ethan.Carter@EMAIL.com ", "pw")
            .unwrap();
        assert_eq!(user.email.as_str(), "ethan.carter@email.com");
    }

    #[test]
    fn test_blank_fields_rejected() {
        let directory = UserDirectory::demo();
        assert_eq!(
            directory.authenticate("", "pw"),
            Err(AuthError::MissingCredentials)
        );
        assert_eq!(
            directory.authenticate("ethan.carter@email.com", ""),
            Err(AuthError::MissingCredentials)
        );
    }

    #[test]
    fn test_unknown_email_rejected() {
        let directory = UserDirectory::demo();
        assert_eq!(
            directory.authenticate("nobody@email.com", "pw"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_malformed_email_rejected() {
        let directory = UserDirectory::demo();
        assert!(matches!(
            directory.authenticate("not-an-email", "pw"),
            Err(AuthError::InvalidEmail(_))
        ));
    }
}
