//! Logged-in user session.

use furniture_finder_core::User;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::storage::{self, KeyValueStore, StorageError, keys};

/// The current user, persisted under [`keys::AUTH_KEY`].
///
/// Login and profile updates write the record before adopting it, so a
/// failed write leaves the previous session in place.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    user: Option<User>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Restore the persisted session. An unreadable record counts as logged
    /// out.
    pub async fn load(storage: S) -> Self {
        let user = match storage::load_json::<User, S>(&storage, keys::AUTH_KEY).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, "Failed to restore session");
                None
            }
        };

        if let Some(user) = &user {
            set_sentry_user(&user.id, Some(user.email.as_str()));
        }

        Self { storage, user }
    }

    #[must_use]
    pub const fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Persist `user` and make it current.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the record could not be written. The
    /// previous session stays current.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn login(&mut self, user: User) -> Result<(), StorageError> {
        self.write(&user).await?;

        set_sentry_user(&user.id, Some(user.email.as_str()));
        tracing::info!("Session started");
        self.user = Some(user);
        Ok(())
    }

    /// Forget the current user and delete the persisted record.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "Session ended");
        }
        clear_sentry_user();

        if let Err(e) = self.storage.remove(keys::AUTH_KEY).await {
            tracing::error!(error = %e, "Failed to delete persisted session");
        }
    }

    /// Replace the current user record.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the record could not be written.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn update_user(&mut self, user: User) -> Result<(), StorageError> {
        self.write(&user).await?;
        self.user = Some(user);
        Ok(())
    }

    /// Set the profile image of the current user.
    ///
    /// Returns `Ok(false)` if nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the updated record could not be written.
    pub async fn set_profile_image(
        &mut self,
        reference: impl Into<String>,
    ) -> Result<bool, StorageError> {
        let Some(user) = self.user.clone() else {
            return Ok(false);
        };

        self.update_user(user.with_profile_image(reference)).await?;
        Ok(true)
    }

    async fn write(&self, user: &User) -> Result<(), StorageError> {
        storage::save_json(&self.storage, keys::AUTH_KEY, user)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to persist session"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use furniture_finder_core::{Email, UserId};

    use super::*;
    use crate::storage::MemoryStore;
    use crate::storage::testing::FlakyStore;

    fn sarah() -> User {
        User::new(
            "2",
            "Sarah Johnson",
            Email::parse("sarah.johnson@email.com").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_login_persists_and_restores() {
        let storage = MemoryStore::new();
        let mut session = SessionStore::load(storage.clone()).await;
        assert!(!session.is_logged_in());

        session.login(sarah()).await.unwrap();
        assert_eq!(session.current().unwrap().id, UserId::new("2"));

        let restored = SessionStore::load(storage).await;
        assert_eq!(restored.current(), Some(&sarah()));
    }

    #[tokio::test]
    async fn test_logout_deletes_record() {
        let storage = MemoryStore::new();
        let mut session = SessionStore::load(storage.clone()).await;
        session.login(sarah()).await.unwrap();

        session.logout().await;

        assert!(session.current().is_none());
        assert!(storage.get(keys::AUTH_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_profile_image() {
        let storage = MemoryStore::new();
        let mut session = SessionStore::load(storage.clone()).await;
        assert!(!session.set_profile_image("file:///me.jpg").await.unwrap());

        session.login(sarah()).await.unwrap();
        assert!(session.set_profile_image("file:///me.jpg").await.unwrap());

        let restored = SessionStore::load(storage).await;
        assert_eq!(
            restored.current().unwrap().profile_image.as_deref(),
            Some("file:///me.jpg")
        );
    }

    #[tokio::test]
    async fn test_failed_login_write_keeps_previous_state() {
        let storage = FlakyStore::default();
        let mut session = SessionStore::load(storage.clone()).await;

        storage.fail_writes(true);
        assert!(session.login(sarah()).await.is_err());
        assert!(!session.is_logged_in());

        storage.fail_writes(false);
        session.login(sarah()).await.unwrap();
        storage.fail_writes(true);
        assert!(
            session
                .update_user(sarah().with_profile_image("file:///new.jpg"))
                .await
                .is_err()
        );
        assert!(session.set_profile_image("file:///new.jpg").await.is_err());
        assert!(session.current().unwrap().profile_image.is_none());
    }

    #[tokio::test]
    async fn test_relogin_as_current_user_reports_failed_write() {
        let storage = FlakyStore::default();
        let mut session = SessionStore::load(storage.clone()).await;
        session.login(sarah()).await.unwrap();

        storage.fail_writes(true);
        let err = session.login(sarah()).await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert_eq!(session.current(), Some(&sarah()));
    }

    #[tokio::test]
    async fn test_logout_clears_memory_even_if_delete_fails() {
        let storage = FlakyStore::default();
        let mut session = SessionStore::load(storage.clone()).await;
        session.login(sarah()).await.unwrap();

        storage.fail_writes(true);
        session.logout().await;
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn test_corrupt_record_loads_logged_out() {
        let storage = MemoryStore::new();
        storage.set(keys::AUTH_KEY, "[1, 2]").await.unwrap();

        let session = SessionStore::load(storage).await;
        assert!(!session.is_logged_in());
    }
}
