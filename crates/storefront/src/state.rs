//! Application state shared by front ends.
//!
//! `AppState` owns the catalog client, the storage backend and the session.
//! Cart and favorites are not global: [`AppState::open_user_session`] builds
//! a [`UserSession`] scoped to whoever is logged in.

use furniture_finder_core::User;

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::services::auth::UserDirectory;
use crate::storage::{FileStore, KeyValueStore};
use crate::stores::{CartStore, FavoritesStore, SessionStore};

/// Application state for one shopper on one device.
#[derive(Debug)]
pub struct AppState<S> {
    config: StorefrontConfig,
    catalog: CatalogClient,
    storage: S,
    directory: UserDirectory,
    session: SessionStore<S>,
}

/// Stores scoped to the logged-in user.
#[derive(Debug)]
pub struct UserSession<S> {
    pub user: User,
    pub cart: CartStore<S>,
    pub favorites: FavoritesStore<S>,
}

impl AppState<FileStore> {
    /// Create state persisted in the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// catalog URL is unusable.
    pub async fn open(config: StorefrontConfig) -> Result<Self> {
        let storage = FileStore::open(&config.data_dir)?;
        Self::new(config, storage).await
    }
}

impl<S: KeyValueStore> AppState<S> {
    /// Create state over an existing storage backend, restoring any
    /// persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be built.
    pub async fn new(config: StorefrontConfig, storage: S) -> Result<Self> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let session = SessionStore::load(storage.clone()).await;

        Ok(Self {
            config,
            catalog,
            storage,
            directory: UserDirectory::default(),
            session,
        })
    }

    /// Replace the account directory used for login.
    #[must_use]
    pub fn with_directory(mut self, directory: UserDirectory) -> Self {
        self.directory = directory;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub const fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.session.current()
    }

    /// Check credentials against the directory and start a session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` for rejected credentials, or
    /// `AppError::Storage` if the session could not be saved.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User> {
        let user = self.directory.authenticate(email, password)?;
        self.session.login(user.clone()).await?;
        Ok(user)
    }

    pub async fn logout(&mut self) {
        self.session.logout().await;
    }

    /// Set the logged-in user's profile image.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if nobody is logged in, or
    /// `AppError::Storage` if the updated record could not be saved.
    pub async fn set_profile_image(&mut self, reference: &str) -> Result<User> {
        if !self.session.set_profile_image(reference).await? {
            return Err(not_logged_in());
        }
        self.current_user().cloned().ok_or_else(not_logged_in)
    }

    /// Load the cart and favorites of the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if nobody is logged in.
    pub async fn open_user_session(&self) -> Result<UserSession<S>> {
        let user = self.current_user().cloned().ok_or_else(not_logged_in)?;
        let cart = CartStore::load(self.storage.clone(), user.id.clone()).await;
        let favorites = FavoritesStore::load(self.storage.clone(), user.id.clone()).await;

        Ok(UserSession {
            user,
            cart,
            favorites,
        })
    }
}

fn not_logged_in() -> AppError {
    AppError::Unauthorized("log in first".to_string())
}
