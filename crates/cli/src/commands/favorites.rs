//! Favorites commands. All of them require a logged-in session.

#![allow(clippy::print_stdout)]

use furniture_finder_core::ProductId;
use furniture_finder_storefront::error::AppError;
use furniture_finder_storefront::state::AppState;
use furniture_finder_storefront::storage::KeyValueStore;
use furniture_finder_storefront::stores::FavoritesStore;

use super::catalog::print_products;

pub fn list<S: KeyValueStore>(favorites: &FavoritesStore<S>) {
    if favorites.favorites().is_empty() {
        println!("No favorites yet");
        return;
    }
    print_products(favorites.favorites());
}

pub async fn add<S: KeyValueStore>(
    state: &AppState<S>,
    favorites: &mut FavoritesStore<S>,
    id: ProductId,
) -> Result<(), AppError> {
    if favorites.is_favorite(id) {
        println!("Product {id} is already a favorite");
        return Ok(());
    }

    let product = state.catalog().fetch_product(id).await?;
    favorites.add_to_favorites(product).await;
    println!("Added product {id} to favorites");
    Ok(())
}

pub async fn remove<S: KeyValueStore>(
    favorites: &mut FavoritesStore<S>,
    id: ProductId,
) -> Result<(), AppError> {
    if !favorites.remove_from_favorites(id).await {
        return Err(AppError::NotFound(format!("product {id} is not a favorite")));
    }
    println!("Removed product {id} from favorites");
    Ok(())
}

pub async fn toggle<S: KeyValueStore>(
    state: &AppState<S>,
    favorites: &mut FavoritesStore<S>,
    id: ProductId,
) -> Result<(), AppError> {
    let product = match favorites.find(id) {
        Some(product) => product.clone(),
        None => state.catalog().fetch_product(id).await?,
    };

    if favorites.toggle_favorite(product).await {
        println!("Added product {id} to favorites");
    } else {
        println!("Removed product {id} from favorites");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use furniture_finder_core::{Price, Product};
    use furniture_finder_storefront::config::{CatalogConfig, StorefrontConfig};
    use furniture_finder_storefront::storage::MemoryStore;

    use super::*;

    fn config() -> StorefrontConfig {
        StorefrontConfig {
            catalog: CatalogConfig::default(),
            data_dir: PathBuf::from("unused"),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[tokio::test]
    async fn test_toggle_removes_liked_product_without_catalog() {
        let mut state = AppState::new(config(), MemoryStore::new()).await.unwrap();
        state.login("ethan.carter@email.com", "pw").await.unwrap();
        let mut session = state.open_user_session().await.unwrap();

        let id = ProductId::new(12);
        let chair = Product::new(id, "Wooden Chair", Price::from_cents(4_999));
        session.favorites.add_to_favorites(chair).await;
        let table = Product::new(ProductId::new(13), "Table", Price::ZERO);
        session.favorites.add_to_favorites(table).await;

        toggle(&state, &mut session.favorites, id).await.unwrap();
        assert!(!session.favorites.is_favorite(id));
        assert_eq!(session.favorites.favorites().len(), 1);

        session.favorites.reload().await;
        assert!(!session.favorites.is_favorite(id));
    }
}
