//! Full shopper flow: login, browse, cart, favorites, checkout, with state
//! persisted to a temporary data directory between "launches".

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use furniture_finder_core::{Price, ProductId, UserId};
use furniture_finder_integration_tests::MockCatalog;
use furniture_finder_storefront::browse::{self, ProductFilter, SortOption};
use furniture_finder_storefront::error::AppError;
use furniture_finder_storefront::state::AppState;
use furniture_finder_storefront::storage::{KeyValueStore, keys};
use tempfile::TempDir;

#[tokio::test]
async fn test_cart_and_favorites_persist_across_launches() {
    let catalog = MockCatalog::start().await.unwrap();
    let data_dir = TempDir::new().unwrap();

    {
        let mut state = AppState::open(catalog.storefront_config(data_dir.path()))
            .await
            .unwrap();
        state.login("Ethan.Carter@email.com", "anything").await.unwrap();

        let mut session = state.open_user_session().await.unwrap();
        let bed = state.catalog().fetch_product(ProductId::new(11)).await.unwrap();
        let table = state.catalog().fetch_product(ProductId::new(13)).await.unwrap();

        session.cart.add_to_cart(bed.clone(), 1).await;
        session.cart.add_to_cart(table.clone(), 2).await;
        session.cart.add_to_cart(table, 1).await;
        session.favorites.add_to_favorites(bed).await;
    }

    let state = AppState::open(catalog.storefront_config(data_dir.path()))
        .await
        .unwrap();
    assert_eq!(state.current_user().unwrap().id, UserId::new("1"));

    let session = state.open_user_session().await.unwrap();
    assert_eq!(session.cart.items().len(), 2);
    assert_eq!(session.cart.quantity_of(ProductId::new(13)), 3);
    assert_eq!(session.cart.cart_items_count(), 4);
    assert_eq!(session.cart.cart_total(), Price::from_cents(189_999 + 3 * 29_999));
    assert!(session.favorites.is_favorite(ProductId::new(11)));

    let blob = state
        .storage()
        .get(&keys::cart_key(&UserId::new("1")))
        .await
        .unwrap()
        .unwrap();
    assert!(blob.contains("Bedside Table African Cherry"));
}

#[tokio::test]
async fn test_users_do_not_see_each_others_state() {
    let catalog = MockCatalog::start().await.unwrap();
    let data_dir = TempDir::new().unwrap();
    let mut state = AppState::open(catalog.storefront_config(data_dir.path()))
        .await
        .unwrap();

    state.login("sarah.johnson@email.com", "pw").await.unwrap();
    let mut sarah = state.open_user_session().await.unwrap();
    let bed = state.catalog().fetch_product(ProductId::new(11)).await.unwrap();
    sarah.cart.add_to_cart(bed.clone(), 1).await;
    sarah.favorites.toggle_favorite(bed).await;

    state.logout().await;
    assert!(matches!(
        state.open_user_session().await,
        Err(AppError::Unauthorized(_))
    ));

    state.login("mike.wilson@email.com", "pw").await.unwrap();
    let mike = state.open_user_session().await.unwrap();
    assert!(mike.cart.is_empty());
    assert!(mike.favorites.favorites().is_empty());
}

#[tokio::test]
async fn test_checkout_empties_persisted_cart() {
    let catalog = MockCatalog::start().await.unwrap();
    let data_dir = TempDir::new().unwrap();
    let mut state = AppState::open(catalog.storefront_config(data_dir.path()))
        .await
        .unwrap();
    state.login("ethan.carter@email.com", "pw").await.unwrap();

    let mut session = state.open_user_session().await.unwrap();
    let table = state.catalog().fetch_product(ProductId::new(13)).await.unwrap();
    session.cart.add_to_cart(table, 2).await;
    session.cart.update_quantity(ProductId::new(13), 5).await;

    let receipt = session.cart.checkout().await.unwrap();
    assert_eq!(receipt.item_count, 5);
    assert_eq!(receipt.total, Price::from_cents(5 * 29_999));

    let reopened = state.open_user_session().await.unwrap();
    assert!(reopened.cart.is_empty());
    assert!(
        state
            .storage()
            .get(&keys::cart_key(&UserId::new("1")))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_browse_first_page_sorted_by_price() {
    let catalog = MockCatalog::start().await.unwrap();
    let data_dir = TempDir::new().unwrap();
    let state = AppState::open(catalog.storefront_config(data_dir.path()))
        .await
        .unwrap();

    let page = state.catalog().fetch_products(10, 0).await.unwrap();
    let filter = ProductFilter {
        max_price: Some(Price::from_cents(50_000)),
        ..ProductFilter::default()
    };
    let shown = browse::browse(&page.products, &filter, Some(SortOption::PriceDesc));

    let ids: Vec<i32> = shown.iter().map(|p| p.id.as_i32()).collect();
    assert_eq!(ids, vec![14, 13]);

    let predictions = browse::title_predictions(&page.products, "bed", browse::DEFAULT_PREDICTIONS);
    assert_eq!(predictions.len(), 2);
}

#[tokio::test]
async fn test_search_results_bounded_by_price() {
    let catalog = MockCatalog::start().await.unwrap();
    let data_dir = TempDir::new().unwrap();
    let state = AppState::open(catalog.storefront_config(data_dir.path()))
        .await
        .unwrap();

    let page = state.catalog().search_products("bed").await.unwrap();
    assert_eq!(page.products.len(), 2);

    let filter = ProductFilter::price_range(None, Some(Price::from_cents(50_000)));
    let shown = browse::browse(&page.products, &filter, Some(SortOption::PriceAsc));
    let ids: Vec<i32> = shown.iter().map(|p| p.id.as_i32()).collect();
    assert_eq!(ids, vec![13]);

    let filter = ProductFilter::price_range(Some(Price::from_cents(190_000)), None);
    assert!(browse::browse(&page.products, &filter, None).is_empty());
}
