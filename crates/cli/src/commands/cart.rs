//! Cart commands. All of them require a logged-in session.
//!
//! # Usage
//!
//! ```bash
//! ff-cli cart add 12 -q 2
//! ff-cli cart set 12 5
//! ff-cli cart show
//! ff-cli cart checkout
//! ```

#![allow(clippy::print_stdout)]

use furniture_finder_core::ProductId;
use furniture_finder_storefront::error::AppError;
use furniture_finder_storefront::state::AppState;
use furniture_finder_storefront::storage::KeyValueStore;
use furniture_finder_storefront::stores::CartStore;

pub fn show<S: KeyValueStore>(cart: &CartStore<S>) {
    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }

    for item in cart.items() {
        println!(
            "#{:<4} {:<40} {:>3} x {:>10} = {:>10}",
            item.product_id().as_i32(),
            item.product.title,
            item.quantity,
            item.product.price.to_string(),
            item.line_total().to_string()
        );
    }
    println!("-- {} items, total {}", cart.cart_items_count(), cart.cart_total());
}

/// Fetch the product from the catalog and add it.
pub async fn add<S: KeyValueStore>(
    state: &AppState<S>,
    cart: &mut CartStore<S>,
    id: ProductId,
    quantity: u32,
) -> Result<(), AppError> {
    let product = state.catalog().fetch_product(id).await?;
    if !product.is_available() {
        return Err(AppError::BadRequest(format!("{} is out of stock", product.title)));
    }

    let title = product.title.clone();
    cart.add_to_cart(product, quantity).await;
    println!(
        "Added {quantity} x {title} (now {} in cart)",
        cart.quantity_of(id)
    );
    Ok(())
}

pub async fn remove<S: KeyValueStore>(cart: &mut CartStore<S>, id: ProductId) -> Result<(), AppError> {
    if !cart.remove_from_cart(id).await {
        return Err(AppError::NotFound(format!("product {id} is not in the cart")));
    }
    println!("Removed product {id}");
    Ok(())
}

pub async fn set_quantity<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    id: ProductId,
    quantity: i64,
) -> Result<(), AppError> {
    if cart.quantity_of(id) == 0 {
        return Err(AppError::NotFound(format!("product {id} is not in the cart")));
    }

    cart.update_quantity(id, quantity).await;
    match cart.quantity_of(id) {
        0 => println!("Removed product {id}"),
        n => println!("Product {id} quantity set to {n}"),
    }
    Ok(())
}

pub async fn clear<S: KeyValueStore>(cart: &mut CartStore<S>) {
    cart.clear_cart().await;
    println!("Cart cleared");
}

pub async fn checkout<S: KeyValueStore>(cart: &mut CartStore<S>) -> Result<(), AppError> {
    let receipt = cart
        .checkout()
        .await
        .ok_or_else(|| AppError::BadRequest("cannot check out an empty cart".to_string()))?;

    println!("Order {} placed", receipt.order_number);
    println!("  placed:  {}", receipt.placed_at.format("%Y-%m-%d %H:%M UTC"));
    println!("  items:   {}", receipt.item_count);
    println!("  total:   {}", receipt.total);
    Ok(())
}
