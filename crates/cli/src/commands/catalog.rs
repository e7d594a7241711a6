//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! ff-cli products --limit 10 --sort price-asc
//! ff-cli products --query oak --min-price 100 --max-price 800
//! ff-cli product 12
//! ff-cli search bed --sort rating-desc
//! ff-cli search table --max-price 500
//! ff-cli suggest ch
//! ff-cli categories
//! ```

#![allow(clippy::print_stdout)]

use furniture_finder_core::{Price, Product, ProductId};
use furniture_finder_storefront::browse::{self, ProductFilter, SortOption};
use furniture_finder_storefront::catalog::ProductPage;
use furniture_finder_storefront::error::AppError;
use furniture_finder_storefront::state::AppState;
use furniture_finder_storefront::storage::KeyValueStore;
use rust_decimal::Decimal;

/// Options for the `products` command.
pub struct Listing {
    pub limit: Option<u32>,
    pub skip: u32,
    pub query: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: Option<SortOption>,
}

pub async fn products<S: KeyValueStore>(state: &AppState<S>, listing: Listing) -> Result<(), AppError> {
    let catalog = state.catalog();
    let limit = listing.limit.unwrap_or_else(|| catalog.page_size());
    let page = catalog.fetch_products(limit, listing.skip).await?;

    let filter = ProductFilter {
        query: listing.query,
        ..price_filter(listing.min_price, listing.max_price)
    };
    let shown = browse::browse(&page.products, &filter, listing.sort);

    print_products(&shown);
    print_page_footer(&page, shown.len());
    Ok(())
}

pub async fn product<S: KeyValueStore>(state: &AppState<S>, id: ProductId) -> Result<(), AppError> {
    let product = state.catalog().fetch_product(id).await?;
    print_detail(&product);
    Ok(())
}

/// Options for the `search` command.
pub struct Search {
    pub query: String,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: Option<SortOption>,
}

/// Search the catalog. A blank query lists the first page instead.
pub async fn search<S: KeyValueStore>(state: &AppState<S>, search: Search) -> Result<(), AppError> {
    let query = search.query.trim();
    let catalog = state.catalog();
    let page = if query.is_empty() {
        catalog.fetch_first_page().await?
    } else {
        catalog.search_products(query).await?
    };

    let filter = price_filter(search.min_price, search.max_price);
    let shown = browse::browse(&page.products, &filter, search.sort);
    if shown.is_empty() {
        println!("No products found for '{query}'");
        return Ok(());
    }

    print_products(&shown);
    print_page_footer(&page, shown.len());
    Ok(())
}

fn price_filter(min_price: Option<Decimal>, max_price: Option<Decimal>) -> ProductFilter {
    ProductFilter::price_range(min_price.map(Price::new), max_price.map(Price::new))
}

pub async fn suggest<S: KeyValueStore>(
    state: &AppState<S>,
    text: &str,
    limit: usize,
) -> Result<(), AppError> {
    let page = state.catalog().fetch_first_page().await?;
    for title in browse::title_predictions(&page.products, text, limit) {
        println!("{title}");
    }
    Ok(())
}

pub async fn categories<S: KeyValueStore>(state: &AppState<S>) {
    for slug in state.catalog().fetch_categories().await {
        println!("{slug}");
    }
}

pub(crate) fn print_products(products: &[Product]) {
    for product in products {
        println!("{}", summary_line(product));
    }
}

pub(crate) fn summary_line(product: &Product) -> String {
    format!(
        "#{:<4} {:<40} {:>10}  {:.1}*  {}",
        product.id.as_i32(),
        product.title,
        product.price.to_string(),
        product.rating,
        product.stock_status()
    )
}

fn print_page_footer(page: &ProductPage, shown: usize) {
    println!(
        "-- showing {shown} of {} (skip {}, limit {})",
        page.total, page.skip, page.limit
    );
}

fn print_detail(product: &Product) {
    println!("{} (#{})", product.title, product.id);
    if let Some(brand) = &product.brand {
        println!("  brand:    {brand}");
    }
    println!("  category: {}", product.category);
    if product.has_discount() {
        println!(
            "  price:    {} (was {}, {:.0}% off)",
            product.discounted_price(),
            product.price,
            product.discount_percentage
        );
    } else {
        println!("  price:    {}", product.price);
    }
    println!("  rating:   {:.2}", product.rating);
    println!("  stock:    {} ({})", product.stock, product.stock_status());
    if !product.tags.is_empty() {
        println!("  tags:     {}", product.tags.join(", "));
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
}
