//! Furniture Finder CLI - a terminal shop front.
//!
//! # Usage
//!
//! ```bash
//! # Log in as a demo shopper (any non-blank password)
//! ff-cli login -e ethan.carter@email.com -p secret
//!
//! # Browse and search the catalog
//! ff-cli products --sort price-asc --max-price 500
//! ff-cli search chair --sort rating-desc
//! ff-cli product 12
//!
//! # Manage the cart and favorites
//! ff-cli cart add 12 -q 2
//! ff-cli cart checkout
//! ff-cli favorites toggle 12
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` / `profile` - Session management
//! - `products` / `product` / `search` / `suggest` / `categories` - Catalog
//! - `cart` - Cart lines, totals and checkout
//! - `favorites` - Liked products
//!
//! State is kept in `STOREFRONT_DATA_DIR` between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use furniture_finder_core::ProductId;
use furniture_finder_storefront::browse::{DEFAULT_PREDICTIONS, SortOption};
use furniture_finder_storefront::config::StorefrontConfig;
use furniture_finder_storefront::error::AppError;
use furniture_finder_storefront::state::AppState;
use furniture_finder_storefront::storage::FileStore;
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "ff-cli")]
#[command(author, version, about = "Furniture Finder shop front")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with a directory account
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Password (any non-blank value is accepted)
        #[arg(short, long)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Manage the logged-in user's profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// List catalog products
    Products {
        /// Page size (defaults to `CATALOG_PAGE_SIZE`)
        #[arg(long)]
        limit: Option<u32>,

        /// Number of products to skip
        #[arg(long, default_value_t = 0)]
        skip: u32,

        /// Only products whose title or description contains this text
        #[arg(long)]
        query: Option<String>,

        /// Lowest price to show, inclusive
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Highest price to show, inclusive
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Sort order (price-asc, price-desc, name-asc, name-desc, rating-desc)
        #[arg(long)]
        sort: Option<SortOption>,
    },
    /// Show one product
    Product {
        /// Product ID
        id: ProductId,
    },
    /// Search the catalog
    Search {
        /// Search text; blank lists the first catalog page
        #[arg(default_value = "")]
        query: String,

        /// Lowest price to show, inclusive
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Highest price to show, inclusive
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Sort order
        #[arg(long)]
        sort: Option<SortOption>,
    },
    /// Suggest product titles for partial input
    Suggest {
        /// Partial title
        text: String,

        /// Maximum number of suggestions
        #[arg(long, default_value_t = DEFAULT_PREDICTIONS)]
        limit: usize,
    },
    /// List home-furnishing categories
    Categories,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Set the profile image reference (URI or path)
    SetImage { reference: String },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a product
    Add {
        id: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Remove a product
    Remove { id: ProductId },
    /// Set a product's quantity; zero or less removes it
    Set {
        id: ProductId,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Place the order and empty the cart
    Checkout,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List liked products
    List,
    /// Like a product
    Add { id: ProductId },
    /// Unlike a product
    Remove { id: ProductId },
    /// Like or unlike a product
    Toggle { id: ProductId },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::debug!("Sentry initialized");
    Some(guard)
}

/// Route tracing events to Sentry: errors and warnings become events,
/// info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Logs go to stderr so command output on stdout stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "furniture_finder_storefront=info,furniture_finder_cli=info".into()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            AppError::from(e).report();
            std::process::exit(1);
        }
    };
    let sentry_guard = init_sentry(&config);

    if let Err(e) = run(cli, config).await {
        e.report();
        // Flush pending Sentry events before exiting
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), AppError> {
    let mut state: AppState<FileStore> = AppState::open(config).await?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&mut state, &email, &password).await?;
        }
        Commands::Logout => commands::auth::logout(&mut state).await,
        Commands::Whoami => commands::auth::whoami(&state),
        Commands::Profile { action } => match action {
            ProfileAction::SetImage { reference } => {
                commands::auth::set_profile_image(&mut state, &reference).await?;
            }
        },
        Commands::Products {
            limit,
            skip,
            query,
            min_price,
            max_price,
            sort,
        } => {
            let listing = commands::catalog::Listing {
                limit,
                skip,
                query,
                min_price,
                max_price,
                sort,
            };
            commands::catalog::products(&state, listing).await?;
        }
        Commands::Product { id } => commands::catalog::product(&state, id).await?,
        Commands::Search {
            query,
            min_price,
            max_price,
            sort,
        } => {
            let search = commands::catalog::Search {
                query,
                min_price,
                max_price,
                sort,
            };
            commands::catalog::search(&state, search).await?;
        }
        Commands::Suggest { text, limit } => commands::catalog::suggest(&state, &text, limit).await?,
        Commands::Categories => commands::catalog::categories(&state).await,
        Commands::Cart { action } => {
            let mut session = state.open_user_session().await?;
            match action {
                CartAction::Show => commands::cart::show(&session.cart),
                CartAction::Add { id, quantity } => {
                    commands::cart::add(&state, &mut session.cart, id, quantity).await?;
                }
                CartAction::Remove { id } => commands::cart::remove(&mut session.cart, id).await?,
                CartAction::Set { id, quantity } => {
                    commands::cart::set_quantity(&mut session.cart, id, quantity).await?;
                }
                CartAction::Clear => commands::cart::clear(&mut session.cart).await,
                CartAction::Checkout => commands::cart::checkout(&mut session.cart).await?,
            }
        }
        Commands::Favorites { action } => {
            let mut session = state.open_user_session().await?;
            match action {
                FavoritesAction::List => commands::favorites::list(&session.favorites),
                FavoritesAction::Add { id } => {
                    commands::favorites::add(&state, &mut session.favorites, id).await?;
                }
                FavoritesAction::Remove { id } => {
                    commands::favorites::remove(&mut session.favorites, id).await?;
                }
                FavoritesAction::Toggle { id } => {
                    commands::favorites::toggle(&state, &mut session.favorites, id).await?;
                }
            }
        }
    }
    Ok(())
}
