mod catalog;
mod context;
mod delivery;
mod inquiry;
mod orders;
mod shop;
mod upload;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use crate::catalog::{CategoriesCommands, ModulesCommands, ProductsCommands};
use crate::context::App;
use crate::delivery::DeliveryCommands;
use crate::inquiry::InquiriesCommands;
use crate::orders::OrdersCommands;
use crate::shop::{CartCommands, WishlistCommands};
use crate::upload::UploadCommands;

#[derive(Debug, Parser)]
#[command(name = "shopfront")]
#[command(about = "Storefront and back-office client for the Shopfront API")]
struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage product modules
    Modules {
        #[command(subcommand)]
        command: ModulesCommands,
    },
    /// Manage categories and subcategories
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
    /// Browse the storefront listing
    Browse {
        /// Restrict to a product module (id)
        #[arg(long)]
        module: Option<String>,
        /// Category id; also matches products filed under it as a subcategory
        #[arg(long)]
        category: Option<String>,
        /// Subcategory id
        #[arg(long)]
        subcategory: Option<String>,
        /// Lowest effective price to include
        #[arg(long)]
        min_price: Option<Decimal>,
        /// Highest effective price to include
        #[arg(long)]
        max_price: Option<Decimal>,
        /// newest, price-low or price-high
        #[arg(long, default_value = "newest")]
        sort: String,
    },
    /// Show stock levels across every product
    Inventory {
        /// Only list products that are low or out of stock
        #[arg(long)]
        low: bool,
    },
    /// Inspect and edit the local cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Compute delivery charges for the cart and place an order
    Checkout {
        #[arg(long)]
        name: String,
        /// Street address
        #[arg(long)]
        address: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        city: String,
        /// Pincode
        #[arg(long)]
        zip: String,
        #[arg(long)]
        phone: String,
        /// Show charges and total without placing the order
        #[arg(long)]
        dry_run: bool,
    },
    /// Track orders
    Orders {
        #[command(subcommand)]
        command: OrdersCommands,
    },
    /// Manage your wishlist
    Wishlist {
        #[command(subcommand)]
        command: WishlistCommands,
    },
    /// Ask about a product over WhatsApp
    Inquire {
        /// Product id
        product: String,
        /// Message to send (defaults to a generic interest message)
        #[arg(long)]
        message: Option<String>,
        /// Your name (defaults to SHOPFRONT_USER_NAME)
        #[arg(long)]
        name: Option<String>,
        /// Your email (defaults to SHOPFRONT_USER_EMAIL)
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Review WhatsApp inquiries (admin)
    Inquiries {
        #[command(subcommand)]
        command: InquiriesCommands,
    },
    /// Delivery charges and store contact settings
    Delivery {
        #[command(subcommand)]
        command: DeliveryCommands,
    },
    /// Upload or delete product images
    Upload {
        #[command(subcommand)]
        command: UploadCommands,
    },
    /// List supported delivery states, their cities and pincodes
    Addresses {
        state: Option<String>,
        city: Option<String>,
    },
}

impl Commands {
    /// Commands that only touch local state run without API configuration.
    fn needs_api(&self) -> bool {
        match self {
            Commands::Addresses { .. } => false,
            Commands::Cart { command } => matches!(command, CartCommands::Add { .. }),
            _ => true,
        }
    }
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run_local(command: Commands, assume_yes: bool) -> anyhow::Result<()> {
    let settings = shopfront_core::load_local_settings_from_env();
    init_logging(&settings.log_level)?;
    tracing::debug!(?settings, "running without API configuration");

    match command {
        Commands::Addresses { state, city } => {
            shop::run_addresses(state.as_deref(), city.as_deref());
            Ok(())
        }
        Commands::Cart { command } => {
            let mut cart = context::open_cart(&settings.data_dir);
            shop::run_local_cart(&mut cart, command, assume_yes)
        }
        _ => anyhow::bail!("this command needs the Shopfront API"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("shopfront ready; run `shopfront --help` for commands");
        return Ok(());
    };
    if !command.needs_api() {
        return run_local(command, cli.yes);
    }

    let config = shopfront_core::load_app_config_from_env()?;
    init_logging(&config.log_level)?;
    tracing::debug!(?config, "configuration loaded");

    let app = App::new(config, cli.yes)?;
    match command {
        Commands::Modules { command } => catalog::run_modules(&app, command).await?,
        Commands::Categories { command } => catalog::run_categories(&app, command).await?,
        Commands::Products { command } => catalog::run_products(&app, command).await?,
        Commands::Browse {
            module,
            category,
            subcategory,
            min_price,
            max_price,
            sort,
        } => {
            let filter = catalog::listing_filter(category, subcategory, min_price, max_price, &sort);
            catalog::run_browse(&app, module.as_deref(), &filter).await?;
        }
        Commands::Inventory { low } => catalog::run_inventory(&app, low).await?,
        Commands::Cart { command } => shop::run_cart(&app, command).await?,
        Commands::Checkout {
            name,
            address,
            state,
            city,
            zip,
            phone,
            dry_run,
        } => {
            let form = shop::AddressForm {
                name,
                address,
                state,
                city,
                zip,
                phone,
            };
            shop::run_checkout(&app, &form, dry_run).await?;
        }
        Commands::Orders { command } => orders::run_orders(&app, command).await?,
        Commands::Wishlist { command } => shop::run_wishlist(&app, command).await?,
        Commands::Inquire {
            product,
            message,
            name,
            email,
            phone,
        } => {
            let overrides = inquiry::FormOverrides {
                message,
                name,
                email,
                phone,
            };
            inquiry::run_inquire(&app, &product, overrides).await?;
        }
        Commands::Inquiries { command } => inquiry::run_inquiries(&app, command).await?,
        Commands::Delivery { command } => delivery::run_delivery(&app, command).await?,
        Commands::Upload { command } => upload::run_upload(&app, command).await?,
        Commands::Addresses { state, city } => {
            shop::run_addresses(state.as_deref(), city.as_deref());
        }
    }

    Ok(())
}

#[cfg(test)]
mod test_support;
