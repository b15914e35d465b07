//! Customer-side command handlers: the local cart, checkout, the wishlist
//! and the delivery address directory.

mod addresses;
mod cart;
mod checkout;
mod wishlist;

use clap::Subcommand;

pub(crate) use addresses::run_addresses;
pub(crate) use cart::{run_cart, run_local_cart};
pub(crate) use checkout::{print_totals, run_checkout, AddressForm};
pub(crate) use wishlist::run_wishlist;

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show cart contents and total
    Show,
    /// Add a product, or increase its quantity if already in the cart
    Add {
        product: String,
        #[arg(long, default_value = "1")]
        qty: u32,
    },
    /// Set a product's quantity; zero or less removes it
    Update {
        product: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product
    Remove { product: String },
    /// Empty the cart
    Clear,
}

/// Sub-commands available under `wishlist`.
#[derive(Debug, Subcommand)]
pub enum WishlistCommands {
    /// List saved products
    List,
    /// Save a product
    Add { product: String },
    /// Remove a saved product
    Remove { product: String },
    /// Save the product if absent, remove it if present
    Toggle { product: String },
    /// Remove every saved product
    Clear,
}
