//! Catalog command handlers: modules, categories, products, the storefront
//! listing and the inventory overview.
//!
//! Admin commands go through a [`shopfront_client::CatalogStore`] in admin
//! scope so every mutation is followed by a reload of the collection.

mod categories;
mod listing;
mod modules;
mod products;

use clap::Subcommand;
use rust_decimal::Decimal;

pub(crate) use categories::run_categories;
pub(crate) use listing::{listing_filter, run_browse, run_inventory};
pub(crate) use modules::run_modules;
pub(crate) use products::run_products;

/// Sub-commands available under `modules`.
#[derive(Debug, Subcommand)]
pub enum ModulesCommands {
    /// List product modules
    List {
        /// Include inactive modules
        #[arg(long)]
        all: bool,
    },
    /// Show one module by id, or by slug with --slug
    Show {
        key: String,
        /// Treat the key as a slug
        #[arg(long)]
        slug: bool,
    },
    /// Create a module
    Add {
        name: String,
        /// URL slug (derived from the name when omitted)
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        banner: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Create the module hidden from the storefront
        #[arg(long)]
        inactive: bool,
    },
    /// Flip a module between active and inactive
    Toggle { id: String },
    /// Delete a module
    Delete { id: String },
}

/// Sub-commands available under `categories`.
#[derive(Debug, Subcommand)]
pub enum CategoriesCommands {
    /// List categories
    List {
        /// Only categories of this module (id)
        #[arg(long)]
        module: Option<String>,
    },
    /// Show main categories with their subcategories
    Tree {
        /// Only categories of this module (id)
        #[arg(long)]
        module: Option<String>,
    },
    /// Create a category, or a subcategory with --parent
    Add {
        name: String,
        /// Module the category belongs to (id)
        #[arg(long)]
        module: String,
        /// Parent category id; must be a main category of the same module
        #[arg(long)]
        parent: Option<String>,
        /// URL slug (derived from the name when omitted)
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        inactive: bool,
    },
    /// Edit a category
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Move under this main category
        #[arg(long, conflicts_with = "no_parent")]
        parent: Option<String>,
        /// Promote a subcategory to a main category
        #[arg(long)]
        no_parent: bool,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        #[arg(long)]
        inactive: bool,
    },
    /// Delete a category
    Delete { id: String },
}

/// Sub-commands available under `products`.
#[derive(Debug, Subcommand)]
pub enum ProductsCommands {
    /// List products
    List {
        /// Filter by module (id)
        #[arg(long)]
        module: Option<String>,
        /// Filter by category (id)
        #[arg(long)]
        category: Option<String>,
        /// Include inactive products (ignores the filters)
        #[arg(long)]
        all: bool,
    },
    /// Show one product
    Show { id: String },
    /// Create a product
    Add {
        name: String,
        #[arg(long)]
        price: Decimal,
        /// Percentage off the price, 0-100
        #[arg(long)]
        discount: Option<Decimal>,
        #[arg(long, default_value = "0")]
        stock: u32,
        /// Module id
        #[arg(long)]
        module: String,
        /// Category id
        #[arg(long)]
        category: String,
        /// Subcategory id
        #[arg(long)]
        subcategory: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        /// Image URL; repeat for several
        #[arg(long = "image")]
        images: Vec<String>,
        #[arg(long)]
        inactive: bool,
    },
    /// Edit a product
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        discount: Option<Decimal>,
        #[arg(long)]
        stock: Option<u32>,
        #[arg(long)]
        description: Option<String>,
        /// Append an image URL; repeat for several
        #[arg(long = "image")]
        images: Vec<String>,
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        #[arg(long)]
        inactive: bool,
    },
    /// Deduct sold units from a product's stock (never below zero)
    Deduct { id: String, quantity: u32 },
    /// Delete a product
    Delete { id: String },
}

/// `--active`/`--inactive` flag pair to an optional new state.
fn activity(active: bool, inactive: bool) -> Option<bool> {
    match (active, inactive) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
