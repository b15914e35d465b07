//! Domain model and pure logic for the Shopfront storefront client.
//!
//! Products, categories, orders, the client-side cart, listing filters,
//! delivery charges and WhatsApp inquiry formatting. Nothing in this crate
//! performs network I/O; the HTTP side lives in `shopfront-client`.

pub mod addresses;
pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod inquiry;
pub mod inventory;
pub mod observe;
pub mod orders;
pub mod pricing;
pub mod products;

#[cfg(test)]
mod test_support;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, LocalSettings};
pub use cart::{CartError, CartItem, CartStorage, CartStore, FileCartStorage, MemoryCartStorage};
pub use catalog::{filter_and_sort, slugify, CatalogError, ListingFilter, SortKey};
pub use config::{load_app_config_from_env, load_local_settings_from_env};
pub use inquiry::{InquiryForm, InquiryStatus, InquiryValidationError, WhatsAppInquiry};
pub use inventory::{InventorySummary, StockStatus};
pub use observe::{Observable, Subscription};
pub use orders::{
    DeliveryCharges, DeliveryConfig, Order, OrderItem, OrderRequest, OrderStatus, ShippingAddress,
};
pub use pricing::effective_price;
pub use products::{Category, Product, ProductModule, ProductStatus};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid order status: {0}")]
    InvalidOrderStatus(String),

    #[error("invalid inquiry status: {0}")]
    InvalidInquiryStatus(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
