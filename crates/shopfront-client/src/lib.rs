//! Typed client for the Shopfront REST API, plus the stateful pieces built on
//! it: cached catalog and wishlist stores, the checkout flow and inquiry
//! dispatch.

pub mod checkout;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod session;
pub mod store;
pub mod uploads;

mod catalog;
mod inquiries;
mod orders;
mod wishlist;

pub use checkout::{ChargeSource, Checkout, CheckoutError, CheckoutState};
pub use client::ShopfrontClient;
pub use dispatch::{InquiryDispatch, InquiryDispatcher, InquiryError};
pub use error::ClientError;
pub use session::Session;
pub use store::{CatalogStore, Scope, StoreError, WishlistStore};
pub use uploads::UploadedImage;
