//! Client-owned shopping cart.
//!
//! The cart keeps a denormalized snapshot of each product taken when it was
//! added, keyed by product id. Every mutation rewrites the whole cart to its
//! [`CartStorage`] backend; there is no merging between writers.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observe::{Observable, Subscription};
use crate::orders::{ChargeLine, OrderItem};
use crate::pricing::line_total;
use crate::products::Product;

/// File name of the persisted cart inside the data directory.
pub const CART_STORAGE_KEY: &str = "cart.json";

#[derive(Debug, Error)]
pub enum CartError {
    #[error("cart storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        line_total(self.product.price, self.product.discount, self.quantity)
    }
}

/// Durable slot holding the serialized cart.
pub trait CartStorage {
    /// Returns the stored cart text, or `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Io`] if the backend cannot be read.
    fn load(&self) -> Result<Option<String>, CartError>;

    /// Overwrites the stored cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Io`] if the backend cannot be written.
    fn save(&self, contents: &str) -> Result<(), CartError>;

    /// Deletes the stored cart. Deleting an absent entry succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Io`] if the backend cannot be modified.
    fn remove(&self) -> Result<(), CartError>;
}

/// Stores the cart as JSON in `<data_dir>/cart.json`.
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    path: PathBuf,
}

impl FileCartStorage {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CART_STORAGE_KEY),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> CartError {
        CartError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CartStorage for FileCartStorage {
    fn load(&self) -> Result<Option<String>, CartError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_err(e)),
        }
    }

    fn save(&self, contents: &str) -> Result<(), CartError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| self.io_err(e))?;
        }
        std::fs::write(&self.path, contents).map_err(|e| self.io_err(e))
    }

    fn remove(&self) -> Result<(), CartError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_err(e)),
        }
    }
}

/// In-process storage. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryCartStorage {
    #[must_use]
    pub fn with_contents(contents: &str) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(contents.to_string()))),
        }
    }

    /// Current stored text, for inspection.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Result<Option<String>, CartError> {
        Ok(self.contents())
    }

    fn save(&self, contents: &str) -> Result<(), CartError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(contents.to_string());
        }
        Ok(())
    }

    fn remove(&self) -> Result<(), CartError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}

/// The cart, its persistence backend and its subscribers.
pub struct CartStore<S: CartStorage> {
    storage: S,
    items: Observable<Vec<CartItem>>,
}

impl<S: CartStorage> CartStore<S> {
    /// Loads the cart from `storage`.
    ///
    /// A missing entry yields an empty cart. An unreadable or corrupted entry
    /// is logged and also yields an empty cart.
    pub fn load(storage: S) -> Self {
        let items = match storage.load() {
            Ok(Some(raw)) => serde_json::from_str::<Vec<CartItem>>(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stored cart is corrupted; starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored cart; starting empty");
                Vec::new()
            }
        };

        Self {
            storage,
            items: Observable::new(items),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.items.get()
    }

    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items().iter().find(|i| i.product.id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Sum of effective price times quantity over every line.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items().iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities, not the number of distinct products.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items().iter().map(|i| i.quantity).sum()
    }

    /// Adds `quantity` units of `product`, merging into an existing line.
    ///
    /// A zero quantity leaves the cart untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the cart cannot be persisted. The in-memory
    /// cart keeps the change either way.
    pub fn add(&mut self, product: Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Ok(());
        }
        self.items.update(|items| {
            if let Some(existing) = items.iter_mut().find(|i| i.product.id == product.id) {
                existing.quantity = existing.quantity.saturating_add(quantity);
            } else {
                items.push(CartItem { product, quantity });
            }
        });
        self.persist()
    }

    /// Sets a line's quantity. Zero or negative removes the line; an unknown
    /// product id is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the cart cannot be persisted.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if self.get(product_id).is_none() {
            return Ok(());
        }
        self.items.update(|items| {
            if let Some(line) = items.iter_mut().find(|i| i.product.id == product_id) {
                line.quantity = quantity;
            }
        });
        self.persist()
    }

    /// # Errors
    ///
    /// Returns [`CartError`] if the cart cannot be persisted.
    pub fn remove(&mut self, product_id: &str) -> Result<(), CartError> {
        self.items
            .update(|items| items.retain(|i| i.product.id != product_id));
        self.persist()
    }

    /// Empties the cart and deletes the persisted entry.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the persisted entry cannot be removed.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.items.set(Vec::new());
        self.storage.remove()
    }

    /// Registers a callback invoked with the full item list after every change.
    pub fn subscribe(
        &mut self,
        callback: impl Fn(&Vec<CartItem>) + Send + Sync + 'static,
    ) -> Subscription {
        self.items.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.items.unsubscribe(subscription)
    }

    /// `{productId, quantity}` pairs for the delivery calculator.
    #[must_use]
    pub fn charge_lines(&self) -> Vec<ChargeLine> {
        self.items()
            .iter()
            .map(|i| ChargeLine {
                product_id: i.product.id.clone(),
                quantity: i.quantity,
            })
            .collect()
    }

    /// Order lines priced at the current effective price.
    #[must_use]
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.items()
            .iter()
            .map(|i| OrderItem {
                product_id: i.product.id.clone(),
                product_name: i.product.name.clone(),
                quantity: i.quantity,
                price: i.product.effective_price(),
                discount: i.product.discount,
            })
            .collect()
    }

    fn persist(&self) -> Result<(), CartError> {
        let raw = serde_json::to_string(self.items())?;
        self.storage.save(&raw)
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
