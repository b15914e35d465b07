//! Cached collections that refetch after every mutation.
//!
//! Reads refresh a cache from the API; a mutation issues its call and then
//! reloads the whole affected collection so the cache always mirrors the
//! server. Subscribers are told about every reload.

use shopfront_core::catalog::{self, validate_parent, CatalogError};
use shopfront_core::products::{CategoryInput, ProductInput, ProductModuleInput};
use shopfront_core::{
    Category, Observable, Order, OrderRequest, OrderStatus, Product, ProductModule, Subscription,
};
use thiserror::Error;

use crate::client::ShopfrontClient;
use crate::error::ClientError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Which slice of the catalog a store mirrors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scope {
    /// Active modules and products only.
    #[default]
    Storefront,
    /// Everything, including inactive records.
    Admin,
}

pub struct CatalogStore {
    client: ShopfrontClient,
    scope: Scope,
    modules: Observable<Vec<ProductModule>>,
    categories: Observable<Vec<Category>>,
    products: Observable<Vec<Product>>,
    orders: Observable<Vec<Order>>,
}

impl CatalogStore {
    #[must_use]
    pub fn new(client: ShopfrontClient, scope: Scope) -> Self {
        Self {
            client,
            scope,
            modules: Observable::default(),
            categories: Observable::default(),
            products: Observable::default(),
            orders: Observable::default(),
        }
    }

    #[must_use]
    pub fn client(&self) -> &ShopfrontClient {
        &self.client
    }

    #[must_use]
    pub fn modules(&self) -> &[ProductModule] {
        self.modules.get()
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        self.categories.get()
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.products.get()
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        self.orders.get()
    }

    /// Active modules from the cache.
    #[must_use]
    pub fn active_modules(&self) -> Vec<ProductModule> {
        catalog::active_modules(self.modules())
    }

    /// Subcategories of `category_id` from the cache.
    #[must_use]
    pub fn subcategories_of(&self, category_id: &str) -> Vec<&Category> {
        catalog::subcategories_of(self.categories(), category_id)
    }

    pub fn subscribe_modules(
        &mut self,
        callback: impl Fn(&Vec<ProductModule>) + Send + Sync + 'static,
    ) -> Subscription {
        self.modules.subscribe(callback)
    }

    pub fn subscribe_categories(
        &mut self,
        callback: impl Fn(&Vec<Category>) + Send + Sync + 'static,
    ) -> Subscription {
        self.categories.subscribe(callback)
    }

    pub fn subscribe_products(
        &mut self,
        callback: impl Fn(&Vec<Product>) + Send + Sync + 'static,
    ) -> Subscription {
        self.products.subscribe(callback)
    }

    pub fn subscribe_orders(
        &mut self,
        callback: impl Fn(&Vec<Order>) + Send + Sync + 'static,
    ) -> Subscription {
        self.orders.subscribe(callback)
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the list cannot be fetched. The cache is
    /// left unchanged.
    pub async fn refresh_modules(&mut self) -> Result<&[ProductModule], ClientError> {
        let modules = match self.scope {
            Scope::Storefront => self.client.list_active_modules().await?,
            Scope::Admin => self.client.list_all_modules().await?,
        };
        self.modules.set(modules);
        Ok(self.modules())
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the list cannot be fetched.
    pub async fn refresh_categories(&mut self) -> Result<&[Category], ClientError> {
        let categories = self.client.list_categories().await?;
        self.categories.set(categories);
        Ok(self.categories())
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the list cannot be fetched.
    pub async fn refresh_products(&mut self) -> Result<&[Product], ClientError> {
        let products = match self.scope {
            Scope::Storefront => self.client.list_products(None, None).await?,
            Scope::Admin => self.client.list_all_products().await?,
        };
        self.products.set(products);
        Ok(self.products())
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the list cannot be fetched.
    pub async fn refresh_orders(&mut self) -> Result<&[Order], ClientError> {
        let orders = self.client.list_orders().await?;
        self.orders.set(orders);
        Ok(self.orders())
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the call or the reload fails.
    pub async fn create_module(
        &mut self,
        input: &ProductModuleInput,
    ) -> Result<ProductModule, StoreError> {
        let created = self.client.create_module(input).await?;
        self.refresh_modules().await?;
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the call or the reload fails.
    pub async fn update_module(&mut self, module: &ProductModule) -> Result<ProductModule, StoreError> {
        let updated = self.client.update_module(module).await?;
        self.refresh_modules().await?;
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the call or the reload fails.
    pub async fn delete_module(&mut self, id: &str) -> Result<(), StoreError> {
        self.client.delete_module(id).await?;
        self.refresh_modules().await?;
        Ok(())
    }

    /// Creates a category after checking its parent against the cached
    /// hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Catalog`] for an invalid parent, before any
    /// request is sent, or [`StoreError::Client`] if the call or reload fails.
    pub async fn create_category(&mut self, input: &CategoryInput) -> Result<Category, StoreError> {
        validate_parent(
            self.categories(),
            &input.product_module_id,
            None,
            input.parent_category_id.as_deref(),
        )?;
        let created = self.client.create_category(input).await?;
        self.refresh_categories().await?;
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Catalog`] for an invalid parent or when a
    /// category with subcategories would become one itself, before any
    /// request is sent, or [`StoreError::Client`] if the call or reload fails.
    pub async fn update_category(&mut self, category: &Category) -> Result<Category, StoreError> {
        validate_parent(
            self.categories(),
            &category.product_module_id,
            Some(&category.id),
            category.parent_category_id.as_deref(),
        )?;
        let updated = self.client.update_category(category).await?;
        self.refresh_categories().await?;
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the call or the reload fails.
    pub async fn delete_category(&mut self, id: &str) -> Result<(), StoreError> {
        self.client.delete_category(id).await?;
        self.refresh_categories().await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the call or the reload fails.
    pub async fn create_product(&mut self, input: &ProductInput) -> Result<Product, StoreError> {
        let created = self.client.create_product(input).await?;
        self.refresh_products().await?;
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the call or the reload fails.
    pub async fn update_product(&mut self, product: &Product) -> Result<Product, StoreError> {
        let updated = self.client.update_product(product).await?;
        self.refresh_products().await?;
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the call or the reload fails.
    pub async fn delete_product(&mut self, id: &str) -> Result<(), StoreError> {
        self.client.delete_product(id).await?;
        self.refresh_products().await?;
        Ok(())
    }

    /// Places an order, then reloads orders and products (stock may have
    /// changed).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the order is rejected. Reload failures after
    /// a successful order are logged, not returned.
    pub async fn place_order(&mut self, request: &OrderRequest) -> Result<Order, StoreError> {
        let order = self.client.create_order(request).await?;
        if let Err(e) = self.refresh_orders().await {
            tracing::warn!(error = %e, "failed to reload orders after placing order");
        }
        if let Err(e) = self.refresh_products().await {
            tracing::warn!(error = %e, "failed to reload products after placing order");
        }
        Ok(order)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the call or the reload fails.
    pub async fn update_order_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, StoreError> {
        let order = self.client.update_order_status(order_id, status).await?;
        self.refresh_orders().await?;
        Ok(order)
    }
}

/// The signed-in customer's saved products.
pub struct WishlistStore {
    client: ShopfrontClient,
    products: Observable<Vec<Product>>,
}

impl WishlistStore {
    #[must_use]
    pub fn new(client: ShopfrontClient) -> Self {
        Self {
            client,
            products: Observable::default(),
        }
    }

    /// Reloads the wishlist. Without a session, or when the request fails,
    /// the list becomes empty; failures are logged.
    pub async fn load(&mut self) -> &[Product] {
        if !self.client.has_session() {
            self.products.set(Vec::new());
            return self.products();
        }
        match self.client.get_wishlist().await {
            Ok(products) => self.products.set(products),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load wishlist");
                self.products.set(Vec::new());
            }
        }
        self.products()
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.products.get()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.products().len()
    }

    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.products().iter().any(|p| p.id == product_id)
    }

    pub fn subscribe(
        &mut self,
        callback: impl Fn(&Vec<Product>) + Send + Sync + 'static,
    ) -> Subscription {
        self.products.subscribe(callback)
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the addition is rejected.
    pub async fn add(&mut self, product_id: &str) -> Result<(), ClientError> {
        self.client.add_to_wishlist(product_id).await?;
        self.load().await;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the removal is rejected.
    pub async fn remove(&mut self, product_id: &str) -> Result<(), ClientError> {
        self.client.remove_from_wishlist(product_id).await?;
        self.load().await;
        Ok(())
    }

    /// Adds or removes `product_id` based on the local list. Returns whether
    /// the product is in the wishlist afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the underlying call fails.
    pub async fn toggle(&mut self, product_id: &str) -> Result<bool, ClientError> {
        if self.contains(product_id) {
            self.remove(product_id).await?;
            Ok(false)
        } else {
            self.add(product_id).await?;
            Ok(true)
        }
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails; the local list is kept.
    pub async fn clear(&mut self) -> Result<(), ClientError> {
        self.client.clear_wishlist().await?;
        self.products.set(Vec::new());
        Ok(())
    }
}
