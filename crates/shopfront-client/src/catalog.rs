//! Product-module, category and product endpoints.

use shopfront_core::inventory::remaining_stock;
use shopfront_core::products::{CategoryInput, ProductInput, ProductModuleInput};
use shopfront_core::{Category, Product, ProductModule};

use crate::client::ShopfrontClient;
use crate::error::ClientError;

impl ShopfrontClient {
    /// Active product modules, as shown on the storefront.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status or an
    /// unexpected body.
    pub async fn list_active_modules(&self) -> Result<Vec<ProductModule>, ClientError> {
        self.get_json("/product-modules", &[]).await
    }

    /// Every product module, including inactive ones.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status or an
    /// unexpected body.
    pub async fn list_all_modules(&self) -> Result<Vec<ProductModule>, ClientError> {
        self.get_json("/product-modules/all", &[]).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown id.
    pub async fn get_module(&self, id: &str) -> Result<ProductModule, ClientError> {
        self.get_json(&format!("/product-modules/{id}"), &[]).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown slug.
    pub async fn get_module_by_slug(&self, slug: &str) -> Result<ProductModule, ClientError> {
        self.get_json(&format!("/product-modules/slug/{slug}"), &[])
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API rejects the module.
    pub async fn create_module(
        &self,
        module: &ProductModuleInput,
    ) -> Result<ProductModule, ClientError> {
        self.post_json("/product-modules", module).await
    }

    /// Sends every field except the id, which goes in the path.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the API rejects the update.
    pub async fn update_module(&self, module: &ProductModule) -> Result<ProductModule, ClientError> {
        let body = ProductModuleInput::from(module);
        self.put_json(&format!("/product-modules/{}", module.id), &body)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API refuses the deletion.
    pub async fn delete_module(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/product-modules/{id}")).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status or an
    /// unexpected body.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.get_json("/categories", &[]).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status or an
    /// unexpected body.
    pub async fn list_categories_by_module(
        &self,
        module_id: &str,
    ) -> Result<Vec<Category>, ClientError> {
        self.get_json(&format!("/categories/module/{module_id}"), &[])
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown id.
    pub async fn get_category(&self, id: &str) -> Result<Category, ClientError> {
        self.get_json(&format!("/categories/{id}"), &[]).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API rejects the category.
    pub async fn create_category(&self, category: &CategoryInput) -> Result<Category, ClientError> {
        self.post_json("/categories", category).await
    }

    /// Sends every field except the id. A main category is sent with an
    /// explicit `null` parent so a former subcategory is promoted.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the API rejects the update.
    pub async fn update_category(&self, category: &Category) -> Result<Category, ClientError> {
        let body = CategoryInput::from(category);
        self.put_json(&format!("/categories/{}", category.id), &body)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API refuses the deletion.
    pub async fn delete_category(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/categories/{id}")).await
    }

    /// Active products, optionally narrowed to a module and/or category.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status or an
    /// unexpected body.
    pub async fn list_products(
        &self,
        module_id: Option<&str>,
        category_id: Option<&str>,
    ) -> Result<Vec<Product>, ClientError> {
        let mut query = Vec::new();
        if let Some(m) = module_id {
            query.push(("moduleId", m.to_owned()));
        }
        if let Some(c) = category_id {
            query.push(("categoryId", c.to_owned()));
        }
        self.get_json("/products", &query).await
    }

    /// Every product, including inactive ones.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status or an
    /// unexpected body.
    pub async fn list_all_products(&self) -> Result<Vec<Product>, ClientError> {
        self.get_json("/products/all", &[]).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown id.
    pub async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        self.get_json(&format!("/products/{id}"), &[]).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API rejects the product.
    pub async fn create_product(&self, product: &ProductInput) -> Result<Product, ClientError> {
        self.post_json("/products", product).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API rejects the update.
    pub async fn update_product(&self, product: &Product) -> Result<Product, ClientError> {
        let body = ProductInput::from(product);
        self.put_json(&format!("/products/{}", product.id), &body)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API refuses the deletion.
    pub async fn delete_product(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/products/{id}")).await
    }

    /// Decrements a product's stock by `quantity`, floored at zero, by
    /// reading the product and writing it back.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if either the read or the write fails.
    pub async fn adjust_stock(&self, product_id: &str, quantity: u32) -> Result<Product, ClientError> {
        let mut product = self.get_product(product_id).await?;
        product.stock = remaining_stock(product.stock, quantity);
        tracing::debug!(product_id, stock = product.stock, "adjusting product stock");
        self.update_product(&product).await
    }
}
