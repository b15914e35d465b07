//! Wishlist endpoints. All of them require a session.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use shopfront_core::Product;

use crate::client::ShopfrontClient;
use crate::error::ClientError;

#[derive(Deserialize)]
struct WishlistEnvelope {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WishlistCheck {
    is_in_wishlist: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WishlistAdd<'a> {
    product_id: &'a str,
}

impl ShopfrontClient {
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status or an
    /// unexpected body.
    pub async fn get_wishlist(&self) -> Result<Vec<Product>, ClientError> {
        let envelope: WishlistEnvelope = self.get_json("/wishlist", &[]).await?;
        Ok(envelope.products)
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status or an
    /// unexpected body.
    pub async fn is_in_wishlist(&self, product_id: &str) -> Result<bool, ClientError> {
        let check: WishlistCheck = self
            .get_json(&format!("/wishlist/check/{product_id}"), &[])
            .await?;
        Ok(check.is_in_wishlist)
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API rejects the addition.
    pub async fn add_to_wishlist(&self, product_id: &str) -> Result<(), ClientError> {
        self.send_discarding(Method::POST, "/wishlist", Some(&WishlistAdd { product_id }))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API rejects the removal.
    pub async fn remove_from_wishlist(&self, product_id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/wishlist/{product_id}")).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API rejects the request.
    pub async fn clear_wishlist(&self) -> Result<(), ClientError> {
        self.delete("/wishlist").await
    }
}
