//! Order and delivery-configuration endpoints.

use reqwest::Method;
use serde::Serialize;
use shopfront_core::orders::ChargeRequest;
use shopfront_core::{DeliveryCharges, DeliveryConfig, Order, OrderRequest, OrderStatus};

use crate::client::ShopfrontClient;
use crate::error::ClientError;

#[derive(Serialize)]
struct StatusBody {
    status: String,
}

impl ShopfrontClient {
    /// Orders visible to the current session; all orders for an admin.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status or an
    /// unexpected body.
    pub async fn list_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.get_json("/orders", &[]).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown id.
    pub async fn get_order(&self, id: &str) -> Result<Order, ClientError> {
        self.get_json(&format!("/orders/{id}"), &[]).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API rejects the order.
    pub async fn create_order(&self, order: &OrderRequest) -> Result<Order, ClientError> {
        self.post_json("/orders", order).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API rejects the status change.
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, ClientError> {
        self.put_json(&format!("/orders/{order_id}/status"), &status_body(status))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status or an
    /// unexpected body.
    pub async fn get_delivery_config(&self) -> Result<DeliveryConfig, ClientError> {
        self.get_json("/delivery-config", &[]).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API rejects the configuration.
    pub async fn update_delivery_config(&self, config: &DeliveryConfig) -> Result<(), ClientError> {
        self.send_discarding(Method::PUT, "/delivery-config", Some(config))
            .await
    }

    /// Asks the API for packaging and delivery charges for a destination
    /// state and cart.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status or an
    /// unexpected body. Callers usually fall back to
    /// [`DeliveryCharges::fallback`].
    pub async fn calculate_charges(
        &self,
        request: &ChargeRequest,
    ) -> Result<DeliveryCharges, ClientError> {
        self.post_json("/delivery-config/calculate", request).await
    }
}

pub(crate) fn status_body(status: impl ToString) -> impl Serialize {
    StatusBody {
        status: status.to_string(),
    }
}
