//! Sending a product inquiry: validate, build the WhatsApp link and log the
//! inquiry to the backend in the background.

use chrono::NaiveDateTime;
use shopfront_core::inquiry::{compose_message, whatsapp_url};
use shopfront_core::{InquiryForm, InquiryValidationError, Product};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::client::ShopfrontClient;

#[derive(Debug, Error)]
pub enum InquiryError {
    #[error(transparent)]
    Invalid(#[from] InquiryValidationError),
}

/// A ready-to-open WhatsApp link plus the background task recording the
/// inquiry.
#[derive(Debug)]
pub struct InquiryDispatch {
    pub whatsapp_url: String,
    pub message: String,
    /// Completes once the backend log attempt has finished. Its outcome is
    /// only logged; awaiting it just keeps the task alive.
    pub log_task: JoinHandle<()>,
}

pub struct InquiryDispatcher {
    client: ShopfrontClient,
    storefront_origin: String,
    whatsapp_number: String,
}

impl InquiryDispatcher {
    #[must_use]
    pub fn new(client: ShopfrontClient, storefront_origin: &str, whatsapp_number: &str) -> Self {
        Self {
            client,
            storefront_origin: storefront_origin.to_owned(),
            whatsapp_number: whatsapp_number.to_owned(),
        }
    }

    /// Builds a dispatcher using the store number from the delivery
    /// configuration. If the configuration cannot be fetched the number is
    /// left empty and every send fails validation.
    pub async fn load(client: ShopfrontClient, storefront_origin: &str) -> Self {
        let whatsapp_number = match client.get_delivery_config().await {
            Ok(config) => config.whatsapp_number,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load WhatsApp number from delivery config");
                String::new()
            }
        };
        Self::new(client, storefront_origin, &whatsapp_number)
    }

    #[must_use]
    pub fn whatsapp_number(&self) -> &str {
        &self.whatsapp_number
    }

    /// Validates `form`, composes the message and spawns the backend log.
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`InquiryError::Invalid`] before anything is sent when the
    /// message or name is blank or no store number is configured.
    pub fn send(
        &self,
        product: &Product,
        form: &InquiryForm,
        at: &NaiveDateTime,
    ) -> Result<InquiryDispatch, InquiryError> {
        form.validate(&self.whatsapp_number)?;

        let message = compose_message(form, product, &self.storefront_origin, at);
        let url = whatsapp_url(&self.whatsapp_number, &message);

        let client = self.client.clone();
        let request = form.to_request(&product.id);
        let log_task = tokio::spawn(async move {
            match client.create_inquiry(&request).await {
                Ok(inquiry) => tracing::info!(
                    inquiry_id = inquiry.id.as_deref().unwrap_or("-"),
                    product_id = %request.product_id,
                    "inquiry logged"
                ),
                Err(e) => tracing::warn!(
                    error = %e,
                    product_id = %request.product_id,
                    "failed to log inquiry"
                ),
            }
        });

        Ok(InquiryDispatch {
            whatsapp_url: url,
            message,
            log_task,
        })
    }
}
