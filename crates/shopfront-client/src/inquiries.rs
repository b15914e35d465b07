//! WhatsApp inquiry endpoints.

use reqwest::Method;
use shopfront_core::inquiry::{
    InquiryFilter, InquiryRequest, InquiryStats, InquiryStatus, ResendOutcome, WhatsAppInquiry,
};

use crate::client::ShopfrontClient;
use crate::error::ClientError;
use crate::orders::status_body;

impl ShopfrontClient {
    /// Records an inquiry. The backend fills in product details from the id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the API rejects the inquiry.
    pub async fn create_inquiry(
        &self,
        inquiry: &InquiryRequest,
    ) -> Result<WhatsAppInquiry, ClientError> {
        self.post_json("/whatsapp-inquiries", inquiry).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status or an
    /// unexpected body.
    pub async fn list_inquiries(
        &self,
        filter: &InquiryFilter,
    ) -> Result<Vec<WhatsAppInquiry>, ClientError> {
        self.get_json("/whatsapp-inquiries", &filter.query_pairs())
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown id.
    pub async fn get_inquiry(&self, id: &str) -> Result<WhatsAppInquiry, ClientError> {
        self.get_json(&format!("/whatsapp-inquiries/{id}"), &[])
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API rejects the status change.
    pub async fn update_inquiry_status(
        &self,
        id: &str,
        status: InquiryStatus,
    ) -> Result<(), ClientError> {
        self.send_discarding(
            Method::PATCH,
            &format!("/whatsapp-inquiries/{id}/status"),
            Some(&status_body(status)),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API refuses the deletion.
    pub async fn delete_inquiry(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/whatsapp-inquiries/{id}")).await
    }

    /// Counts of inquiries per status.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status or an
    /// unexpected body.
    pub async fn inquiry_stats(&self) -> Result<InquiryStats, ClientError> {
        self.get_json("/whatsapp-inquiries/stats/summary", &[])
            .await
    }

    /// Asks the backend to resend an inquiry through the WhatsApp Business
    /// API. A delivery failure on the backend side is reported in the
    /// returned outcome, not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status or an
    /// unexpected body.
    pub async fn resend_inquiry(&self, id: &str) -> Result<ResendOutcome, ClientError> {
        self.post_json(
            &format!("/whatsapp-inquiries/{id}/resend"),
            &serde_json::json!({}),
        )
        .await
    }
}
