//! WhatsApp product inquiries: records, form validation, message template
//! and `wa.me` link construction.

use chrono::{DateTime, NaiveDateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::Product;
use crate::CoreError;

/// Characters `encodeURIComponent` leaves untouched are the only ones not
/// escaped here.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const WHATSAPP_BASE: &str = "https://wa.me/";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    Pending,
    Responded,
    Closed,
}

impl InquiryStatus {
    /// Allowed moves: pending to responded or closed, responded to closed.
    #[must_use]
    pub fn can_transition_to(self, next: InquiryStatus) -> bool {
        matches!(
            (self, next),
            (InquiryStatus::Pending, InquiryStatus::Responded | InquiryStatus::Closed)
                | (InquiryStatus::Responded, InquiryStatus::Closed)
        )
    }
}

impl std::fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InquiryStatus::Pending => write!(f, "pending"),
            InquiryStatus::Responded => write!(f, "responded"),
            InquiryStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for InquiryStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InquiryStatus::Pending),
            "responded" => Ok(InquiryStatus::Responded),
            "closed" => Ok(InquiryStatus::Closed),
            other => Err(CoreError::InvalidInquiryStatus(other.to_string())),
        }
    }
}

/// An inquiry as stored by the backend. Records are append-only apart from
/// their status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppInquiry {
    #[serde(default)]
    pub id: Option<String>,
    pub product_id: String,
    pub product_name: String,
    pub product_link: String,
    pub product_price: Decimal,
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    pub user_name: String,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_phone: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status: InquiryStatus,
    #[serde(default)]
    pub whatsapp_url: Option<String>,
    #[serde(default)]
    pub whatsapp_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /whatsapp-inquiries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRequest {
    pub product_id: String,
    pub message: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_phone: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryStats {
    pub total: u64,
    pub pending: u64,
    pub responded: u64,
    pub closed: u64,
}

/// Result of `POST /whatsapp-inquiries/{id}/resend`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
}

/// Optional filters for listing inquiries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryFilter {
    pub status: Option<InquiryStatus>,
    pub product_id: Option<String>,
    pub user_id: Option<String>,
}

impl InquiryFilter {
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(p) = &self.product_id {
            pairs.push(("productId", p.clone()));
        }
        if let Some(u) = &self.user_id {
            pairs.push(("userId", u.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InquiryValidationError {
    #[error("Please enter your inquiry message")]
    EmptyMessage,

    #[error("Please enter your name")]
    EmptyName,

    #[error("WhatsApp number not configured. Please contact admin.")]
    NumberNotConfigured,
}

/// What the customer fills in before contacting the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryForm {
    pub message: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
}

impl InquiryForm {
    /// A form with the default message and, when known, the customer's
    /// name and email.
    #[must_use]
    pub fn prefilled(product: &Product, user_name: Option<&str>, user_email: Option<&str>) -> Self {
        Self {
            message: default_message(&product.name),
            user_name: user_name.unwrap_or_default().to_string(),
            user_email: user_email.unwrap_or_default().to_string(),
            user_phone: String::new(),
        }
    }

    /// Checks the form against the configured store number, in the order the
    /// customer would be warned.
    ///
    /// # Errors
    ///
    /// Returns the first [`InquiryValidationError`] that applies.
    pub fn validate(&self, whatsapp_number: &str) -> Result<(), InquiryValidationError> {
        if self.message.trim().is_empty() {
            return Err(InquiryValidationError::EmptyMessage);
        }
        if self.user_name.trim().is_empty() {
            return Err(InquiryValidationError::EmptyName);
        }
        if whatsapp_number.trim().is_empty() {
            return Err(InquiryValidationError::NumberNotConfigured);
        }
        Ok(())
    }

    #[must_use]
    pub fn to_request(&self, product_id: &str) -> InquiryRequest {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        InquiryRequest {
            product_id: product_id.to_string(),
            message: self.message.clone(),
            user_name: self.user_name.clone(),
            user_email: non_empty(&self.user_email),
            user_phone: non_empty(&self.user_phone),
        }
    }
}

#[must_use]
pub fn default_message(product_name: &str) -> String {
    format!("I'm interested in {product_name}. Please provide more details.")
}

/// Storefront URL of a product page.
#[must_use]
pub fn product_link(origin: &str, product_id: &str) -> String {
    format!("{}/products/{product_id}", origin.trim_end_matches('/'))
}

/// Formats a timestamp the way the `en-IN` locale does, e.g.
/// `5/1/2024, 9:04:05 am`. Day, month and hour are not padded.
#[must_use]
pub fn format_en_in(at: &NaiveDateTime) -> String {
    at.format("%-d/%-m/%Y, %-I:%M:%S %P").to_string()
}

/// Builds the message body sent to the store's WhatsApp number.
#[must_use]
pub fn compose_message(
    form: &InquiryForm,
    product: &Product,
    origin: &str,
    at: &NaiveDateTime,
) -> String {
    let mut message = String::from("\u{1f6cd}\u{fe0f} *New Product Inquiry*\n\n");
    message.push_str("*Customer Details:*\n");
    message.push_str(&format!("Name: {}\n", form.user_name));
    if !form.user_email.is_empty() {
        message.push_str(&format!("Email: {}\n", form.user_email));
    }
    if !form.user_phone.is_empty() {
        message.push_str(&format!("Phone: {}\n", form.user_phone));
    }
    message.push_str("\n*Product Details:*\n");
    message.push_str(&format!("Product: {}\n", product.name));
    message.push_str(&format!(
        "Price: \u{20b9}{}\n",
        product.effective_price().normalize()
    ));
    message.push_str(&format!(
        "Product Link: {}\n",
        product_link(origin, &product.id)
    ));
    message.push_str(&format!("\n*Customer Message:*\n{}\n", form.message));
    message.push_str(&format!("\n*Date:* {}", format_en_in(at)));
    message
}

/// `https://wa.me/<digits>?text=<encoded message>`. Everything but digits is
/// stripped from `phone`.
#[must_use]
pub fn whatsapp_url(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!(
        "{WHATSAPP_BASE}{digits}?text={}",
        utf8_percent_encode(message, URI_COMPONENT)
    )
}

#[cfg(test)]
#[path = "inquiry_test.rs"]
mod tests;
