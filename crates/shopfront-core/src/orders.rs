//! Orders, shipping addresses and delivery configuration.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(CoreError::InvalidOrderStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
}

impl ShippingAddress {
    /// Names of the fields that are empty or whitespace, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// One line of a placed order. `price` is the effective unit price at
/// checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub packaging_charge: Decimal,
    pub delivery_charge: Decimal,
    pub total_amount: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub packaging_charge: Decimal,
    pub delivery_charge: Decimal,
    pub total_amount: Decimal,
    pub shipping_address: ShippingAddress,
}

/// Store-wide delivery settings maintained by admins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Per-state delivery charge, keyed by state name.
    #[serde(default)]
    pub state_charges: BTreeMap<String, Decimal>,
    /// Per-product surcharge, keyed by product id.
    #[serde(default)]
    pub product_charges: BTreeMap<String, Decimal>,
    #[serde(default = "default_packaging_charge")]
    pub packaging_charge: Decimal,
    #[serde(default = "default_free_delivery_threshold")]
    pub free_delivery_threshold: Decimal,
    #[serde(default)]
    pub whatsapp_number: String,
}

fn default_packaging_charge() -> Decimal {
    Decimal::from(50)
}

fn default_free_delivery_threshold() -> Decimal {
    Decimal::from(1000)
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            id: None,
            state_charges: BTreeMap::new(),
            product_charges: BTreeMap::new(),
            packaging_charge: default_packaging_charge(),
            free_delivery_threshold: default_free_delivery_threshold(),
            whatsapp_number: String::new(),
        }
    }
}

impl DeliveryConfig {
    /// Sets a state's charge. Non-positive amounts are ignored.
    pub fn set_state_charge(&mut self, state: &str, amount: Decimal) -> bool {
        if state.trim().is_empty() || amount <= Decimal::ZERO {
            return false;
        }
        self.state_charges.insert(state.to_string(), amount);
        true
    }

    pub fn remove_state_charge(&mut self, state: &str) -> Option<Decimal> {
        self.state_charges.remove(state)
    }

    /// Sets a product surcharge. Non-positive amounts are ignored.
    pub fn set_product_charge(&mut self, product_id: &str, amount: Decimal) -> bool {
        if product_id.trim().is_empty() || amount <= Decimal::ZERO {
            return false;
        }
        self.product_charges.insert(product_id.to_string(), amount);
        true
    }

    pub fn remove_product_charge(&mut self, product_id: &str) -> Option<Decimal> {
        self.product_charges.remove(product_id)
    }
}

/// A `{productId, quantity}` pair sent to the delivery calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeLine {
    pub product_id: String,
    pub quantity: u32,
}

/// Body of `POST /delivery-config/calculate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    pub state: String,
    pub items: Vec<ChargeLine>,
    pub subtotal: Decimal,
}

/// Charges computed remotely for a destination state and cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryCharges {
    #[serde(default)]
    pub packaging_charge: Decimal,
    #[serde(default)]
    pub delivery_charge: Decimal,
    #[serde(default)]
    pub is_free_delivery: bool,
}

impl DeliveryCharges {
    /// Charges applied when the remote calculation is unavailable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            packaging_charge: Decimal::from(50),
            delivery_charge: Decimal::from(100),
            is_free_delivery: false,
        }
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.packaging_charge + self.delivery_charge
    }
}
