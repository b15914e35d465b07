//! Checkout: shipping address entry, delivery charges and order placement.
//!
//! ```text
//! EnteringAddress -> ChargesComputed -> Submitting -> OrderPlaced
//!                                                  \-> SubmitFailed
//! ```
//!
//! Any change to the destination state, city or pincode recomputes charges.
//! A failed charge calculation falls back to fixed charges instead of
//! blocking the customer.

use rust_decimal::Decimal;
use shopfront_core::orders::{ChargeLine, ChargeRequest};
use shopfront_core::{
    CartStorage, CartStore, DeliveryCharges, Order, OrderItem, OrderRequest, ShippingAddress,
};
use thiserror::Error;

use crate::error::ClientError;
use crate::session::Session;
use crate::store::{CatalogStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    EnteringAddress,
    ChargesComputed,
    Submitting,
    OrderPlaced,
    SubmitFailed,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("your cart is empty")]
    EmptyCart,

    #[error("Please fill in all shipping address fields (missing: {})", .0.join(", "))]
    IncompleteAddress(Vec<&'static str>),

    #[error("Please login to place order")]
    LoginRequired,

    #[error("this order has already been placed")]
    AlreadyPlaced,

    #[error("Failed to place order. Please try again.")]
    Order(#[source] StoreError),
}

/// Where the current charges came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeSource {
    /// No state selected yet; charges are zero.
    NotComputed,
    Calculated,
    Fallback,
}

pub struct Checkout<'a> {
    store: &'a mut CatalogStore,
    items: Vec<OrderItem>,
    lines: Vec<ChargeLine>,
    subtotal: Decimal,
    address: ShippingAddress,
    charges: DeliveryCharges,
    source: ChargeSource,
    state: CheckoutState,
}

impl<'a> Checkout<'a> {
    /// Snapshots the cart and starts in [`CheckoutState::EnteringAddress`].
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there is nothing to buy.
    pub fn begin<S: CartStorage>(
        store: &'a mut CatalogStore,
        cart: &CartStore<S>,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(Self {
            store,
            items: cart.order_items(),
            lines: cart.charge_lines(),
            subtotal: cart.total(),
            address: ShippingAddress::default(),
            charges: DeliveryCharges::default(),
            source: ChargeSource::NotComputed,
            state: CheckoutState::EnteringAddress,
        })
    }

    #[must_use]
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    #[must_use]
    pub fn address(&self) -> &ShippingAddress {
        &self.address
    }

    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    #[must_use]
    pub fn charges(&self) -> DeliveryCharges {
        self.charges
    }

    #[must_use]
    pub fn charge_source(&self) -> ChargeSource {
        self.source
    }

    /// Subtotal plus packaging and delivery.
    #[must_use]
    pub fn final_total(&self) -> Decimal {
        self.subtotal + self.charges.total()
    }

    pub fn set_name(&mut self, name: &str) {
        self.address.name = name.to_owned();
    }

    pub fn set_street_address(&mut self, address: &str) {
        self.address.address = address.to_owned();
    }

    pub fn set_phone(&mut self, phone: &str) {
        self.address.phone = phone.to_owned();
    }

    /// Selects the destination state, clearing city and pincode.
    pub async fn set_state(&mut self, state: &str) {
        self.address.state = state.to_owned();
        self.address.city.clear();
        self.address.zip_code.clear();
        self.recompute_charges().await;
    }

    /// Selects the city, clearing the pincode.
    pub async fn set_city(&mut self, city: &str) {
        self.address.city = city.to_owned();
        self.address.zip_code.clear();
        self.recompute_charges().await;
    }

    pub async fn set_zip_code(&mut self, zip_code: &str) {
        self.address.zip_code = zip_code.to_owned();
        self.recompute_charges().await;
    }

    /// Recomputes charges for the current state.
    ///
    /// With no state the charges are zero and the checkout stays in
    /// [`CheckoutState::EnteringAddress`]. Otherwise the remote calculation
    /// is used, or [`DeliveryCharges::fallback`] when it fails.
    pub async fn recompute_charges(&mut self) {
        if self.address.state.trim().is_empty() {
            self.charges = DeliveryCharges::default();
            self.source = ChargeSource::NotComputed;
            self.state = CheckoutState::EnteringAddress;
            return;
        }

        let request = ChargeRequest {
            state: self.address.state.clone(),
            items: self.lines.clone(),
            subtotal: self.subtotal,
        };
        match self.store.client().calculate_charges(&request).await {
            Ok(charges) => {
                self.charges = charges;
                self.source = ChargeSource::Calculated;
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    state = %self.address.state,
                    "delivery charge calculation failed; using fallback charges"
                );
                self.charges = DeliveryCharges::fallback();
                self.source = ChargeSource::Fallback;
            }
        }
        self.state = CheckoutState::ChargesComputed;
    }

    /// The body that [`Checkout::submit`] sends.
    #[must_use]
    pub fn order_request(&self) -> OrderRequest {
        OrderRequest {
            items: self.items.clone(),
            subtotal: self.subtotal,
            packaging_charge: self.charges.packaging_charge,
            delivery_charge: self.charges.delivery_charge,
            total_amount: self.final_total(),
            shipping_address: self.address.clone(),
        }
    }

    /// Places the order and clears the cart on success.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::IncompleteAddress`] if any address field is blank.
    /// - [`CheckoutError::LoginRequired`] without a session.
    /// - [`CheckoutError::AlreadyPlaced`] after a successful submit.
    /// - [`CheckoutError::Order`] if the API rejects the order; the cart is
    ///   left untouched and the checkout moves to
    ///   [`CheckoutState::SubmitFailed`].
    pub async fn submit<S: CartStorage>(
        &mut self,
        session: Option<&Session>,
        cart: &mut CartStore<S>,
    ) -> Result<Order, CheckoutError> {
        if matches!(
            self.state,
            CheckoutState::Submitting | CheckoutState::OrderPlaced
        ) {
            return Err(CheckoutError::AlreadyPlaced);
        }
        let missing = self.address.missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::IncompleteAddress(missing));
        }
        if session.is_none() {
            return Err(CheckoutError::LoginRequired);
        }

        self.state = CheckoutState::Submitting;
        let request = self.order_request();
        match self.store.place_order(&request).await {
            Ok(order) => {
                if let Err(e) = cart.clear() {
                    tracing::warn!(error = %e, order_id = %order.id, "order placed but cart could not be cleared");
                }
                tracing::info!(
                    order_id = %order.id,
                    order_number = %order.order_number,
                    total = %request.total_amount,
                    "order placed"
                );
                self.state = CheckoutState::OrderPlaced;
                Ok(order)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to place order");
                self.state = CheckoutState::SubmitFailed;
                Err(CheckoutError::Order(e))
            }
        }
    }
}

impl CheckoutError {
    /// The underlying API error, when the order was rejected remotely.
    #[must_use]
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            CheckoutError::Order(StoreError::Client(e)) => Some(e),
            _ => None,
        }
    }
}
