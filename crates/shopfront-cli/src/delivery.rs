//! Delivery configuration command handlers.
//!
//! Every edit reads the current configuration, changes one setting and
//! writes the whole document back.

use clap::Subcommand;
use rust_decimal::Decimal;
use shopfront_client::{Checkout, CheckoutError, Scope};
use shopfront_core::DeliveryConfig;

use crate::context::{api_failure, fmt_money, App};
use crate::shop::print_totals;

/// Sub-commands available under `delivery`.
#[derive(Debug, Subcommand)]
pub enum DeliveryCommands {
    /// Show the current delivery configuration
    Show,
    /// Quote packaging and delivery charges for the cart
    Quote {
        #[arg(long)]
        state: String,
    },
    /// Set the delivery charge for a state
    SetState { state: String, amount: Decimal },
    /// Remove a state's delivery charge
    RemoveState { state: String },
    /// Set an extra charge for a product (id)
    SetProduct { product: String, amount: Decimal },
    /// Remove a product's extra charge
    RemoveProduct { product: String },
    /// Set the packaging charge added to every order
    Packaging { amount: Decimal },
    /// Set the subtotal above which delivery is free
    Threshold { amount: Decimal },
    /// Set the store's WhatsApp number for inquiries
    Whatsapp { number: String },
}

pub(crate) async fn run_delivery(app: &App, command: DeliveryCommands) -> anyhow::Result<()> {
    match command {
        DeliveryCommands::Show => {
            let config = load(app).await?;
            print_config(&config);
            Ok(())
        }
        DeliveryCommands::Quote { state } => quote(app, &state).await,
        DeliveryCommands::SetState { state, amount } => {
            edit(app, |c| {
                if c.set_state_charge(&state, amount) {
                    Ok(format!("{state} delivery set to {}", fmt_money(amount)))
                } else {
                    Err(format!("charge for {state} must be greater than zero"))
                }
            })
            .await
        }
        DeliveryCommands::RemoveState { state } => {
            edit(app, |c| match c.remove_state_charge(&state) {
                Some(_) => Ok(format!("removed delivery charge for {state}")),
                None => Err(format!("{state} has no delivery charge")),
            })
            .await
        }
        DeliveryCommands::SetProduct { product, amount } => {
            edit(app, |c| {
                if c.set_product_charge(&product, amount) {
                    Ok(format!("{product} surcharge set to {}", fmt_money(amount)))
                } else {
                    Err(format!("charge for {product} must be greater than zero"))
                }
            })
            .await
        }
        DeliveryCommands::RemoveProduct { product } => {
            edit(app, |c| match c.remove_product_charge(&product) {
                Some(_) => Ok(format!("removed surcharge for {product}")),
                None => Err(format!("{product} has no surcharge")),
            })
            .await
        }
        DeliveryCommands::Packaging { amount } => {
            edit(app, |c| {
                if amount < Decimal::ZERO {
                    return Err("packaging charge cannot be negative".to_string());
                }
                c.packaging_charge = amount;
                Ok(format!("packaging charge set to {}", fmt_money(amount)))
            })
            .await
        }
        DeliveryCommands::Threshold { amount } => {
            edit(app, |c| {
                if amount < Decimal::ZERO {
                    return Err("free delivery threshold cannot be negative".to_string());
                }
                c.free_delivery_threshold = amount;
                Ok(format!("free delivery above {}", fmt_money(amount)))
            })
            .await
        }
        DeliveryCommands::Whatsapp { number } => {
            edit(app, |c| {
                if !number.chars().any(|ch| ch.is_ascii_digit()) {
                    return Err(format!("{number} is not a phone number"));
                }
                c.whatsapp_number.clone_from(&number);
                Ok(format!("WhatsApp number set to {number}"))
            })
            .await
        }
    }
}

async fn load(app: &App) -> anyhow::Result<DeliveryConfig> {
    app.client
        .get_delivery_config()
        .await
        .map_err(|e| api_failure("load delivery config", e))
}

/// Applies `change` to the current configuration and saves it. A change
/// that returns `Err` is reported as a warning and nothing is written.
async fn edit<F>(app: &App, change: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut DeliveryConfig) -> Result<String, String>,
{
    let mut config = load(app).await?;
    let summary = match change(&mut config) {
        Ok(s) => s,
        Err(warning) => {
            eprintln!("warning: {warning}");
            return Ok(());
        }
    };
    app.client
        .update_delivery_config(&config)
        .await
        .map_err(|e| api_failure("save delivery config", e))?;
    tracing::info!(change = %summary, "delivery config updated");
    println!("{summary}");
    Ok(())
}

fn print_config(config: &DeliveryConfig) {
    println!("Packaging charge: {}", fmt_money(config.packaging_charge));
    println!(
        "Free delivery above: {}",
        fmt_money(config.free_delivery_threshold)
    );
    if config.whatsapp_number.is_empty() {
        println!("WhatsApp number: (not set)");
    } else {
        println!("WhatsApp number: {}", config.whatsapp_number);
    }

    println!();
    println!("{:<24}{:>12}", "STATE", "DELIVERY");
    if config.state_charges.is_empty() {
        println!("(none)");
    }
    for (state, amount) in &config.state_charges {
        println!("{state:<24}{:>12}", fmt_money(*amount));
    }

    println!();
    println!("{:<26}{:>12}", "PRODUCT", "SURCHARGE");
    if config.product_charges.is_empty() {
        println!("(none)");
    }
    for (product, amount) in &config.product_charges {
        println!("{product:<26}{:>12}", fmt_money(*amount));
    }
}

async fn quote(app: &App, state: &str) -> anyhow::Result<()> {
    let cart = app.cart();
    let mut store = app.store(Scope::Storefront);
    let mut checkout = match Checkout::begin(&mut store, &cart) {
        Ok(c) => c,
        Err(CheckoutError::EmptyCart) => {
            println!("your cart is empty; nothing to quote");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    checkout.set_state(state).await;

    print_totals(&checkout);
    Ok(())
}
