//! Order tracking command handlers.

use clap::Subcommand;
use shopfront_client::Scope;
use shopfront_core::{Order, OrderStatus};

use crate::context::{api_failure, fmt_money, App};

/// Sub-commands available under `orders`.
#[derive(Debug, Subcommand)]
pub enum OrdersCommands {
    /// List orders, newest first
    List {
        /// Only orders in this status (pending, shipped, delivered, cancelled)
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    /// Show an order with its items and shipping address
    Show { id: String },
    /// Move an order to a new status (admin)
    Status { id: String, status: OrderStatus },
}

pub(crate) async fn run_orders(app: &App, command: OrdersCommands) -> anyhow::Result<()> {
    match command {
        OrdersCommands::List { status } => list(app, status).await,
        OrdersCommands::Show { id } => show(app, &id).await,
        OrdersCommands::Status { id, status } => set_status(app, &id, status).await,
    }
}

async fn list(app: &App, status: Option<OrderStatus>) -> anyhow::Result<()> {
    let mut store = app.store(Scope::Admin);
    let orders = store
        .refresh_orders()
        .await
        .map_err(|e| api_failure("list orders", e))?;

    let mut shown: Vec<&Order> = orders
        .iter()
        .filter(|o| status.is_none_or(|s| o.status == s))
        .collect();
    shown.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    if shown.is_empty() {
        println!("no orders found");
        return Ok(());
    }

    println!(
        "{:<26}{:<16}{:<12}{:<12}{:>6}{:>12}",
        "ID", "NUMBER", "DATE", "STATUS", "ITEMS", "TOTAL"
    );
    for order in shown {
        let items: u32 = order.items.iter().map(|i| i.quantity).sum();
        println!(
            "{:<26}{:<16}{:<12}{:<12}{:>6}{:>12}",
            order.id,
            order.order_number,
            order.created_at.format("%Y-%m-%d").to_string(),
            order.status.to_string(),
            items,
            fmt_money(order.total_amount)
        );
    }
    Ok(())
}

async fn show(app: &App, id: &str) -> anyhow::Result<()> {
    let order = match app.client.get_order(id).await {
        Ok(o) => o,
        Err(e) if e.is_not_found() => anyhow::bail!("order '{id}' not found"),
        Err(e) => return Err(api_failure("load order", e)),
    };

    println!("Order: {} ({})", order.order_number, order.id);
    println!("Placed: {}", order.created_at.format("%Y-%m-%d %H:%M"));
    println!("Status: {}", order.status);
    println!();
    println!("{:<30}{:>5}{:>12}", "PRODUCT", "QTY", "PRICE");
    for item in &order.items {
        println!(
            "{:<30}{:>5}{:>12}",
            crate::context::truncate(&item.product_name, 27),
            item.quantity,
            fmt_money(item.price)
        );
    }
    println!();
    println!("Subtotal:  {}", fmt_money(order.subtotal));
    println!("Packaging: {}", fmt_money(order.packaging_charge));
    println!("Delivery:  {}", fmt_money(order.delivery_charge));
    println!("Total:     {}", fmt_money(order.total_amount));
    println!();
    let a = &order.shipping_address;
    println!("Ship to: {}, {}", a.name, a.phone);
    println!("         {}", a.address);
    println!("         {}, {} {}", a.city, a.state, a.zip_code);
    Ok(())
}

async fn set_status(app: &App, id: &str, status: OrderStatus) -> anyhow::Result<()> {
    let mut store = app.store(Scope::Admin);
    let order = store
        .update_order_status(id, status)
        .await
        .map_err(|e| api_failure("update order status", e))?;
    tracing::info!(order_id = %order.id, status = %order.status, "order status updated");
    println!("order {} is now {}", order.order_number, order.status);
    Ok(())
}
