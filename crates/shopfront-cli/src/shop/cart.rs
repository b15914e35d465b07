use shopfront_core::{CartStorage, CartStore};

use super::CartCommands;
use crate::context::{api_failure, confirm, fmt_money, truncate, App};

/// Runs any cart command. Only `add` talks to the API; the rest go through
/// [`run_local_cart`].
pub(crate) async fn run_cart(app: &App, command: CartCommands) -> anyhow::Result<()> {
    let mut cart = app.cart();
    match command {
        CartCommands::Add { product, qty } => {
            if qty == 0 {
                eprintln!("warning: quantity must be at least 1");
                return Ok(());
            }
            let product = match app.client.get_product(&product).await {
                Ok(p) => p,
                Err(e) if e.is_not_found() => anyhow::bail!("product '{product}' not found"),
                Err(e) => return Err(api_failure("load product", e)),
            };
            if !product.is_active() {
                eprintln!("warning: {} is not currently available", product.name);
                return Ok(());
            }
            if requested_quantity(&cart, &product.id, qty) > product.stock {
                eprintln!(
                    "warning: only {} of {} in stock",
                    product.stock, product.name
                );
            }
            let name = product.name.clone();
            cart.add(product, qty)?;
            println!("added {qty} x {name}");
            print_cart(&cart);
            Ok(())
        }
        other => run_local_cart(&mut cart, other, app.assume_yes()),
    }
}

/// Quantity the cart would hold for `product_id` after adding `qty`.
fn requested_quantity<S: CartStorage>(cart: &CartStore<S>, product_id: &str, qty: u32) -> u32 {
    cart.get(product_id)
        .map_or(0, |i| i.quantity)
        .saturating_add(qty)
}

/// Cart commands that only read or rewrite the stored cart.
pub(crate) fn run_local_cart<S: CartStorage>(
    cart: &mut CartStore<S>,
    command: CartCommands,
    assume_yes: bool,
) -> anyhow::Result<()> {
    match command {
        CartCommands::Show => {}
        CartCommands::Add { .. } => anyhow::bail!("adding to the cart needs the API"),
        CartCommands::Update { product, quantity } => {
            if cart.get(&product).is_none() {
                eprintln!("warning: {product} is not in the cart");
                return Ok(());
            }
            cart.update_quantity(&product, quantity)?;
        }
        CartCommands::Remove { product } => {
            cart.remove(&product)?;
        }
        CartCommands::Clear => {
            if !cart.is_empty() && !confirm(assume_yes, "Empty the cart?")? {
                println!("aborted");
                return Ok(());
            }
            cart.clear()?;
        }
    }
    print_cart(cart);
    Ok(())
}

fn print_cart<S: CartStorage>(cart: &CartStore<S>) {
    if cart.is_empty() {
        println!("your cart is empty");
        return;
    }

    println!(
        "{:<26}{:<30}{:>5}{:>12}{:>12}",
        "ID", "PRODUCT", "QTY", "EACH", "TOTAL"
    );
    for item in cart.items() {
        println!(
            "{:<26}{:<30}{:>5}{:>12}{:>12}",
            item.product.id,
            truncate(&item.product.name, 27),
            item.quantity,
            fmt_money(item.product.effective_price()),
            fmt_money(item.line_total())
        );
    }
    println!();
    println!("{} items, total {}", cart.item_count(), fmt_money(cart.total()));
}
