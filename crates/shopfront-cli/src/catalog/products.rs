use rust_decimal::Decimal;
use shopfront_client::Scope;
use shopfront_core::products::ProductInput;
use shopfront_core::{Product, ProductStatus, StockStatus};

use super::{activity, ProductsCommands};
use crate::context::{api_failure, fmt_money, truncate, App};

/// Fields changed by `products update`.
struct ProductEdit {
    name: Option<String>,
    price: Option<Decimal>,
    discount: Option<Decimal>,
    stock: Option<u32>,
    description: Option<String>,
    images: Vec<String>,
    active: Option<bool>,
}

pub(crate) async fn run_products(app: &App, command: ProductsCommands) -> anyhow::Result<()> {
    match command {
        ProductsCommands::List {
            module,
            category,
            all,
        } => list(app, module.as_deref(), category.as_deref(), all).await,
        ProductsCommands::Show { id } => show(app, &id).await,
        ProductsCommands::Add {
            name,
            price,
            discount,
            stock,
            module,
            category,
            subcategory,
            description,
            images,
            inactive,
        } => {
            let input = ProductInput {
                name,
                description,
                images,
                price,
                discount,
                stock,
                product_module_id: module,
                category_id: category,
                subcategory_id: subcategory,
                status: if inactive {
                    ProductStatus::Inactive
                } else {
                    ProductStatus::Active
                },
            };
            add(app, &input).await
        }
        ProductsCommands::Update {
            id,
            name,
            price,
            discount,
            stock,
            description,
            images,
            active,
            inactive,
        } => {
            let edit = ProductEdit {
                name,
                price,
                discount,
                stock,
                description,
                images,
                active: activity(active, inactive),
            };
            update(app, &id, edit).await
        }
        ProductsCommands::Deduct { id, quantity } => deduct(app, &id, quantity).await,
        ProductsCommands::Delete { id } => delete(app, &id).await,
    }
}

/// Prints the product table shared by `products list` and `browse`.
pub(super) fn print_products(products: &[Product]) {
    println!(
        "{:<26}{:<30}{:>12}{:>7}{:>12}{:>7}  STATUS",
        "ID", "NAME", "PRICE", "OFF", "NOW", "STOCK"
    );
    for p in products {
        let off = p
            .discount
            .filter(|d| !d.is_zero())
            .map_or_else(|| "\u{2014}".to_string(), |d| format!("{}%", d.normalize()));
        println!(
            "{:<26}{:<30}{:>12}{:>7}{:>12}{:>7}  {}",
            p.id,
            truncate(&p.name, 27),
            fmt_money(p.price),
            off,
            fmt_money(p.effective_price()),
            p.stock,
            p.status
        );
    }
}

async fn list(
    app: &App,
    module: Option<&str>,
    category: Option<&str>,
    all: bool,
) -> anyhow::Result<()> {
    let products = if all {
        app.client.list_all_products().await
    } else {
        app.client.list_products(module, category).await
    }
    .map_err(|e| api_failure("list products", e))?;

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }
    print_products(&products);
    Ok(())
}

async fn show(app: &App, id: &str) -> anyhow::Result<()> {
    let product = match app.client.get_product(id).await {
        Ok(p) => p,
        Err(e) if e.is_not_found() => anyhow::bail!("product '{id}' not found"),
        Err(e) => return Err(api_failure("load product", e)),
    };

    println!("Product: {} ({})", product.name, product.id);
    println!("Status: {}", product.status);
    println!("Price: {}", fmt_money(product.price));
    if let Some(discount) = product.discount.filter(|d| !d.is_zero()) {
        println!("Discount: {}%", discount.normalize());
        println!("You pay: {}", fmt_money(product.effective_price()));
    }
    println!(
        "Stock: {} ({})",
        product.stock,
        StockStatus::of(product.stock).label()
    );
    println!("Module: {}", product.product_module_id);
    println!("Category: {}", product.category_id);
    if let Some(sub) = &product.subcategory_id {
        println!("Subcategory: {sub}");
    }
    for image in &product.images {
        println!("Image: {image}");
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
    Ok(())
}

async fn add(app: &App, input: &ProductInput) -> anyhow::Result<()> {
    let mut store = app.store(Scope::Admin);
    let created = store
        .create_product(input)
        .await
        .map_err(|e| api_failure("create product", e))?;
    tracing::info!(product_id = %created.id, "product created");
    println!(
        "created product {} ({}) at {}",
        created.name,
        created.id,
        fmt_money(created.effective_price())
    );
    Ok(())
}

async fn update(app: &App, id: &str, edit: ProductEdit) -> anyhow::Result<()> {
    let mut product = app
        .client
        .get_product(id)
        .await
        .map_err(|e| api_failure("load product", e))?;

    if let Some(name) = edit.name {
        product.name = name;
    }
    if let Some(price) = edit.price {
        product.price = price;
    }
    if let Some(discount) = edit.discount {
        product.discount = Some(discount);
    }
    if let Some(stock) = edit.stock {
        product.stock = stock;
    }
    if let Some(description) = edit.description {
        product.description = description;
    }
    product.images.extend(edit.images);
    if let Some(active) = edit.active {
        product.status = if active {
            ProductStatus::Active
        } else {
            ProductStatus::Inactive
        };
    }

    let mut store = app.store(Scope::Admin);
    let updated = store
        .update_product(&product)
        .await
        .map_err(|e| api_failure("update product", e))?;
    tracing::info!(product_id = %updated.id, "product updated");
    println!("updated product {} ({})", updated.name, updated.id);
    Ok(())
}

async fn deduct(app: &App, id: &str, quantity: u32) -> anyhow::Result<()> {
    let updated = app
        .client
        .adjust_stock(id, quantity)
        .await
        .map_err(|e| api_failure("adjust stock", e))?;
    tracing::info!(product_id = %updated.id, stock = updated.stock, "stock adjusted");
    println!(
        "{} now has {} in stock ({})",
        updated.name,
        updated.stock,
        StockStatus::of(updated.stock).label()
    );
    Ok(())
}

async fn delete(app: &App, id: &str) -> anyhow::Result<()> {
    if !app.confirm(&format!("Delete product {id}?"))? {
        println!("aborted");
        return Ok(());
    }
    let mut store = app.store(Scope::Admin);
    store
        .delete_product(id)
        .await
        .map_err(|e| api_failure("delete product", e))?;
    tracing::info!(product_id = %id, "product deleted");
    println!("deleted product {id}");
    Ok(())
}
