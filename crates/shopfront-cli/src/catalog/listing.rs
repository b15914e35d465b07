use rust_decimal::Decimal;
use shopfront_client::Scope;
use shopfront_core::catalog::active_products;
use shopfront_core::{filter_and_sort, InventorySummary, ListingFilter, SortKey, StockStatus};

use super::products::print_products;
use crate::context::{api_failure, truncate, App};

/// Builds a listing filter from command-line options, keeping the defaults
/// for anything not given.
pub(crate) fn listing_filter(
    category: Option<String>,
    subcategory: Option<String>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
    sort: &str,
) -> ListingFilter {
    let defaults = ListingFilter::default();
    ListingFilter {
        category_id: category,
        subcategory_id: subcategory,
        min_price: min_price.unwrap_or(defaults.min_price),
        max_price: max_price.unwrap_or(defaults.max_price),
        sort: SortKey::parse(sort),
    }
}

/// Storefront listing. Without a module only active products are shown.
pub(crate) async fn run_browse(
    app: &App,
    module: Option<&str>,
    filter: &ListingFilter,
) -> anyhow::Result<()> {
    let products = match module {
        Some(m) => app.client.list_products(Some(m), None).await,
        None => app.client.list_products(None, None).await.map(|p| active_products(&p)),
    }
    .map_err(|e| api_failure("list products", e))?;

    let listed = filter_and_sort(&products, filter);
    if listed.is_empty() {
        println!("no products match");
        return Ok(());
    }
    print_products(&listed);

    let query = filter
        .query_pairs()
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let base = match module {
        Some(m) => format!("{}/modules/{m}", app.config.storefront_origin),
        None => format!("{}/products", app.config.storefront_origin),
    };
    println!();
    if query.is_empty() {
        println!("{} products  {base}", listed.len());
    } else {
        println!("{} products  {base}?{query}", listed.len());
    }
    Ok(())
}

pub(crate) async fn run_inventory(app: &App, low_only: bool) -> anyhow::Result<()> {
    let mut store = app.store(Scope::Admin);
    let products = store
        .refresh_products()
        .await
        .map_err(|e| api_failure("list products", e))?;

    let summary = InventorySummary::from_products(products);
    println!(
        "{} products: {} in stock, {} low, {} out of stock",
        summary.total, summary.in_stock, summary.low_stock, summary.out_of_stock
    );
    println!();

    println!("{:<26}{:<30}{:>7}  STATUS", "ID", "NAME", "STOCK");
    for p in products {
        let status = StockStatus::of(p.stock);
        if low_only && status == StockStatus::InStock {
            continue;
        }
        println!(
            "{:<26}{:<30}{:>7}  {}",
            p.id,
            truncate(&p.name, 27),
            p.stock,
            status.label()
        );
    }
    Ok(())
}
