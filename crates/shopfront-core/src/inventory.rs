//! Stock classification for the admin inventory view.

use crate::products::Product;

/// Stock below this count is reported as low.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    #[must_use]
    pub fn of(stock: u32) -> Self {
        if stock == 0 {
            StockStatus::OutOfStock
        } else if stock < LOW_STOCK_THRESHOLD {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventorySummary {
    pub total: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl InventorySummary {
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        products
            .iter()
            .fold(Self::default(), |mut acc, p| {
                acc.total += 1;
                match StockStatus::of(p.stock) {
                    StockStatus::InStock => acc.in_stock += 1,
                    StockStatus::LowStock => acc.low_stock += 1,
                    StockStatus::OutOfStock => acc.out_of_stock += 1,
                }
                acc
            })
    }
}

/// Stock left after selling `quantity` units, floored at zero.
#[must_use]
pub fn remaining_stock(stock: u32, quantity: u32) -> u32 {
    stock.saturating_sub(quantity)
}
