//! Listing filters and category-hierarchy helpers.
//!
//! Everything here is a pure function over lists already fetched from the
//! API; nothing touches the network.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::products::{Category, Product, ProductModule};

/// Upper bound of the storefront price filter when none is given.
pub const DEFAULT_MAX_PRICE: u32 = 100_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
}

impl SortKey {
    /// Parses a listing `sort` parameter. Unknown values mean [`SortKey::Newest`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            _ => SortKey::Newest,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storefront listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFilter {
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub sort: SortKey,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            category_id: None,
            subcategory_id: None,
            min_price: Decimal::ZERO,
            max_price: Decimal::from(DEFAULT_MAX_PRICE),
            sort: SortKey::Newest,
        }
    }
}

impl ListingFilter {
    /// Query parameters that differ from the defaults, in a stable order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let defaults = Self::default();
        let mut pairs = Vec::new();
        if let Some(c) = &self.category_id {
            pairs.push(("category", c.clone()));
        }
        if let Some(s) = &self.subcategory_id {
            pairs.push(("subcategory", s.clone()));
        }
        if self.sort != defaults.sort {
            pairs.push(("sort", self.sort.to_string()));
        }
        if self.min_price > defaults.min_price {
            pairs.push(("minPrice", self.min_price.normalize().to_string()));
        }
        if self.max_price < defaults.max_price {
            pairs.push(("maxPrice", self.max_price.normalize().to_string()));
        }
        pairs
    }
}

/// Filters `products` by category, subcategory and effective-price range,
/// then sorts them.
///
/// A category filter also matches products whose *subcategory* equals the
/// id; a subcategory filter then keeps exact subcategory matches only. The
/// price range is inclusive on both ends. Sorting is stable, so ties keep
/// their input order.
#[must_use]
pub fn filter_and_sort(products: &[Product], filter: &ListingFilter) -> Vec<Product> {
    let mut out: Vec<Product> = products
        .iter()
        .filter(|p| {
            filter.category_id.as_deref().is_none_or(|c| {
                p.category_id == c || p.subcategory_id.as_deref() == Some(c)
            })
        })
        .filter(|p| {
            filter
                .subcategory_id
                .as_deref()
                .is_none_or(|s| p.subcategory_id.as_deref() == Some(s))
        })
        .filter(|p| {
            let price = p.effective_price();
            price >= filter.min_price && price <= filter.max_price
        })
        .cloned()
        .collect();

    match filter.sort {
        SortKey::PriceLow => out.sort_by_key(Product::effective_price),
        SortKey::PriceHigh => out.sort_by_key(|p| std::cmp::Reverse(p.effective_price())),
        SortKey::Newest => out.sort_by_key(|p| std::cmp::Reverse(p.created_at)),
    }
    out
}

/// Products the public storefront may show when no module is selected.
#[must_use]
pub fn active_products(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| p.is_active()).cloned().collect()
}

#[must_use]
pub fn active_modules(modules: &[ProductModule]) -> Vec<ProductModule> {
    modules.iter().filter(|m| m.is_active).cloned().collect()
}

/// Categories without a parent.
#[must_use]
pub fn main_categories(categories: &[Category]) -> Vec<&Category> {
    categories.iter().filter(|c| !c.is_subcategory()).collect()
}

#[must_use]
pub fn subcategories_of<'a>(categories: &'a [Category], category_id: &str) -> Vec<&'a Category> {
    categories
        .iter()
        .filter(|c| c.parent_category_id.as_deref() == Some(category_id))
        .collect()
}

#[must_use]
pub fn categories_for_module<'a>(categories: &'a [Category], module_id: &str) -> Vec<&'a Category> {
    categories
        .iter()
        .filter(|c| c.product_module_id == module_id)
        .collect()
}

/// Main categories of `module_id` that may become a parent, excluding the
/// category currently being edited.
#[must_use]
pub fn parent_candidates<'a>(
    categories: &'a [Category],
    module_id: &str,
    editing_id: Option<&str>,
) -> Vec<&'a Category> {
    categories
        .iter()
        .filter(|c| {
            c.product_module_id == module_id
                && !c.is_subcategory()
                && Some(c.id.as_str()) != editing_id
        })
        .collect()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("parent category {0} does not exist")]
    UnknownParent(String),

    #[error("category {0} is already a subcategory and cannot have children")]
    NestedTooDeep(String),

    #[error("parent category {parent} belongs to module {parent_module}, not {module}")]
    ModuleMismatch {
        parent: String,
        parent_module: String,
        module: String,
    },

    #[error("a category cannot be its own parent")]
    SelfParent,

    #[error("category {0} has subcategories and cannot become one")]
    HasSubcategories(String),
}

/// Checks that `parent_id` may parent a category in `module_id`.
///
/// # Errors
///
/// Returns [`CatalogError`] when the parent is unknown, is itself a
/// subcategory, lives in another module, or is the category itself, and
/// when a category that already has children would gain a parent.
pub fn validate_parent(
    categories: &[Category],
    module_id: &str,
    category_id: Option<&str>,
    parent_id: Option<&str>,
) -> Result<(), CatalogError> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };
    if category_id == Some(parent_id) {
        return Err(CatalogError::SelfParent);
    }
    if let Some(id) = category_id {
        if !subcategories_of(categories, id).is_empty() {
            return Err(CatalogError::HasSubcategories(id.to_string()));
        }
    }
    let parent = categories
        .iter()
        .find(|c| c.id == parent_id)
        .ok_or_else(|| CatalogError::UnknownParent(parent_id.to_string()))?;
    if parent.is_subcategory() {
        return Err(CatalogError::NestedTooDeep(parent_id.to_string()));
    }
    if parent.product_module_id != module_id {
        return Err(CatalogError::ModuleMismatch {
            parent: parent_id.to_string(),
            parent_module: parent.product_module_id.clone(),
            module: module_id.to_string(),
        });
    }
    Ok(())
}

/// Generates a URL slug: lowercase, runs of anything but ASCII letters and
/// digits become a single `-`, no leading or trailing dash.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
