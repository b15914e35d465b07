use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::effective_price;

/// Top-level catalog section, e.g. a product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductModule {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category, or a subcategory when `parent_category_id` is set.
///
/// Nesting is one level deep: a parent never has a parent of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub product_module_id: String,
    #[serde(default)]
    pub parent_category_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    #[must_use]
    pub fn is_subcategory(&self) -> bool {
        self.parent_category_id.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Active => write!(f, "active"),
            ProductStatus::Inactive => write!(f, "inactive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub price: Decimal,
    /// Percentage off `price`, 0–100.
    #[serde(default)]
    pub discount: Option<Decimal>,
    pub stock: u32,
    pub product_module_id: String,
    pub category_id: String,
    #[serde(default)]
    pub subcategory_id: Option<String>,
    #[serde(default)]
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price after the product's discount. See [`effective_price`].
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        effective_price(self.price, self.discount)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }
}

/// Create/update body for a product module. The id travels in the URL.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductModuleInput {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<&ProductModule> for ProductModuleInput {
    fn from(module: &ProductModule) -> Self {
        Self {
            name: module.name.clone(),
            slug: module.slug.clone(),
            icon: module.icon.clone(),
            banner_image: module.banner_image.clone(),
            description: module.description.clone(),
            is_active: module.is_active,
        }
    }
}

/// Create/update body for a category.
///
/// `parent_category_id` is always serialized so that an update with `None`
/// detaches a subcategory from its parent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    pub product_module_id: String,
    pub parent_category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub is_active: bool,
}

impl From<&Category> for CategoryInput {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
            product_module_id: category.product_module_id.clone(),
            parent_category_id: category.parent_category_id.clone(),
            description: category.description.clone(),
            image: category.image.clone(),
            is_active: category.is_active,
        }
    }
}

/// Create/update body for a product.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
    pub stock: u32,
    pub product_module_id: String,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<String>,
    pub status: ProductStatus,
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            images: product.images.clone(),
            price: product.price,
            discount: product.discount,
            stock: product.stock,
            product_module_id: product.product_module_id.clone(),
            category_id: product.category_id.clone(),
            subcategory_id: product.subcategory_id.clone(),
            status: product.status,
        }
    }
}
