use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use crate::products::{Category, Product, ProductStatus};

/// Active product in module `m1`, category `c1`, created on day `day` of
/// January 2025.
pub(crate) fn product(id: &str, price: Decimal, discount: Option<Decimal>, day: u32) -> Product {
    let created = Utc.with_ymd_and_hms(2025, 1, day, 9, 0, 0).unwrap();
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        description: String::new(),
        images: Vec::new(),
        price,
        discount,
        stock: 20,
        product_module_id: "m1".to_string(),
        category_id: "c1".to_string(),
        subcategory_id: None,
        status: ProductStatus::Active,
        created_at: created,
        updated_at: created,
    }
}

pub(crate) fn category(id: &str, module: &str, parent: Option<&str>) -> Category {
    let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    Category {
        id: id.to_string(),
        name: format!("Category {id}"),
        slug: id.to_string(),
        product_module_id: module.to_string(),
        parent_category_id: parent.map(str::to_string),
        description: None,
        image: None,
        is_active: true,
        created_at: created,
        updated_at: created,
    }
}
