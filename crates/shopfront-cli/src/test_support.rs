use std::path::Path;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use shopfront_core::{AppConfig, Environment, Product, ProductStatus};

use crate::context::App;

/// Active product `lamp-1` priced at 999 with five in stock.
pub(crate) fn lamp() -> Product {
    let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    Product {
        id: "lamp-1".to_string(),
        name: "Brass Lamp".to_string(),
        description: String::new(),
        images: Vec::new(),
        price: Decimal::from(999),
        discount: None,
        stock: 5,
        product_module_id: "m1".to_string(),
        category_id: "c1".to_string(),
        subcategory_id: None,
        status: ProductStatus::Active,
        created_at: created,
        updated_at: created,
    }
}

/// Signed-in app against `api_url` that answers yes to every prompt.
pub(crate) fn test_app(api_url: &str, data_dir: &Path) -> App {
    let config = AppConfig {
        api_url: api_url.to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        data_dir: data_dir.to_path_buf(),
        request_timeout_secs: 5,
        user_agent: "shopfront-test/0.1".to_string(),
        storefront_origin: "http://localhost:4200".to_string(),
        api_token: Some("test-token".to_string()),
        user_name: Some("Asha".to_string()),
        user_email: None,
    };
    App::new(config, true).expect("app construction should not fail")
}
