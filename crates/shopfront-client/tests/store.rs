//! Catalog and wishlist stores: refetch-after-mutation and failure handling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};
use shopfront_client::{CatalogStore, Scope, ShopfrontClient, StoreError, WishlistStore};
use shopfront_core::products::{CategoryInput, ProductModuleInput};
use shopfront_core::CatalogError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> ShopfrontClient {
    ShopfrontClient::with_base_url(&format!("{}/api", server.uri()), 5, "shopfront-test/0.1")
        .expect("client construction should not fail")
}

fn module_json(id: &str, active: bool) -> Value {
    json!({
        "id": id,
        "name": format!("Module {id}"),
        "slug": format!("module-{id}"),
        "isActive": active,
        "createdAt": "2025-01-01T00:00:00Z",
        "updatedAt": "2025-01-01T00:00:00Z"
    })
}

fn category_json(id: &str, module: &str, parent: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": format!("Category {id}"),
        "slug": id,
        "productModuleId": module,
        "parentCategoryId": parent,
        "isActive": true,
        "createdAt": "2025-01-01T00:00:00Z",
        "updatedAt": "2025-01-01T00:00:00Z"
    })
}

fn product_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Product {id}"),
        "price": 100,
        "stock": 10,
        "productModuleId": "m1",
        "categoryId": "c1",
        "createdAt": "2025-01-01T00:00:00Z",
        "updatedAt": "2025-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn admin_scope_reads_all_modules_and_derives_active_ones() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/product-modules/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            module_json("m1", true),
            module_json("m2", false)
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = CatalogStore::new(test_client(&server), Scope::Admin);
    let notified = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notified);
    store.subscribe_modules(move |modules| {
        counter.store(modules.len(), Ordering::SeqCst);
    });

    store.refresh_modules().await.expect("refresh should succeed");

    assert_eq!(store.modules().len(), 2);
    assert_eq!(notified.load(Ordering::SeqCst), 2);
    let active: Vec<String> = store.active_modules().into_iter().map(|m| m.id).collect();
    assert_eq!(active, vec!["m1"]);
}

#[tokio::test]
async fn create_module_refetches_the_collection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/product-modules"))
        .respond_with(ResponseTemplate::new(201).set_body_json(module_json("m3", true)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/product-modules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            module_json("m1", true),
            module_json("m3", true)
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = CatalogStore::new(test_client(&server), Scope::Storefront);
    let input = ProductModuleInput {
        name: "Module m3".to_string(),
        slug: "module-m3".to_string(),
        is_active: true,
        ..ProductModuleInput::default()
    };
    let created = store.create_module(&input).await.expect("create should succeed");

    assert_eq!(created.id, "m3");
    assert_eq!(store.modules().len(), 2);
}

#[tokio::test]
async fn nested_subcategory_is_rejected_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            category_json("decor", "m1", None),
            category_json("lamps", "m1", Some("decor"))
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut store = CatalogStore::new(test_client(&server), Scope::Admin);
    store.refresh_categories().await.expect("refresh should succeed");
    assert_eq!(store.subcategories_of("decor").len(), 1);

    let input = CategoryInput {
        name: "Desk Lamps".to_string(),
        slug: "desk-lamps".to_string(),
        product_module_id: "m1".to_string(),
        parent_category_id: Some("lamps".to_string()),
        ..CategoryInput::default()
    };
    let err = store
        .create_category(&input)
        .await
        .expect_err("two-level nesting must fail");
    assert!(
        matches!(err, StoreError::Catalog(CatalogError::NestedTooDeep(ref id)) if id == "lamps"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn category_with_children_cannot_gain_a_parent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            category_json("decor", "m1", None),
            category_json("lamps", "m1", Some("decor")),
            category_json("living", "m1", None)
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/categories/decor"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut store = CatalogStore::new(test_client(&server), Scope::Admin);
    store.refresh_categories().await.expect("refresh should succeed");

    let mut decor = store
        .categories()
        .iter()
        .find(|c| c.id == "decor")
        .cloned()
        .expect("decor should be cached");
    decor.parent_category_id = Some("living".to_string());

    let err = store
        .update_category(&decor)
        .await
        .expect_err("moving a parent under another category must fail");
    assert!(
        matches!(err, StoreError::Catalog(CatalogError::HasSubcategories(ref id)) if id == "decor"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn failed_mutation_leaves_cache_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product_json("p1")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/products/p1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut store = CatalogStore::new(test_client(&server), Scope::Admin);
    store.refresh_products().await.expect("refresh should succeed");

    let err = store.delete_product("p1").await.expect_err("500 should fail");
    assert!(matches!(err, StoreError::Client(_)));
    assert_eq!(store.products().len(), 1);
}

#[tokio::test]
async fn wishlist_without_session_is_empty_and_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let mut wishlist = WishlistStore::new(test_client(&server));
    assert!(wishlist.load().await.is_empty());
    assert_eq!(wishlist.count(), 0);
}

#[tokio::test]
async fn wishlist_load_failure_yields_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/wishlist"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut wishlist = WishlistStore::new(test_client(&server).with_token("expired"));
    assert!(wishlist.load().await.is_empty());
}

#[tokio::test]
async fn wishlist_toggle_removes_a_present_product() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/wishlist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [product_json("p1"), product_json("p2")]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/wishlist/p1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/wishlist"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "products": [product_json("p2")] })),
        )
        .mount(&server)
        .await;

    let mut wishlist = WishlistStore::new(test_client(&server).with_token("t"));
    wishlist.load().await;
    assert!(wishlist.contains("p1"));
    assert_eq!(wishlist.count(), 2);

    let now_present = wishlist.toggle("p1").await.expect("toggle should succeed");

    assert!(!now_present);
    assert!(!wishlist.contains("p1"));
    assert_eq!(wishlist.count(), 1);
}
