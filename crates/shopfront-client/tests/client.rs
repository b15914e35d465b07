//! Integration tests for `ShopfrontClient` endpoints using wiremock HTTP mocks.

use rust_decimal_macros::dec;
use serde_json::{json, Value};
use shopfront_client::{ClientError, ShopfrontClient};
use shopfront_core::inquiry::{InquiryFilter, InquiryStatus};
use shopfront_core::OrderStatus;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> ShopfrontClient {
    ShopfrontClient::with_base_url(&format!("{}/api", server.uri()), 5, "shopfront-test/0.1")
        .expect("client construction should not fail")
}

fn product_json(id: &str, stock: u32) -> Value {
    json!({
        "id": id,
        "name": "Brass Lamp",
        "description": "Hand-polished",
        "images": ["https://cdn.example/lamp.jpg"],
        "price": 1200,
        "discount": 10,
        "stock": stock,
        "productModuleId": "m1",
        "categoryId": "c1",
        "status": "active",
        "createdAt": "2025-01-02T10:00:00Z",
        "updatedAt": "2025-01-02T10:00:00Z"
    })
}

fn module_json(id: &str, active: bool) -> Value {
    json!({
        "id": id,
        "name": "Home Decor",
        "slug": "home-decor",
        "isActive": active,
        "createdAt": "2025-01-01T00:00:00Z",
        "updatedAt": "2025-01-01T00:00:00Z"
    })
}

async fn last_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.expect("recording enabled");
    let last = requests.last().expect("at least one request");
    serde_json::from_slice(&last.body).expect("JSON body")
}

#[tokio::test]
async fn list_products_sends_module_and_category_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("moduleId", "m1"))
        .and(query_param("categoryId", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product_json("p1", 4)])))
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server)
        .list_products(Some("m1"), Some("c1"))
        .await
        .expect("should parse products");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, "p1");
    assert_eq!(products[0].effective_price(), dec!(1080));
}

#[tokio::test]
async fn get_module_by_slug_hits_slug_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/product-modules/slug/home-decor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(module_json("m1", true)))
        .mount(&server)
        .await;

    let module = test_client(&server)
        .get_module_by_slug("home-decor")
        .await
        .expect("should parse module");
    assert_eq!(module.id, "m1");
    assert!(module.is_active);
}

#[tokio::test]
async fn not_found_maps_to_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .get_product("missing")
        .await
        .expect_err("404 should fail");
    assert!(err.is_not_found(), "expected NotFound, got: {err:?}");
}

#[tokio::test]
async fn server_error_maps_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server).list_orders().await.expect_err("503 should fail");
    assert!(
        matches!(err, ClientError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_maps_to_deserialize_error_with_context() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .list_categories()
        .await
        .expect_err("HTML body should fail");
    match err {
        ClientError::Deserialize { context, .. } => {
            assert!(context.starts_with("GET "), "context was {context}");
            assert!(context.ends_with("/api/categories"), "context was {context}");
        }
        other => panic!("expected Deserialize, got: {other:?}"),
    }
}

#[tokio::test]
async fn token_is_sent_as_bearer_credential() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/wishlist"))
        .and(header("authorization", "Bearer session-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "products": [product_json("p1", 3)] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server)
        .with_token("session-token")
        .get_wishlist()
        .await
        .expect("should unwrap wishlist envelope");
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn update_module_puts_fields_without_id() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/product-modules/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(module_json("m1", false)))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut module: shopfront_core::ProductModule =
        serde_json::from_value(module_json("m1", true)).unwrap();
    module.is_active = false;
    let updated = client.update_module(&module).await.expect("update should succeed");
    assert!(!updated.is_active);

    let body = last_body(&server).await;
    assert!(body.get("id").is_none(), "id must not be in the body: {body}");
    assert_eq!(body["isActive"], json!(false));
    assert_eq!(body["slug"], json!("home-decor"));
}

#[tokio::test]
async fn adjust_stock_reads_then_writes_floored_stock() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json("p1", 5)))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/products/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json("p1", 0)))
        .expect(1)
        .mount(&server)
        .await;

    let product = test_client(&server)
        .adjust_stock("p1", 7)
        .await
        .expect("stock adjustment should succeed");
    assert_eq!(product.stock, 0);

    let body = last_body(&server).await;
    assert_eq!(body["stock"], json!(0));
}

#[tokio::test]
async fn update_order_status_sends_lowercase_status() {
    let server = MockServer::start().await;

    let order = json!({
        "id": "o1",
        "orderNumber": "ORD-1001",
        "items": [],
        "subtotal": 500,
        "packagingCharge": 50,
        "deliveryCharge": 0,
        "totalAmount": 550,
        "status": "shipped",
        "shippingAddress": {
            "name": "Asha", "address": "1 MG Road", "city": "Pune",
            "state": "Maharashtra", "zipCode": "411001", "phone": "9800000000"
        },
        "createdAt": "2025-01-03T00:00:00Z",
        "updatedAt": "2025-01-04T00:00:00Z"
    });

    Mock::given(method("PUT"))
        .and(path("/api/orders/o1/status"))
        .and(body_json(json!({ "status": "shipped" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&order))
        .expect(1)
        .mount(&server)
        .await;

    let updated = test_client(&server)
        .update_order_status("o1", OrderStatus::Shipped)
        .await
        .expect("status update should succeed");
    assert_eq!(updated.status, OrderStatus::Shipped);
}

#[tokio::test]
async fn wishlist_check_and_add() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/wishlist/check/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isInWishlist": true })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/wishlist"))
        .and(body_json(json!({ "productId": "p2" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "added" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client.is_in_wishlist("p1").await.unwrap());
    client.add_to_wishlist("p2").await.expect("add should succeed");
}

#[tokio::test]
async fn inquiries_list_filters_and_status_patch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/whatsapp-inquiries"))
        .and(query_param("status", "pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "i1",
            "productId": "p1",
            "productName": "Brass Lamp",
            "productLink": "http://localhost:4200/products/p1",
            "productPrice": 1080,
            "userName": "Asha",
            "message": "Is this in stock?",
            "status": "pending"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/whatsapp-inquiries/i1/status"))
        .and(body_json(json!({ "status": "responded" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let filter = InquiryFilter {
        status: Some(InquiryStatus::Pending),
        ..InquiryFilter::default()
    };
    let inquiries = client.list_inquiries(&filter).await.expect("list should succeed");
    assert_eq!(inquiries.len(), 1);
    assert_eq!(inquiries[0].user_name, "Asha");

    client
        .update_inquiry_status("i1", InquiryStatus::Responded)
        .await
        .expect("patch should succeed");
}

#[tokio::test]
async fn inquiry_stats_and_resend_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/whatsapp-inquiries/stats/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "total": 6, "pending": 3, "responded": 2, "closed": 1 }),
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/whatsapp-inquiries/i1/resend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "success": false, "error": "WhatsApp API not configured" }),
        ))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let stats = client.inquiry_stats().await.expect("stats should parse");
    assert_eq!(stats.total, 6);
    assert_eq!(stats.pending, 3);

    let outcome = client.resend_inquiry("i1").await.expect("resend should parse");
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("WhatsApp API not configured"));
}

#[tokio::test]
async fn upload_single_image_and_delete() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload/single"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "http://cdn.example/a.png",
            "publicId": "shop/a",
            "secureUrl": "https://cdn.example/a.png"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/upload"))
        .and(body_json(json!({ "publicId": "shop/a" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.png");
    std::fs::write(&file, b"\x89PNG fake").unwrap();

    let client = test_client(&server);
    let image = client.upload_image(&file).await.expect("upload should succeed");
    assert_eq!(image.public_id, "shop/a");
    assert_eq!(image.best_url(), "https://cdn.example/a.png");

    client.delete_image("shop/a").await.expect("delete should succeed");
}

#[tokio::test]
async fn upload_of_missing_file_fails_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .upload_images(&[std::path::PathBuf::from("/definitely/not/here.png")])
        .await
        .expect_err("missing file should fail");
    assert!(matches!(err, ClientError::Io { .. }), "got: {err:?}");
}
