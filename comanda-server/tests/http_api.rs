//! HTTP 面集成测试
//!
//! 用 tower 的 `oneshot` 驱动完整 Router（不绑端口），覆盖响应信封、
//! 认证中间件、权限分层、库存派生状态和评价查重这几条端到端动线。

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use comanda_server::core::server::build_router;
use comanda_server::{Config, ServerState};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::util::ServiceExt;

async fn test_app() -> (TempDir, Router) {
    let tmp = tempfile::tempdir().expect("create tempdir");
    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config)
        .await
        .expect("initialize state");
    (tmp, build_router(state))
}

/// 发请求并把响应解析成 (状态码, 信封 JSON)
async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("request")
}

fn get_with_token(path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request")
}

fn post_json(path: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn post_json_with_token(path: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn put_json_with_token(path: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// 默认管理员由 ServerState::initialize 播种
async fn staff_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        post_json(
            "/api/admin-auth/login",
            &json!({"username": "admin", "password": "admin123"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "admin login failed: {body}");
    body["data"]["token"].as_str().expect("token").to_string()
}

#[tokio::test]
async fn health_is_public_and_wrapped() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("healthy"));
    assert_eq!(body["data"]["stores"]["restaurant"], json!(true));
    assert!(body["data"]["realtime"]["epoch"].as_str().is_some());
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(&app, get("/api/orders")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));

    let token = staff_token(&app).await;
    let (status, body) = send(&app, get_with_token("/api/orders", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["data"].as_array().is_some());
}

#[tokio::test]
async fn wrong_password_gets_the_unified_message() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/admin-auth/login",
            &json!({"username": "admin", "password": "wrong-password"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid username or password"));

    // 不存在的用户名拿到同一条信息，防枚举
    let (status, body) = send(
        &app,
        post_json(
            "/api/admin-auth/login",
            &json!({"username": "nobody", "password": "whatever"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid username or password"));
}

#[tokio::test]
async fn role_permissions_gate_the_back_office() {
    let (_tmp, app) = test_app().await;
    let admin = staff_token(&app).await;

    // 管理员注册一名厨师
    let (status, body) = send(
        &app,
        post_json_with_token(
            "/api/admin-auth/register",
            &admin,
            &json!({
                "username": "priya",
                "password": "kitchen-pass",
                "displayName": "Priya Sharma",
                "role": "chef",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    // 响应里不带密码哈希
    assert!(body["data"]["passwordHash"].is_null());

    let (status, body) = send(
        &app,
        post_json(
            "/api/admin-auth/login",
            &json!({"username": "priya", "password": "kitchen-pass"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let chef = body["data"]["token"].as_str().expect("token").to_string();
    assert_eq!(body["data"]["user"]["role"], json!("chef"));

    // 厨师可以读订单
    let (status, _) = send(&app, get_with_token("/api/orders", &chef)).await;
    assert_eq!(status, StatusCode::OK);

    // 但订座后台不在厨师的权限集里
    let (status, body) = send(&app, get_with_token("/api/table-reservations", &chef)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], json!(false));

    // 注册接口只对管理员开放
    let (status, _) = send(
        &app,
        post_json_with_token(
            "/api/admin-auth/register",
            &chef,
            &json!({
                "username": "eve",
                "password": "123456",
                "displayName": "Eve",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 重复用户名 409
    let (status, _) = send(
        &app,
        post_json_with_token(
            "/api/admin-auth/register",
            &admin,
            &json!({
                "username": "priya",
                "password": "another-pass",
                "displayName": "Priya Again",
                "role": "waiter",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn public_order_and_track_round_trip() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/orders/public",
            &json!({
                "customerName": "Asha",
                "customerPhone": "9812345678",
                "items": [
                    {"name": "Paneer Tikka", "quantity": 2, "price": 450.0},
                    {"name": "Butter Naan", "quantity": 6, "price": 250.0}
                ],
                "totalAmount": 2400.0,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    assert_eq!(body["message"], json!("Order placed"));
    assert_eq!(body["data"]["status"], json!("pending"));
    assert_eq!(body["data"]["cookingStatus"], json!("not started"));
    assert_eq!(body["data"]["channel"], json!("staff-entered"));
    let code = body["data"]["code"].as_str().expect("code").to_string();
    assert!(code.starts_with("ORD"));

    // 追踪接口公开，按编号查
    let (status, body) = send(&app, get(&format!("/api/orders/track/{code}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["code"].as_str(), Some(code.as_str()));
    assert_eq!(body["data"]["totalAmount"], json!(2400.0));

    let (status, _) = send(&app, get("/api/orders/track/ORD999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn validation_failures_come_back_as_400() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/orders/public",
            &json!({
                "customerName": "Asha",
                "customerPhone": "9812345678",
                "items": [],
                "totalAmount": 0.0,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .contains("at least one item")
    );
}

#[tokio::test]
async fn reservation_conflicts_map_to_409() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/table-reservations",
            &json!({
                "customerName": "Ravi",
                "customerPhone": "9812345678",
                "reservationDate": "2025-06-01",
                "timeSlot": "18:00-19:00",
                "selectedTables": [1, 2],
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    assert_eq!(body["message"], json!("Reservation confirmed"));

    let (status, body) = send(
        &app,
        post_json(
            "/api/table-reservations",
            &json!({
                "customerName": "Meera",
                "customerPhone": "9898989898",
                "reservationDate": "2025-06-01",
                "timeSlot": "18:00-19:00",
                "selectedTables": [2, 3],
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["message"],
        json!("Tables 2 are already reserved for 2025-06-01 at 18:00-19:00")
    );

    // 可用性查询是公开接口
    let (status, body) = send(
        &app,
        get("/api/table-reservations/availability?date=2025-06-01&timeSlot=18:00-19:00"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["reservedTables"], json!([1, 2]));
    assert_eq!(body["data"]["availableTables"], json!([3, 4, 5, 6, 7, 8]));
}

#[tokio::test]
async fn inventory_status_follows_quantity() {
    let (_tmp, app) = test_app().await;
    let token = staff_token(&app).await;

    let (status, body) = send(
        &app,
        post_json_with_token(
            "/api/inventory",
            &token,
            &json!({
                "name": "Basmati Rice",
                "quantity": 1000,
                "unit": "g",
                "minStock": 2000,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    // 半量线本身算低
    assert_eq!(body["data"]["status"], json!("low"));
    let id = body["data"]["id"].as_str().expect("id").to_string();

    // 进货越过半量线
    let (status, body) = send(
        &app,
        put_json_with_token(
            &format!("/api/inventory/{id}"),
            &token,
            &json!({"action": "add", "amount": 1500}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quantity"], json!(2500));
    assert_eq!(body["data"]["status"], json!("available"));

    // 出库击穿到零，负数截断
    let (status, body) = send(
        &app,
        put_json_with_token(
            &format!("/api/inventory/{id}"),
            &token,
            &json!({"action": "reduce", "amount": 9000}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quantity"], json!(0));
    assert_eq!(body["data"]["status"], json!("out of stock"));
}

#[tokio::test]
async fn duplicate_feedback_is_a_conflict() {
    let (_tmp, app) = test_app().await;

    let feedback = json!({
        "orderCode": "QR001",
        "orderType": "qr",
        "serviceRating": 5,
        "foodRating": 4,
        "comment": "Great paneer",
    });

    let (status, body) = send(&app, post_json("/api/feedback", &feedback)).await;
    assert_eq!(status, StatusCode::OK, "first submission failed: {body}");
    assert_eq!(body["message"], json!("Thank you for your feedback"));
    assert_eq!(body["data"]["averageRating"], json!(4.5));

    let (status, body) = send(&app, post_json("/api/feedback", &feedback)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn customer_tokens_do_not_open_the_staff_surface() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/customers/register",
            &json!({
                "name": "Asha Patel",
                "email": "asha@example.com",
                "phone": "9812345678",
                "password": "secret123",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    let token = body["data"]["token"].as_str().expect("token").to_string();
    assert_eq!(body["data"]["user"]["kind"], json!("customer"));

    // 顾客令牌是合法令牌，但员工面一律 403
    let (status, _) = send(&app, get_with_token("/api/admin-auth/me", &token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, get_with_token("/api/orders", &token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 重复邮箱注册被拒
    let (status, _) = send(
        &app,
        post_json(
            "/api/customers/register",
            &json!({
                "name": "Asha Again",
                "email": "asha@example.com",
                "phone": "9812345678",
                "password": "secret123",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn menu_reads_are_public_but_writes_are_staff_only() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(&app, get("/api/menu")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().is_some());

    let dish = json!({
        "name": "Masala Dosa",
        "price": "180",
        "category": "Main Course",
        "description": "Crisp dosa with potato filling",
    });

    // 无令牌写入被挡在认证层
    let (status, _) = send(&app, post_json("/api/menu", &dish)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = staff_token(&app).await;
    let (status, body) = send(&app, post_json_with_token("/api/menu", &token, &dish)).await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    assert_eq!(body["data"]["name"], json!("Masala Dosa"));
    assert_eq!(body["data"]["available"], json!(true));

    // 分类过滤
    let (status, body) = send(&app, get("/api/menu?category=Main%20Course")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().expect("array").len(), 1);

    let (status, body) = send(&app, get("/api/menu?category=Desserts")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().expect("array").is_empty());
}
