use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use yt_api::store::role::{self, NewRole};
use yt_api::store::user::{self, NewUser};
use yt_api::{create_router, AppState, Config};

async fn test_state() -> Arc<AppState> {
    // 커넥션 1개로 고정해 in-memory DB를 전 요청이 공유
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    yt_api::db::init_schema(&pool).await.unwrap();

    let config = Config {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        secret_key: "test-secret".to_string(),
        token_algorithm: "HS256".to_string(),
        token_ttl_minutes: 1440,
        cors_origin: None,
    };
    Arc::new(AppState::new(config, pool).unwrap())
}

fn new_user(username: &str, role_id: Option<i64>, disabled: bool) -> NewUser {
    NewUser {
        first_name: "Test".to_string(),
        last_name: None,
        contact: None,
        email: format!("{username}@example.com"),
        username: username.to_string(),
        password: "unused".to_string(),
        company_name: None,
        address: None,
        city: None,
        country: None,
        postal_code: None,
        disabled,
        group_id: None,
        role_id,
        license_id: None,
    }
}

/// 역할 + 사용자 시드 후 해당 사용자의 토큰 반환
async fn seed_user(state: &Arc<AppState>, username: &str, role_name: &str, disabled: bool) -> String {
    let role = role::create(
        &state.db,
        &NewRole {
            role_name: role_name.to_string(),
        },
    )
    .await
    .unwrap();

    let hash = yt_api::crypto::hash_password("pa55word").unwrap();
    let row = user::create(&state.db, &new_user(username, Some(role.id), disabled), &hash)
        .await
        .unwrap();

    state
        .tokens
        .issue(username, row.id, vec!["REPORTING_USER".to_string()])
        .unwrap()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={username}&password={password}&scope=REPORTING_USER"
        )))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_login_wrong_credentials_is_404() {
    let state = test_state().await;
    let app = create_router(state.clone());
    seed_user(&state, "jdoe", "REPORTING_USER", false).await;

    let (status, _) = login(&app, "jdoe", "wrong").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = login(&app, "nobody", "pa55word").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_success_returns_decodable_token() {
    let state = test_state().await;
    let app = create_router(state.clone());
    seed_user(&state, "jdoe", "REPORTING_USER", false).await;

    let (status, body) = login(&app, "jdoe", "pa55word").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");

    let claims = state
        .tokens
        .decode(body["access_token"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.sub, "jdoe");
}

#[tokio::test]
async fn test_missing_token_is_401_with_challenge() {
    let state = test_state().await;
    let app = create_router(state.clone());

    let request = Request::builder()
        .method("GET")
        .uri("/commodity/")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn test_inbound_request_id_is_propagated() {
    let state = test_state().await;
    let app = create_router(state.clone());

    let request = Request::builder()
        .method("GET")
        .uri("/commodity/")
        .header("x-request-id", "trace-abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    // 클라이언트가 보낸 ID가 응답 헤더와 에러 본문에 그대로 전파
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "trace-abc-123"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["requestId"], "trace-abc-123");
}

#[tokio::test]
async fn test_request_id_generated_when_absent() {
    let state = test_state().await;
    let app = create_router(state.clone());

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let id = response.headers().get("x-request-id").unwrap();
    assert!(!id.to_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_commodity_is_conflict() {
    let state = test_state().await;
    let app = create_router(state.clone());
    let token = seed_user(&state, "jdoe", "REPORTING_USER", false).await;

    let payload = json!({"commodity_name": "Wheat"});
    let (status, body) = send(&app, "POST", "/commodity/create/", Some(&token), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["commodity_name"], "Wheat");
    assert_eq!(body["active"], true);

    let (status, body) = send(&app, "POST", "/commodity/create/", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_missing_commodity_is_404() {
    let state = test_state().await;
    let app = create_router(state.clone());
    let token = seed_user(&state, "jdoe", "REPORTING_USER", false).await;

    let (status, body) = send(&app, "GET", "/commodity/999/", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_patch_applies_explicit_false_but_not_absent_keys() {
    let state = test_state().await;
    let app = create_router(state.clone());
    let token = seed_user(&state, "jdoe", "REPORTING_USER", false).await;

    let (_, created) = send(
        &app,
        "POST",
        "/commodity/create/",
        Some(&token),
        Some(json!({"commodity_name": "Corn", "active": true})),
    )
    .await;
    let uri = format!("/commodity/{}/", created["id"]);

    // 명시적 false는 적용
    let (status, body) =
        send(&app, "PATCH", &uri, Some(&token), Some(json!({"active": false}))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["active"], false);

    // 키가 없는 필드는 유지
    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(&token),
        Some(json!({"commodity_name": "Maize"})),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["commodity_name"], "Maize");
    assert_eq!(body["active"], false);
}

#[tokio::test]
async fn test_empty_patch_is_400() {
    let state = test_state().await;
    let app = create_router(state.clone());
    let token = seed_user(&state, "jdoe", "REPORTING_USER", false).await;

    let (_, created) = send(
        &app,
        "POST",
        "/commodity/create/",
        Some(&token),
        Some(json!({"commodity_name": "Barley"})),
    )
    .await;
    let uri = format!("/commodity/{}/", created["id"]);

    let (status, body) = send(&app, "PATCH", &uri, Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "EMPTY_UPDATE");
}

#[tokio::test]
async fn test_delete_then_404() {
    let state = test_state().await;
    let app = create_router(state.clone());
    let token = seed_user(&state, "jdoe", "REPORTING_USER", false).await;

    let (_, created) = send(
        &app,
        "POST",
        "/commodity_group/create/",
        Some(&token),
        Some(json!({"comm_group_name": "Grains"})),
    )
    .await;
    let uri = format!("/commodity_group/{}/", created["id"]);

    let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inactive_user_is_400() {
    let state = test_state().await;
    let app = create_router(state.clone());
    let token = seed_user(&state, "jdoe", "ADMIN", true).await;

    let (status, body) = send(&app, "GET", "/commodity/", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INACTIVE_USER");
}

#[tokio::test]
async fn test_scopes_derive_from_stored_role_not_token() {
    let state = test_state().await;
    let app = create_router(state.clone());

    // 저장된 역할이 ADMIN이면 토큰에 실린 scope와 무관하게 접근 가능
    let role = role::create(&state.db, &NewRole { role_name: "ADMIN".to_string() })
        .await
        .unwrap();
    let hash = yt_api::crypto::hash_password("pa55word").unwrap();
    let row = user::create(&state.db, &new_user("admin", Some(role.id), false), &hash)
        .await
        .unwrap();
    let token = state.tokens.issue("admin", row.id, vec![]).unwrap();

    let (status, _) = send(&app, "GET", "/commodity/", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    // 인식되지 않는 저장 역할은 어떤 스코프도 얻지 못함
    let role = role::create(&state.db, &NewRole { role_name: "VISITOR".to_string() })
        .await
        .unwrap();
    let row = user::create(&state.db, &new_user("visitor", Some(role.id), false), &hash)
        .await
        .unwrap();
    let token = state
        .tokens
        .issue("visitor", row.id, vec!["SUPER_ADMIN".to_string()])
        .unwrap();

    let (status, body) = send(&app, "GET", "/commodity/", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Not enough permissions");
}

#[tokio::test]
async fn test_list_is_paginated() {
    let state = test_state().await;
    let app = create_router(state.clone());
    let token = seed_user(&state, "jdoe", "REPORTING_USER", false).await;

    for i in 0..5 {
        let (status, _) = send(
            &app,
            "POST",
            "/role/create/",
            Some(&token),
            Some(json!({"role_name": format!("ROLE_{i}")})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // seed_user가 만든 역할 포함 총 6건
    let (status, body) = send(&app, "GET", "/role/?page=2&size=4", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 6);
    assert_eq!(body["page"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_user_create_links_system_description() {
    let state = test_state().await;
    let app = create_router(state.clone());
    let token = seed_user(&state, "jdoe", "ADMIN", false).await;

    let (status, created) = send(
        &app,
        "POST",
        "/user/create/",
        Some(&token),
        Some(json!({
            "first_name": "Ada",
            "email": "Ada@Example.com",
            "username": "Ada",
            "password": "pa55word"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    // 사용자명/이메일은 소문자로 저장, 비밀번호는 응답에 없음
    assert_eq!(created["username"], "ada");
    assert_eq!(created["email"], "ada@example.com");
    assert!(created.get("password").is_none());

    let uri = format!("/user_system_description/{}/", created["id"]);
    let (status, usd) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(usd["user_id"], created["id"]);

    // 삭제는 두 행을 함께 제거
    let user_uri = format!("/user/{}/", created["id"]);
    let (status, _) = send(&app, "DELETE", &user_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_patch_can_change_role() {
    let state = test_state().await;
    let app = create_router(state.clone());
    let token = seed_user(&state, "jdoe", "ADMIN", false).await;

    let reporting = role::create(
        &state.db,
        &NewRole { role_name: "REPORTING_USER".to_string() },
    )
    .await
    .unwrap();

    let hash = yt_api::crypto::hash_password("pa55word").unwrap();
    let row = user::create(&state.db, &new_user("ada", Some(reporting.id), false), &hash)
        .await
        .unwrap();

    let admin_role_id: i64 = sqlx::query_scalar("SELECT id FROM yt_role WHERE role_name = 'ADMIN'")
        .fetch_one(&state.db)
        .await
        .unwrap();

    let uri = format!("/user/{}/", row.id);
    let (status, _) = send(
        &app,
        "PATCH",
        &uri,
        Some(&token),
        Some(json!({"role_id": admin_role_id, "city": "Busan"})),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let identity = user::find_identity(&state.db, row.id).await.unwrap().unwrap();
    assert_eq!(identity.role_name, "ADMIN");
}

#[tokio::test]
async fn test_error_calculator_computes_and_records_metrics() {
    let state = test_state().await;
    let app = create_router(state.clone());
    let token = seed_user(&state, "jdoe", "REPORTING_USER", false).await;

    sqlx::query("INSERT INTO yt_model (model_name) VALUES ('prophet-v2')")
        .execute(&state.db)
        .await
        .unwrap();
    sqlx::query("INSERT INTO yt_assign_model (model_id) VALUES (1)")
        .execute(&state.db)
        .await
        .unwrap();
    for (forecast, actual) in [(110.0, 100.0), (190.0, 200.0)] {
        sqlx::query(
            "INSERT INTO yt_model_forecast (assign_model_id, forecast_value, actual_value)
             VALUES (1, ?, ?)",
        )
        .bind(forecast)
        .bind(actual)
        .execute(&state.db)
        .await
        .unwrap();
    }

    let (status, body) = send(&app, "GET", "/error_calculator/get/errors/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let entry = &body.as_array().unwrap()[0];
    assert!((entry["MAPE"].as_f64().unwrap() - 7.5).abs() < 1e-9);
    assert!((entry["MSE"].as_f64().unwrap() - 100.0).abs() < 1e-9);
    assert!((entry["RMSE"].as_f64().unwrap() - 10.0).abs() < 1e-9);
    assert!((entry["MAE"].as_f64().unwrap() - 10.0).abs() < 1e-9);
    assert!((entry["WAPE"].as_f64().unwrap() - 20.0 / 300.0).abs() < 1e-9);
    assert_eq!(entry["model"], "prophet-v2");

    // 지표는 타입별로 1건씩 기록
    let recorded: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM yt_model_metric WHERE assign_model_id = 1")
            .fetch_one(&state.db)
            .await
            .unwrap();
    assert_eq!(recorded, 5);
}

#[tokio::test]
async fn test_error_calculator_without_forecasts_is_400() {
    let state = test_state().await;
    let app = create_router(state.clone());
    let token = seed_user(&state, "jdoe", "REPORTING_USER", false).await;

    let (status, body) = send(&app, "GET", "/error_calculator/get/errors/42", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}
