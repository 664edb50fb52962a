//! YieldTrack API 서비스
//!
//! 엔티티 CRUD와 예측 오차 계산을 Bearer 토큰 인증 뒤에서
//! 제공하는 axum 서비스입니다.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::middleware::from_fn;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod guard;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use state::AppState;

/// 라우터 생성
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = match state
        .config
        .cors_origin
        .as_deref()
        .and_then(|o| o.parse::<HeaderValue>().ok())
    {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    };

    routes::router()
        .layer(from_fn(middleware::request_id))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
