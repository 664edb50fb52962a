//! HTTP 라우트

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod commodity;
pub mod commodity_group;
pub mod error_calculator;
pub mod group;
pub mod license;
pub mod role;
pub mod user;
pub mod user_system_description;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .merge(auth::router())
        .merge(commodity::router())
        .merge(commodity_group::router())
        .merge(group::router())
        .merge(license::router())
        .merge(role::router())
        .merge(user::router())
        .merge(user_system_description::router())
        .merge(error_calculator::router())
}

async fn health() -> &'static str {
    "ok"
}
