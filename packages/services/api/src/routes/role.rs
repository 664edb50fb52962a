use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use yt_core::page::{Page, PageParams};

use crate::error::Result;
use crate::guard::AuthContext;
use crate::state::AppState;
use crate::store::role::{self, NewRole, RolePatch, RoleRow};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/role/create/", post(create))
        .route("/role/", get(list))
        .route(
            "/role/:id/",
            get(get_one).put(replace).patch(update).delete(remove),
        )
}

async fn create(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Json(payload): Json<NewRole>,
) -> Result<(StatusCode, Json<RoleRow>)> {
    auth.authorize("REPORTING_USER")?;
    let row = role::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_one(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<RoleRow>> {
    auth.authorize("REPORTING_USER")?;
    Ok(Json(role::get(&state.db, id).await?))
}

async fn list(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<RoleRow>>> {
    auth.authorize("REPORTING_USER")?;
    Ok(Json(role::list(&state.db, &params).await?))
}

async fn replace(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
    Json(payload): Json<NewRole>,
) -> Result<(StatusCode, Json<RoleRow>)> {
    auth.authorize("REPORTING_USER")?;
    let row = role::replace(&state.db, id, &payload).await?;
    Ok((StatusCode::ACCEPTED, Json(row)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
    Json(payload): Json<RolePatch>,
) -> Result<(StatusCode, Json<RoleRow>)> {
    auth.authorize("REPORTING_USER")?;
    let row = role::update(&state.db, id, payload.into_update_set()).await?;
    Ok((StatusCode::ACCEPTED, Json(row)))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    auth.authorize("REPORTING_USER")?;
    role::remove(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
