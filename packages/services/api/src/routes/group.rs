use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use yt_core::page::{Page, PageParams};

use crate::error::Result;
use crate::guard::AuthContext;
use crate::state::AppState;
use crate::store::group::{self, GroupPatch, GroupRow, NewGroup};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/group/create/", post(create))
        .route("/group/", get(list))
        .route(
            "/group/:id/",
            get(get_one).put(replace).patch(update).delete(remove),
        )
}

async fn create(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Json(payload): Json<NewGroup>,
) -> Result<(StatusCode, Json<GroupRow>)> {
    auth.authorize("REPORTING_USER")?;
    let row = group::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_one(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<GroupRow>> {
    auth.authorize("REPORTING_USER")?;
    Ok(Json(group::get(&state.db, id).await?))
}

async fn list(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<GroupRow>>> {
    auth.authorize("REPORTING_USER")?;
    Ok(Json(group::list(&state.db, &params).await?))
}

async fn replace(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
    Json(payload): Json<NewGroup>,
) -> Result<(StatusCode, Json<GroupRow>)> {
    auth.authorize("REPORTING_USER")?;
    let row = group::replace(&state.db, id, &payload).await?;
    Ok((StatusCode::ACCEPTED, Json(row)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
    Json(payload): Json<GroupPatch>,
) -> Result<(StatusCode, Json<GroupRow>)> {
    auth.authorize("REPORTING_USER")?;
    let row = group::update(&state.db, id, payload.into_update_set()).await?;
    Ok((StatusCode::ACCEPTED, Json(row)))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    auth.authorize("REPORTING_USER")?;
    group::remove(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
