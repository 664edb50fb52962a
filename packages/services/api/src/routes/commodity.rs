use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use yt_core::page::{Page, PageParams};

use crate::error::Result;
use crate::guard::AuthContext;
use crate::state::AppState;
use crate::store::commodity::{self, CommodityPatch, CommodityRow, NewCommodity};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/commodity/create/", post(create))
        .route("/commodity/", get(list))
        .route(
            "/commodity/:id/",
            get(get_one).put(replace).patch(update).delete(remove),
        )
}

async fn create(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Json(payload): Json<NewCommodity>,
) -> Result<(StatusCode, Json<CommodityRow>)> {
    auth.authorize("REPORTING_USER")?;
    let row = commodity::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_one(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<CommodityRow>> {
    auth.authorize("REPORTING_USER")?;
    Ok(Json(commodity::get(&state.db, id).await?))
}

async fn list(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<CommodityRow>>> {
    auth.authorize("REPORTING_USER")?;
    Ok(Json(commodity::list(&state.db, &params).await?))
}

async fn replace(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
    Json(payload): Json<NewCommodity>,
) -> Result<(StatusCode, Json<CommodityRow>)> {
    auth.authorize("REPORTING_USER")?;
    let row = commodity::replace(&state.db, id, &payload).await?;
    Ok((StatusCode::ACCEPTED, Json(row)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
    Json(payload): Json<CommodityPatch>,
) -> Result<(StatusCode, Json<CommodityRow>)> {
    auth.authorize("REPORTING_USER")?;
    let row = commodity::update(&state.db, id, payload.into_update_set()).await?;
    Ok((StatusCode::ACCEPTED, Json(row)))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    auth.authorize("REPORTING_USER")?;
    commodity::remove(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
