use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use yt_core::page::{Page, PageParams};

use crate::error::Result;
use crate::guard::AuthContext;
use crate::state::AppState;
use crate::store::user_system_description::{
    self, NewUserSystemDescription, UserSystemDescriptionPatch, UserSystemDescriptionRow,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user_system_description/create/", post(create))
        .route("/user_system_description/", get(list))
        .route(
            "/user_system_description/:user_id/",
            get(get_one).put(replace).patch(update).delete(remove),
        )
}

async fn create(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Json(payload): Json<NewUserSystemDescription>,
) -> Result<(StatusCode, Json<UserSystemDescriptionRow>)> {
    auth.authorize("REPORTING_USER")?;
    let row = user_system_description::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_one(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(user_id): Path<i64>,
) -> Result<Json<UserSystemDescriptionRow>> {
    auth.authorize("REPORTING_USER")?;
    Ok(Json(user_system_description::get(&state.db, user_id).await?))
}

async fn list(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<UserSystemDescriptionRow>>> {
    auth.authorize("REPORTING_USER")?;
    Ok(Json(user_system_description::list(&state.db, &params).await?))
}

async fn replace(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(user_id): Path<i64>,
    Json(payload): Json<NewUserSystemDescription>,
) -> Result<(StatusCode, Json<UserSystemDescriptionRow>)> {
    auth.authorize("REPORTING_USER")?;
    let row = user_system_description::replace(&state.db, user_id, &payload).await?;
    Ok((StatusCode::ACCEPTED, Json(row)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(user_id): Path<i64>,
    Json(payload): Json<UserSystemDescriptionPatch>,
) -> Result<(StatusCode, Json<UserSystemDescriptionRow>)> {
    auth.authorize("REPORTING_USER")?;
    let row =
        user_system_description::update(&state.db, user_id, payload.into_update_set()).await?;
    Ok((StatusCode::ACCEPTED, Json(row)))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(user_id): Path<i64>,
) -> Result<StatusCode> {
    auth.authorize("REPORTING_USER")?;
    user_system_description::remove(&state.db, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
