use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use yt_core::page::{Page, PageParams};
use yt_sql::Patch;

use crate::crypto::hash_password;
use crate::error::Result;
use crate::guard::AuthContext;
use crate::state::AppState;
use crate::store::user::{self, NewUser, UserPatch, UserRow};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/create/", post(create))
        .route("/user/", get(list))
        .route(
            "/user/:id/",
            get(get_one).put(replace).patch(update).delete(remove),
        )
}

async fn create(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, Json<UserRow>)> {
    auth.authorize("REPORTING_USER")?;
    let password_hash = hash_password(&payload.password)?;
    let row = user::create(&state.db, &payload, &password_hash).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_one(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<UserRow>> {
    auth.authorize("REPORTING_USER")?;
    Ok(Json(user::get(&state.db, id).await?))
}

async fn list(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<UserRow>>> {
    auth.authorize("REPORTING_USER")?;
    Ok(Json(user::list(&state.db, &params).await?))
}

async fn replace(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, Json<UserRow>)> {
    auth.authorize("REPORTING_USER")?;
    let password_hash = hash_password(&payload.password)?;
    let row = user::replace(&state.db, id, &payload, &password_hash).await?;
    Ok((StatusCode::ACCEPTED, Json(row)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
    Json(mut payload): Json<UserPatch>,
) -> Result<(StatusCode, Json<UserRow>)> {
    auth.authorize("REPORTING_USER")?;

    // 비밀번호는 SET에 들어가기 전에 해시
    if let Patch::Value(plain) = &payload.password {
        payload.password = Patch::Value(hash_password(plain)?);
    }

    let (user_set, usd_set) = payload.into_update_sets();
    let row = user::update(&state.db, id, user_set, usd_set).await?;
    Ok((StatusCode::ACCEPTED, Json(row)))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    auth.authorize("REPORTING_USER")?;
    user::remove(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
