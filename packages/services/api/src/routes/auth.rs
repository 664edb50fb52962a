use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};

use yt_core::Error;

use crate::crypto::verify_password;
use crate::error::Result;
use crate::state::AppState;
use crate::store::user;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/login", post(login))
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
    #[serde(default)]
    scope: String,
}

#[derive(Debug, Serialize)]
struct TokenResponse {
    access_token: String,
    token_type: &'static str,
}

/// 폼 로그인
///
/// 잘못된 사용자명/비밀번호는 404로 응답합니다 (기존 API와의 호환).
async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>> {
    let username = form.username.to_lowercase();

    let credentials = user::find_credentials(&state.db, &username)
        .await?
        .ok_or_else(|| Error::NotFound {
            message: "incorrect username or password".to_string(),
        })?;

    if !verify_password(&form.password, &credentials.password) {
        return Err(Error::NotFound {
            message: "incorrect username or password".to_string(),
        }
        .into());
    }

    // 요청된 scope는 토큰에 실리지만 권한 판단에는 쓰이지 않음
    let scopes: Vec<String> = form.scope.split_whitespace().map(str::to_string).collect();
    let token = state
        .tokens
        .issue(&credentials.username, credentials.id, scopes)?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer",
    }))
}
