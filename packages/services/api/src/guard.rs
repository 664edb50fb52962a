//! 접근 가드
//!
//! Bearer 토큰을 검증한 뒤 저장된 역할을 재조회하여 권한을
//! 재도출하는 extractor입니다. 토큰에 실려 온 scope 목록은
//! 참고용일 뿐 권한 판단에 쓰이지 않습니다.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;

use yt_core::auth::{bearer_token, expand_scopes};
use yt_core::Error;

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::user::{self, IdentityRow};

/// 요청별 인증 컨텍스트
///
/// 검증 단계: 토큰 해독 → 신원 재조회 → 스코프 재도출.
/// 어느 단계든 실패하면 요청 전체가 거부됩니다.
pub struct AuthContext {
    pub identity: IdentityRow,
    pub scopes: Vec<String>,
}

impl AuthContext {
    /// 요구 스코프 검사 후 활성 사용자 게이트 적용
    pub fn authorize(&self, required: &str) -> Result<&IdentityRow, ApiError> {
        if !self.scopes.iter().any(|s| s == required) {
            return Err(Error::InsufficientPermissions.into());
        }
        if self.identity.disabled {
            return Err(Error::InactiveUser.into());
        }
        Ok(&self.identity)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = Arc::<AppState>::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        let token = bearer_token(auth_header).ok_or(Error::InvalidCredentials)?;

        let claims = state.tokens.decode(token)?;

        // 토큰의 scope가 아니라 저장된 역할이 권한의 근거
        let identity = user::find_identity(&state.db, claims.id)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        let scopes = expand_scopes(&[identity.role_name.to_uppercase()]);

        Ok(AuthContext { identity, scopes })
    }
}
