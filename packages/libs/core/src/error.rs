//! 공통 에러 타입
//!
//! YieldTrack 전체에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// YieldTrack 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Auth Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("could not validate credentials")]
    InvalidCredentials,

    #[error("not enough permissions")]
    InsufficientPermissions,

    #[error("inactive user")]
    InactiveUser,

    // ─────────────────────────────────────────────────────────────────────────────
    // CRUD Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("conflict: {message}")]
    Conflict { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("empty update: no fields to set")]
    EmptyUpdate,

    #[error("bad request: {message}")]
    BadRequest { message: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // IO/Serialization Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            Error::InvalidCredentials | Error::InsufficientPermissions => 401,

            // 409 Conflict
            Error::Conflict { .. } => 409,

            // 404 Not Found
            Error::NotFound { .. } => 404,

            // 400 Bad Request
            Error::InactiveUser
            | Error::EmptyUpdate
            | Error::BadRequest { .. }
            | Error::Json(_) => 400,
        }
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidCredentials => "INVALID_CREDENTIALS",
            Error::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Error::InactiveUser => "INACTIVE_USER",
            Error::Conflict { .. } => "CONFLICT",
            Error::NotFound { .. } => "NOT_FOUND",
            Error::EmptyUpdate => "EMPTY_UPDATE",
            Error::BadRequest { .. } => "BAD_REQUEST",
            Error::Json(_) => "JSON_ERROR",
        }
    }

    /// 인증 401 에러인지 (WWW-Authenticate 챌린지 대상)
    pub fn is_auth_challenge(&self) -> bool {
        matches!(
            self,
            Error::InvalidCredentials | Error::InsufficientPermissions
        )
    }
}
