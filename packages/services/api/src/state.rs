//! API 앱 상태

use sqlx::SqlitePool;

use yt_core::auth::TokenService;

use crate::config::Config;

/// 앱 상태
///
/// 모든 핸들러에서 공유하는 상태입니다. 설정과 토큰 키는
/// 생성 이후 읽기 전용입니다.
pub struct AppState {
    /// 설정
    pub config: Config,

    /// DB Connection Pool
    pub db: SqlitePool,

    /// 토큰 발급/검증기
    pub tokens: TokenService,
}

impl AppState {
    /// 새 상태 생성
    pub fn new(config: Config, db: SqlitePool) -> anyhow::Result<Self> {
        let tokens = TokenService::new(&config.token_config()?);
        Ok(Self { config, db, tokens })
    }
}
