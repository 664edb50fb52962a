//! API 서비스 설정

use std::env;

use yt_core::auth::TokenServiceConfig;

/// API 서비스 설정
///
/// 시작 시 1회 로드되며 이후 변경되지 않습니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버 포트
    pub port: u16,

    /// 데이터베이스 URL
    pub database_url: String,

    /// 토큰 서명 비밀키
    pub secret_key: String,

    /// 토큰 서명 알고리즘 (HS256/HS384/HS512)
    pub token_algorithm: String,

    /// 토큰 수명 (분)
    pub token_ttl_minutes: i64,

    /// CORS 허용 origin (없으면 모두 허용)
    pub cors_origin: Option<String>,
}

impl Config {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: env::var("YT_API_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()?,

            database_url: env::var("YT_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/yieldtrack.db".to_string()),

            secret_key: env::var("YT_SECRET_KEY")
                .map_err(|_| anyhow::anyhow!("YT_SECRET_KEY is required"))?,

            token_algorithm: env::var("YT_JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string()),

            token_ttl_minutes: env::var("YT_TOKEN_TTL_MINUTES")
                .unwrap_or_else(|_| "1440".to_string())
                .parse()
                .unwrap_or(1440),

            cors_origin: env::var("YT_CORS_ORIGIN").ok(),
        })
    }

    /// 토큰 서비스 설정으로 변환
    pub fn token_config(&self) -> anyhow::Result<TokenServiceConfig> {
        Ok(TokenServiceConfig {
            secret: self.secret_key.clone(),
            algorithm: TokenServiceConfig::parse_algorithm(&self.token_algorithm)
                .map_err(|e| anyhow::anyhow!("{e}"))?,
            ttl_minutes: self.token_ttl_minutes,
        })
    }
}
