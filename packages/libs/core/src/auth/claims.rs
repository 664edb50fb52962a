//! 토큰 Claims
//!
//! Access Token의 페이로드 구조입니다.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Access Token Claims (JWT 페이로드)
///
/// 로그인 시 발급되고, 이후 모든 요청에서 검증됩니다.
/// `scopes`는 로그인 시점에 요청된 값일 뿐이며, 인가에는 사용되지
/// 않습니다 — 실제 스코프는 요청마다 저장된 역할에서 다시 파생됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (username)
    pub sub: String,

    /// 사용자 ID
    pub id: i64,

    /// 로그인 시 요청된 스코프 목록 (참고용)
    pub scopes: Vec<String>,

    /// 발급 시각 (unix seconds)
    pub iat: i64,

    /// 만료 시각 (unix seconds)
    pub exp: i64,
}

impl AccessTokenClaims {
    /// 새 claims 생성
    pub fn new(sub: String, id: i64, scopes: Vec<String>, ttl_minutes: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub,
            id,
            scopes,
            iat: now,
            exp: now + ttl_minutes * 60,
        }
    }

    /// 만료 여부 확인
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// 남은 TTL (초)
    pub fn remaining_ttl(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_expiry() {
        let claims = AccessTokenClaims::new(
            "jdoe".to_string(),
            7,
            vec!["REPORTING_USER".to_string()],
            1440,
        );

        assert!(!claims.is_expired());
        assert!(claims.remaining_ttl() > 1439 * 60);
        assert_eq!(claims.exp - claims.iat, 1440 * 60);
    }
}
