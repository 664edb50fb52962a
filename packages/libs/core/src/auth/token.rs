//! 토큰 발급 및 검증
//!
//! 프로세스 전역 비밀키(시작 시 1회 로드, 이후 읽기 전용)로
//! 대칭 서명 토큰을 발급하고 검증합니다.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::error::{Error, Result};

use super::claims::AccessTokenClaims;

/// 토큰 서비스 설정
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// 서명 비밀키
    pub secret: String,

    /// 서명 알고리즘 (HS256/HS384/HS512)
    pub algorithm: Algorithm,

    /// 토큰 수명 (분)
    pub ttl_minutes: i64,
}

impl TokenServiceConfig {
    /// 알고리즘 이름 파싱 ("HS256" 등)
    pub fn parse_algorithm(name: &str) -> Result<Algorithm> {
        match name {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            other => Err(Error::BadRequest {
                message: format!("unsupported token algorithm: {}", other),
            }),
        }
    }
}

/// 토큰 발급/검증기
///
/// 키 페어는 생성 시 한 번 만들어지며 이후 변경되지 않습니다.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl_minutes: i64,
}

impl TokenService {
    /// 새 서비스 생성
    pub fn new(config: &TokenServiceConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            algorithm: config.algorithm,
            ttl_minutes: config.ttl_minutes,
        }
    }

    /// Access Token 발급
    ///
    /// `exp = now + TTL`로 서명합니다. 부수효과 없음 — 아무것도
    /// 저장하지 않으며, 만료가 유일한 무효화 경로입니다.
    pub fn issue(&self, username: &str, user_id: i64, scopes: Vec<String>) -> Result<String> {
        let claims = AccessTokenClaims::new(username.to_string(), user_id, scopes, self.ttl_minutes);
        self.sign(&claims)
    }

    /// 명시적 claims로 서명 (테스트 및 내부용)
    pub fn sign(&self, claims: &AccessTokenClaims) -> Result<String> {
        jsonwebtoken::encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|_| Error::InvalidCredentials)
    }

    /// Access Token 검증 및 Claims 추출
    ///
    /// 서명/형식 오류, 만료(leeway 0 — 만료 시각 엄격 적용),
    /// subject 누락 모두 `InvalidCredentials`로 처리합니다.
    pub fn decode(&self, token: &str) -> Result<AccessTokenClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;

        let data = jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| Error::InvalidCredentials)?;

        if data.claims.sub.is_empty() {
            return Err(Error::InvalidCredentials);
        }

        Ok(data.claims)
    }
}

/// HTTP `Authorization` 헤더에서 Bearer 토큰 추출
pub fn bearer_token(auth_header: Option<&str>) -> Option<&str> {
    auth_header.and_then(|value| value.strip_prefix("Bearer "))
}
