//! 인증/인가 핵심 로직
//!
//! - `claims`: Access Token 페이로드 구조
//! - `scopes`: 역할 계층과 스코프 확장
//! - `token`: 토큰 발급/검증 서비스

pub mod claims;
pub mod scopes;
pub mod token;

pub use claims::AccessTokenClaims;
pub use scopes::{expand_scopes, Role};
pub use token::{bearer_token, TokenService, TokenServiceConfig};
