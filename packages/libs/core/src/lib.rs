//! yt-core: YieldTrack 공통 핵심 라이브러리
//!
//! 이 크레이트는 API 서비스와 도구들이 공유하는 핵심 타입과 로직을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `auth`: 인증 토큰 발급/검증 및 역할 기반 스코프 확장
//! - `metrics`: 예측 오차 지표 계산 (MAPE, MSE, RMSE, MAE, WAPE)
//! - `page`: 페이지네이션 타입
//! - `error`: 공통 에러 타입

pub mod auth;
pub mod error;
pub mod metrics;
pub mod page;

pub use error::{Error, Result};
