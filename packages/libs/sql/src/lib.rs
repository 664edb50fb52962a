//! yt-sql: 동적 SQL 생성 라이브러리
//!
//! PATCH 요청의 희소 페이로드를 안전한 UPDATE SET 절로 컴파일합니다.
//! 값은 SQL 텍스트에 절대 삽입하지 않고 전부 플레이스홀더로 바인딩하여
//! SQL Injection을 원천 차단합니다.
//!
//! # 모듈 구조
//!
//! - `patch`: 3상태 optional (`Unset` / `Null` / `Value`)
//! - `update`: SET 절 빌더와 바인딩 값

pub mod patch;
pub mod update;

pub use patch::Patch;
pub use update::{BindValue, UpdateSet};
