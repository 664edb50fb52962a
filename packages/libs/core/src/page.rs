//! 페이지네이션 타입
//!
//! 리스트 엔드포인트 공통의 페이지 요청/응답 구조입니다.

use serde::{Deserialize, Serialize};

/// 기본 페이지 크기
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// 최대 페이지 크기
pub const MAX_PAGE_SIZE: u32 = 100;

/// 페이지 요청 파라미터 (?page=1&size=50)
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
}

impl PageParams {
    /// 1 기반 페이지 번호
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// 페이지 크기 (상한 적용)
    pub fn size(&self) -> u32 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// SQL LIMIT
    pub fn limit(&self) -> i64 {
        self.size() as i64
    }

    /// SQL OFFSET
    pub fn offset(&self) -> i64 {
        (self.page() as i64 - 1) * self.size() as i64
    }
}

/// 페이지 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, params: &PageParams) -> Self {
        Self {
            items,
            total,
            page: params.page(),
            size: params.size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams {
            page: None,
            size: None,
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.size(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset_and_clamping() {
        let params = PageParams {
            page: Some(3),
            size: Some(20),
        };
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 40);

        let oversized = PageParams {
            page: Some(0),
            size: Some(10_000),
        };
        assert_eq!(oversized.page(), 1);
        assert_eq!(oversized.size(), MAX_PAGE_SIZE);
    }
}
