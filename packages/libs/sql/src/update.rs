//! UPDATE SET 절 빌더
//!
//! 컬럼명은 호출부의 고정 식별자만 허용하고, 값은 전부 `?` 플레이스홀더로
//! 바인딩합니다. 수집된 컬럼이 하나도 없으면 SQL을 만들기 전에
//! `EmptyUpdate`로 거부합니다.

use yt_core::{Error, Result};

use crate::patch::Patch;

/// 플레이스홀더에 바인딩될 값
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::Int(v)
    }
}

impl From<f64> for BindValue {
    fn from(v: f64) -> Self {
        BindValue::Float(v)
    }
}

impl From<bool> for BindValue {
    fn from(v: bool) -> Self {
        BindValue::Bool(v)
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        BindValue::Text(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(v.to_string())
    }
}

/// SET 절 빌더
///
/// 컬럼/값 쌍을 모아 `col1 = ?, col2 = ?` 형태의 절과
/// 바인딩 값 목록을 만듭니다.
#[derive(Debug, Default)]
pub struct UpdateSet {
    columns: Vec<&'static str>,
    binds: Vec<BindValue>,
}

impl UpdateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 무조건 컬럼을 추가
    pub fn set(&mut self, column: &'static str, value: impl Into<BindValue>) -> &mut Self {
        self.columns.push(column);
        self.binds.push(value.into());
        self
    }

    /// Patch 상태에 따라 컬럼을 추가
    ///
    /// - `Unset`: 건너뜀
    /// - `Null`: NULL 바인딩
    /// - `Value(v)`: 값 바인딩
    pub fn set_patch<T>(&mut self, column: &'static str, patch: Patch<T>) -> &mut Self
    where
        T: Into<BindValue>,
    {
        match patch {
            Patch::Unset => self,
            Patch::Null => self.set(column, BindValue::Null),
            Patch::Value(v) => self.set(column, v),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// 수집된 컬럼 수
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// `col1 = ?, col2 = ?` 절과 바인딩 값 목록으로 분해
    ///
    /// 수집된 컬럼이 없으면 `EmptyUpdate`.
    pub fn into_parts(self) -> Result<(String, Vec<BindValue>)> {
        if self.columns.is_empty() {
            return Err(Error::EmptyUpdate);
        }
        let clause = self
            .columns
            .iter()
            .map(|col| format!("{col} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        Ok((clause, self.binds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_placeholders_only() {
        let mut set = UpdateSet::new();
        set.set("commodity_name", "Wheat'); DROP TABLE yt_commodity;--");
        set.set("active", true);

        let (clause, binds) = set.into_parts().unwrap();

        // 값은 절에 절대 나타나지 않음
        assert_eq!(clause, "commodity_name = ?, active = ?");
        assert_eq!(binds.len(), 2);
        assert_eq!(
            binds[0],
            BindValue::Text("Wheat'); DROP TABLE yt_commodity;--".to_string())
        );
        assert_eq!(binds[1], BindValue::Bool(true));
    }

    #[test]
    fn test_patch_states() {
        let mut set = UpdateSet::new();
        set.set_patch("a", Patch::<String>::Unset);
        set.set_patch("b", Patch::<String>::Null);
        set.set_patch("c", Patch::Value(7i64));
        // 명시적 false도 수집되어야 함
        set.set_patch("d", Patch::Value(false));

        let (clause, binds) = set.into_parts().unwrap();
        assert_eq!(clause, "b = ?, c = ?, d = ?");
        assert_eq!(binds, vec![BindValue::Null, BindValue::Int(7), BindValue::Bool(false)]);
    }

    #[test]
    fn test_empty_update_rejected() {
        let mut set = UpdateSet::new();
        set.set_patch("name", Patch::<String>::Unset);
        assert!(set.is_empty());

        match set.into_parts() {
            Err(Error::EmptyUpdate) => {}
            other => panic!("expected EmptyUpdate, got {other:?}"),
        }
    }
}
