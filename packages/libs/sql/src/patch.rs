//! 3상태 optional
//!
//! PATCH 페이로드의 필드는 세 가지 상태를 가집니다:
//!
//! - `Unset`: 키 자체가 페이로드에 없음 → 변경하지 않음
//! - `Null`: 명시적 `null` → NULL로 설정
//! - `Value(T)`: 명시적 값 → 해당 값으로 설정
//!
//! `false`나 `0` 같은 falsy 값을 "없음"으로 오인하는 센티널 방식
//! 대신, 키의 존재 여부만이 "변경하지 않음"을 의미합니다.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 3상태 optional 필드
///
/// `#[serde(default)]`와 함께 쓰면 키 부재가 `Unset`이 됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// 키가 페이로드에 없음
    #[default]
    Unset,
    /// 명시적 null
    Null,
    /// 명시적 값
    Value(T),
}

impl<T> Patch<T> {
    /// 변경하지 않는 상태인지
    pub fn is_unset(&self) -> bool {
        matches!(self, Patch::Unset)
    }

    /// 값 참조 (Value일 때만)
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// 값 변환 (Value일 때만 적용)
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Unset => Patch::Unset,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(f(v)),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        }
    }
}

// 키가 존재하면 Null 또는 Value로만 역직렬화됩니다.
// Unset은 serde(default)를 통해서만 생깁니다.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Unset | Patch::Null => serializer.serialize_none(),
            Patch::Value(v) => serializer.serialize_some(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default)]
        active: Patch<bool>,
        #[serde(default)]
        name: Patch<String>,
    }

    #[test]
    fn test_absent_key_is_unset() {
        let payload: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.active, Patch::Unset);
        assert_eq!(payload.name, Patch::Unset);
    }

    #[test]
    fn test_explicit_null_is_null() {
        let payload: Payload = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(payload.name, Patch::Null);
        assert_eq!(payload.active, Patch::Unset);
    }

    #[test]
    fn test_explicit_false_is_value() {
        // 명시적 false는 Unset과 구분되어야 함
        let payload: Payload = serde_json::from_str(r#"{"active": false}"#).unwrap();
        assert_eq!(payload.active, Patch::Value(false));
        assert!(!payload.active.is_unset());
    }

    #[test]
    fn test_map() {
        let patch = Patch::Value("abc".to_string());
        assert_eq!(patch.map(|s| s.len()), Patch::Value(3));
        assert_eq!(Patch::<String>::Unset.map(|s| s.len()), Patch::Unset);
    }
}
