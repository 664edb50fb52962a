//! 역할 계층과 스코프 확장
//!
//! 역할은 엄격한 전순서 계층을 이룹니다:
//! `SUPER_ADMIN > ADMIN > MANAGER > USER > REPORTING_USER`
//!
//! 상위 역할은 자신과 하위 모든 역할의 스코프를 가집니다.

use serde::{Deserialize, Serialize};

/// 시스템 역할
///
/// 선언 순서가 곧 권한 순위입니다 (위가 상위).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    SuperAdmin,
    Admin,
    Manager,
    User,
    ReportingUser,
}

/// 상위 → 하위 순서의 역할 계층
pub const ROLE_HIERARCHY: [Role; 5] = [
    Role::SuperAdmin,
    Role::Admin,
    Role::Manager,
    Role::User,
    Role::ReportingUser,
];

impl Role {
    /// 스코프 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::User => "USER",
            Role::ReportingUser => "REPORTING_USER",
        }
    }

    /// 이름에서 파싱 (대문자 기준)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SUPER_ADMIN" => Some(Role::SuperAdmin),
            "ADMIN" => Some(Role::Admin),
            "MANAGER" => Some(Role::Manager),
            "USER" => Some(Role::User),
            "REPORTING_USER" => Some(Role::ReportingUser),
            _ => None,
        }
    }

    /// 이 역할이 가지는 전체 스코프 (자신 + 하위 전부, 순위 순)
    pub fn implied(&self) -> &'static [Role] {
        let rank = ROLE_HIERARCHY
            .iter()
            .position(|r| r == self)
            .unwrap_or(ROLE_HIERARCHY.len() - 1);
        &ROLE_HIERARCHY[rank..]
    }
}

/// 역할 이름 목록을 전체 스코프 집합으로 확장합니다.
///
/// 계층을 위에서부터 훑어 입력에 포함된 **가장 상위** 역할 하나만이
/// 결과를 결정합니다. 하위 역할이 함께 들어 있어도 합산하지 않습니다.
/// 인식되는 역할 이름이 하나도 없으면 입력을 그대로 돌려주며,
/// 이 경우 이후의 스코프 검사는 항상 실패합니다 (fail-closed).
pub fn expand_scopes(scopes: &[String]) -> Vec<String> {
    for role in ROLE_HIERARCHY {
        if scopes.iter().any(|s| s == role.as_str()) {
            return role.implied().iter().map(|r| r.as_str().to_string()).collect();
        }
    }
    scopes.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_expand_each_role() {
        assert_eq!(
            expand_scopes(&names(&["SUPER_ADMIN"])),
            names(&["SUPER_ADMIN", "ADMIN", "MANAGER", "USER", "REPORTING_USER"])
        );
        assert_eq!(
            expand_scopes(&names(&["ADMIN"])),
            names(&["ADMIN", "MANAGER", "USER", "REPORTING_USER"])
        );
        assert_eq!(
            expand_scopes(&names(&["MANAGER"])),
            names(&["MANAGER", "USER", "REPORTING_USER"])
        );
        assert_eq!(
            expand_scopes(&names(&["USER"])),
            names(&["USER", "REPORTING_USER"])
        );
        assert_eq!(
            expand_scopes(&names(&["REPORTING_USER"])),
            names(&["REPORTING_USER"])
        );
    }

    #[test]
    fn test_highest_role_wins() {
        // ADMIN + SUPER_ADMIN → SUPER_ADMIN 확장만
        let out = expand_scopes(&names(&["ADMIN", "SUPER_ADMIN"]));
        assert_eq!(
            out,
            names(&["SUPER_ADMIN", "ADMIN", "MANAGER", "USER", "REPORTING_USER"])
        );

        // 순서 무관
        let out = expand_scopes(&names(&["REPORTING_USER", "MANAGER"]));
        assert_eq!(out, names(&["MANAGER", "USER", "REPORTING_USER"]));
    }

    #[test]
    fn test_unrecognized_input_unchanged() {
        let input = names(&["SOMETHING_ELSE"]);
        assert_eq!(expand_scopes(&input), input);

        let empty: Vec<String> = vec![];
        assert_eq!(expand_scopes(&empty), empty);
    }

    #[test]
    fn test_role_roundtrip() {
        for role in ROLE_HIERARCHY {
            assert_eq!(Role::from_name(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_name("admin"), None);
    }
}
