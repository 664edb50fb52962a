//! 저장소 레이어
//!
//! 엔티티별 타입드 Row와 쿼리 함수를 제공합니다. 모든 쿼리는
//! 플레이스홀더 바인딩만 사용하며, 핸들러에는 타입드 Row만 노출됩니다.

use chrono::Utc;
use sqlx::error::ErrorKind;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;

use yt_core::Error;
use yt_sql::{BindValue, UpdateSet};

use crate::error::{ApiError, Result};

pub mod commodity;
pub mod commodity_group;
pub mod group;
pub mod license;
pub mod model;
pub mod role;
pub mod user;
pub mod user_system_description;

/// RFC3339 타임스탬프
pub(crate) fn now() -> String {
    Utc::now().to_rfc3339()
}

pub(crate) fn default_true() -> bool {
    true
}

/// DB 제약 위반을 도메인 에러로 변환
///
/// UNIQUE 위반 → 409, 그 외 제약 위반 → 400, 나머지는 저장소 에러 그대로.
pub(crate) fn map_db_err(e: sqlx::Error, what: &str) -> ApiError {
    if let sqlx::Error::Database(db) = &e {
        match db.kind() {
            ErrorKind::UniqueViolation => {
                return Error::Conflict {
                    message: format!("{what} already exists"),
                }
                .into()
            }
            ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => {
                return Error::BadRequest {
                    message: format!("invalid {what} payload"),
                }
                .into()
            }
            _ => {}
        }
    }
    ApiError::Storage(e)
}

/// id로 찾지 못한 경우의 404
pub(crate) fn not_found(what: &str, id: i64) -> ApiError {
    Error::NotFound {
        message: format!("{what} {id} does not exist"),
    }
    .into()
}

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// BindValue를 쿼리에 바인딩
pub(crate) fn bind<'q>(query: SqliteQuery<'q>, value: BindValue) -> SqliteQuery<'q> {
    match value {
        BindValue::Int(v) => query.bind(v),
        BindValue::Float(v) => query.bind(v),
        BindValue::Bool(v) => query.bind(v),
        BindValue::Text(v) => query.bind(v),
        BindValue::Null => query.bind(None::<String>),
    }
}

/// SET 절을 적용하는 공통 UPDATE
///
/// 영향받은 행이 없으면 404. `updated_at`은 항상 갱신됩니다.
pub(crate) async fn apply_update(
    pool: &SqlitePool,
    table: &str,
    key_column: &str,
    key: i64,
    what: &str,
    set: UpdateSet,
) -> Result<()> {
    let (clause, binds) = set.into_parts()?;
    // 컬럼명과 테이블명은 호출부의 고정 식별자, 값은 전부 바인딩
    let sql = format!("UPDATE {table} SET {clause}, updated_at = ? WHERE {key_column} = ?");

    let mut query = sqlx::query(&sql);
    for value in binds {
        query = bind(query, value);
    }
    let result = query
        .bind(now())
        .bind(key)
        .execute(pool)
        .await
        .map_err(|e| map_db_err(e, what))?;

    if result.rows_affected() == 0 {
        return Err(not_found(what, key));
    }
    Ok(())
}
