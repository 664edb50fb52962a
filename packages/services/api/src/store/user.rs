use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use yt_core::page::{Page, PageParams};
use yt_core::Error;
use yt_sql::{Patch, UpdateSet};

use crate::error::Result;

use super::{bind, map_db_err, not_found, now};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub contact: Option<String>,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub disabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// 로그인 검증용 최소 조회
#[derive(Debug, FromRow)]
pub struct CredentialRow {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// 토큰 검증 후 재조회되는 신원
///
/// user ⋈ user_system_description ⋈ role 3중 조인의 결과로,
/// 저장된 역할이 권한의 유일한 근거가 됩니다.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IdentityRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub disabled: bool,
    pub role_name: String,
    pub group_id: Option<i64>,
    pub role_id: Option<i64>,
    pub license_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub license_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub first_name: Patch<String>,
    #[serde(default)]
    pub last_name: Patch<String>,
    #[serde(default)]
    pub contact: Patch<String>,
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub username: Patch<String>,
    #[serde(default)]
    pub password: Patch<String>,
    #[serde(default)]
    pub company_name: Patch<String>,
    #[serde(default)]
    pub address: Patch<String>,
    #[serde(default)]
    pub city: Patch<String>,
    #[serde(default)]
    pub country: Patch<String>,
    #[serde(default)]
    pub postal_code: Patch<String>,
    #[serde(default)]
    pub disabled: Patch<bool>,
    #[serde(default)]
    pub group_id: Patch<i64>,
    #[serde(default)]
    pub role_id: Patch<i64>,
    #[serde(default)]
    pub license_id: Patch<i64>,
}

impl UserPatch {
    /// (사용자 SET, 시스템 기술 SET) 쌍으로 분해
    ///
    /// `password`는 호출부에서 이미 해시되어 있어야 합니다.
    pub fn into_update_sets(self) -> (UpdateSet, UpdateSet) {
        let mut user_set = UpdateSet::new();
        user_set.set_patch("first_name", self.first_name);
        user_set.set_patch("last_name", self.last_name);
        user_set.set_patch("contact", self.contact);
        user_set.set_patch("email", self.email.map(|e| e.to_lowercase()));
        user_set.set_patch("username", self.username.map(|u| u.to_lowercase()));
        user_set.set_patch("password", self.password);
        user_set.set_patch("company_name", self.company_name);
        user_set.set_patch("address", self.address);
        user_set.set_patch("city", self.city);
        user_set.set_patch("country", self.country);
        user_set.set_patch("postal_code", self.postal_code);
        user_set.set_patch("disabled", self.disabled);

        let mut usd_set = UpdateSet::new();
        usd_set.set_patch("group_id", self.group_id);
        usd_set.set_patch("role_id", self.role_id);
        usd_set.set_patch("license_id", self.license_id);

        (user_set, usd_set)
    }
}

/// 사용자 + 시스템 기술 행을 한 트랜잭션으로 생성
///
/// `password_hash`는 호출부에서 이미 해시된 값입니다.
pub async fn create(pool: &SqlitePool, new: &NewUser, password_hash: &str) -> Result<UserRow> {
    let ts = now();
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO yt_user (first_name, last_name, contact, email, username, password,
                              company_name, address, city, country, postal_code, disabled,
                              created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.contact)
    .bind(new.email.to_lowercase())
    .bind(new.username.to_lowercase())
    .bind(password_hash)
    .bind(&new.company_name)
    .bind(&new.address)
    .bind(&new.city)
    .bind(&new.country)
    .bind(&new.postal_code)
    .bind(new.disabled)
    .bind(&ts)
    .bind(&ts)
    .execute(tx.as_mut())
    .await
    .map_err(|e| map_db_err(e, "user"))?;

    let user_id = result.last_insert_rowid();

    sqlx::query(
        "INSERT INTO yt_user_system_description (user_id, group_id, role_id, license_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(new.group_id)
    .bind(new.role_id)
    .bind(new.license_id)
    .bind(&ts)
    .bind(&ts)
    .execute(tx.as_mut())
    .await
    .map_err(|e| map_db_err(e, "user system description"))?;

    tx.commit().await?;
    get(pool, user_id).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<UserRow> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM yt_user WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found("user", id))
}

pub async fn list(pool: &SqlitePool, params: &PageParams) -> Result<Page<UserRow>> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM yt_user")
        .fetch_one(pool)
        .await?;
    let items = sqlx::query_as::<_, UserRow>("SELECT * FROM yt_user ORDER BY id LIMIT ? OFFSET ?")
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(pool)
        .await?;
    Ok(Page::new(items, total, params))
}

/// 전체 교체 (PUT)
pub async fn replace(
    pool: &SqlitePool,
    id: i64,
    new: &NewUser,
    password_hash: &str,
) -> Result<UserRow> {
    let mut user_set = UpdateSet::new();
    user_set.set("first_name", new.first_name.as_str());
    user_set.set_patch("last_name", Patch::from(new.last_name.clone()));
    user_set.set_patch("contact", Patch::from(new.contact.clone()));
    user_set.set("email", new.email.to_lowercase());
    user_set.set("username", new.username.to_lowercase());
    user_set.set("password", password_hash);
    user_set.set_patch("company_name", Patch::from(new.company_name.clone()));
    user_set.set_patch("address", Patch::from(new.address.clone()));
    user_set.set_patch("city", Patch::from(new.city.clone()));
    user_set.set_patch("country", Patch::from(new.country.clone()));
    user_set.set_patch("postal_code", Patch::from(new.postal_code.clone()));
    user_set.set("disabled", new.disabled);

    let mut usd_set = UpdateSet::new();
    usd_set.set_patch("group_id", Patch::from(new.group_id));
    usd_set.set_patch("role_id", Patch::from(new.role_id));
    usd_set.set_patch("license_id", Patch::from(new.license_id));

    update(pool, id, user_set, usd_set).await
}

/// 사용자 컬럼과 시스템 기술 컬럼을 한 트랜잭션으로 갱신
///
/// 두 SET이 모두 비어 있으면 `EmptyUpdate`. 한쪽만 비어 있으면
/// 비어 있지 않은 쪽만 실행됩니다.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    user_set: UpdateSet,
    usd_set: UpdateSet,
) -> Result<UserRow> {
    if user_set.is_empty() && usd_set.is_empty() {
        return Err(Error::EmptyUpdate.into());
    }

    let ts = now();
    let mut tx = pool.begin().await?;

    if user_set.is_empty() {
        // 사용자 존재 확인은 그래도 필요
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM yt_user WHERE id = ?")
            .bind(id)
            .fetch_optional(tx.as_mut())
            .await?;
        if exists.is_none() {
            return Err(not_found("user", id));
        }
    } else {
        let (clause, binds) = user_set.into_parts()?;
        let sql = format!("UPDATE yt_user SET {clause}, updated_at = ? WHERE id = ?");
        let mut query = sqlx::query(&sql);
        for value in binds {
            query = bind(query, value);
        }
        let result = query
            .bind(&ts)
            .bind(id)
            .execute(tx.as_mut())
            .await
            .map_err(|e| map_db_err(e, "user"))?;
        if result.rows_affected() == 0 {
            return Err(not_found("user", id));
        }
    }

    if !usd_set.is_empty() {
        let (clause, binds) = usd_set.into_parts()?;
        let sql =
            format!("UPDATE yt_user_system_description SET {clause}, updated_at = ? WHERE user_id = ?");
        let mut query = sqlx::query(&sql);
        for value in binds {
            query = bind(query, value);
        }
        let result = query
            .bind(&ts)
            .bind(id)
            .execute(tx.as_mut())
            .await
            .map_err(|e| map_db_err(e, "user system description"))?;
        if result.rows_affected() == 0 {
            return Err(not_found("user system description", id));
        }
    }

    tx.commit().await?;
    get(pool, id).await
}

/// 사용자 + 시스템 기술 행을 한 트랜잭션으로 삭제
pub async fn remove(pool: &SqlitePool, id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM yt_user_system_description WHERE user_id = ?")
        .bind(id)
        .execute(tx.as_mut())
        .await?;

    let result = sqlx::query("DELETE FROM yt_user WHERE id = ?")
        .bind(id)
        .execute(tx.as_mut())
        .await?;
    if result.rows_affected() == 0 {
        return Err(not_found("user", id));
    }

    tx.commit().await?;
    Ok(())
}

pub async fn find_credentials(pool: &SqlitePool, username: &str) -> Result<Option<CredentialRow>> {
    let row = sqlx::query_as::<_, CredentialRow>(
        "SELECT id, username, password FROM yt_user WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_identity(pool: &SqlitePool, user_id: i64) -> Result<Option<IdentityRow>> {
    let row = sqlx::query_as::<_, IdentityRow>(
        "SELECT u.id, u.username, u.email, u.first_name, u.disabled,
                r.role_name, d.group_id, d.role_id, d.license_id
         FROM yt_user u
         JOIN yt_user_system_description d ON d.user_id = u.id
         JOIN yt_role r ON r.id = d.role_id
         WHERE u.id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
