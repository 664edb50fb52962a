use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use yt_core::page::{Page, PageParams};
use yt_sql::{Patch, UpdateSet};

use crate::error::Result;

use super::{apply_update, map_db_err, not_found, now};

/// 사용자의 그룹/역할/라이선스 배정 (user_id가 키)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSystemDescriptionRow {
    pub user_id: i64,
    pub group_id: Option<i64>,
    pub role_id: Option<i64>,
    pub license_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct NewUserSystemDescription {
    pub user_id: i64,
    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub license_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserSystemDescriptionPatch {
    #[serde(default)]
    pub group_id: Patch<i64>,
    #[serde(default)]
    pub role_id: Patch<i64>,
    #[serde(default)]
    pub license_id: Patch<i64>,
}

impl UserSystemDescriptionPatch {
    pub fn into_update_set(self) -> UpdateSet {
        let mut set = UpdateSet::new();
        set.set_patch("group_id", self.group_id);
        set.set_patch("role_id", self.role_id);
        set.set_patch("license_id", self.license_id);
        set
    }
}

pub async fn create(
    pool: &SqlitePool,
    new: &NewUserSystemDescription,
) -> Result<UserSystemDescriptionRow> {
    let ts = now();
    sqlx::query(
        "INSERT INTO yt_user_system_description (user_id, group_id, role_id, license_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(new.user_id)
    .bind(new.group_id)
    .bind(new.role_id)
    .bind(new.license_id)
    .bind(&ts)
    .bind(&ts)
    .execute(pool)
    .await
    .map_err(|e| map_db_err(e, "user system description"))?;

    get(pool, new.user_id).await
}

pub async fn get(pool: &SqlitePool, user_id: i64) -> Result<UserSystemDescriptionRow> {
    sqlx::query_as::<_, UserSystemDescriptionRow>(
        "SELECT * FROM yt_user_system_description WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| not_found("user system description", user_id))
}

pub async fn list(
    pool: &SqlitePool,
    params: &PageParams,
) -> Result<Page<UserSystemDescriptionRow>> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM yt_user_system_description")
        .fetch_one(pool)
        .await?;
    let items = sqlx::query_as::<_, UserSystemDescriptionRow>(
        "SELECT * FROM yt_user_system_description ORDER BY user_id LIMIT ? OFFSET ?",
    )
    .bind(params.limit())
    .bind(params.offset())
    .fetch_all(pool)
    .await?;
    Ok(Page::new(items, total, params))
}

pub async fn replace(
    pool: &SqlitePool,
    user_id: i64,
    new: &NewUserSystemDescription,
) -> Result<UserSystemDescriptionRow> {
    let mut set = UpdateSet::new();
    set.set_patch("group_id", Patch::from(new.group_id));
    set.set_patch("role_id", Patch::from(new.role_id));
    set.set_patch("license_id", Patch::from(new.license_id));
    update(pool, user_id, set).await
}

pub async fn update(
    pool: &SqlitePool,
    user_id: i64,
    set: UpdateSet,
) -> Result<UserSystemDescriptionRow> {
    apply_update(
        pool,
        "yt_user_system_description",
        "user_id",
        user_id,
        "user system description",
        set,
    )
    .await?;
    get(pool, user_id).await
}

pub async fn remove(pool: &SqlitePool, user_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM yt_user_system_description WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(not_found("user system description", user_id));
    }
    Ok(())
}
