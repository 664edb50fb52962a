use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use yt_core::page::{Page, PageParams};
use yt_sql::{Patch, UpdateSet};

use crate::error::Result;

use super::{apply_update, map_db_err, not_found, now};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleRow {
    pub id: i64,
    pub role_name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct NewRole {
    pub role_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RolePatch {
    #[serde(default)]
    pub role_name: Patch<String>,
}

impl RolePatch {
    pub fn into_update_set(self) -> UpdateSet {
        let mut set = UpdateSet::new();
        set.set_patch("role_name", self.role_name);
        set
    }
}

pub async fn create(pool: &SqlitePool, new: &NewRole) -> Result<RoleRow> {
    let ts = now();
    let result =
        sqlx::query("INSERT INTO yt_role (role_name, created_at, updated_at) VALUES (?, ?, ?)")
            .bind(&new.role_name)
            .bind(&ts)
            .bind(&ts)
            .execute(pool)
            .await
            .map_err(|e| map_db_err(e, "role"))?;

    get(pool, result.last_insert_rowid()).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<RoleRow> {
    sqlx::query_as::<_, RoleRow>("SELECT * FROM yt_role WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found("role", id))
}

pub async fn list(pool: &SqlitePool, params: &PageParams) -> Result<Page<RoleRow>> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM yt_role")
        .fetch_one(pool)
        .await?;
    let items = sqlx::query_as::<_, RoleRow>("SELECT * FROM yt_role ORDER BY id LIMIT ? OFFSET ?")
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(pool)
        .await?;
    Ok(Page::new(items, total, params))
}

pub async fn replace(pool: &SqlitePool, id: i64, new: &NewRole) -> Result<RoleRow> {
    let mut set = UpdateSet::new();
    set.set("role_name", new.role_name.as_str());
    update(pool, id, set).await
}

pub async fn update(pool: &SqlitePool, id: i64, set: UpdateSet) -> Result<RoleRow> {
    apply_update(pool, "yt_role", "id", id, "role", set).await?;
    get(pool, id).await
}

pub async fn remove(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM yt_role WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(not_found("role", id));
    }
    Ok(())
}
