use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use yt_core::page::{Page, PageParams};
use yt_sql::{Patch, UpdateSet};

use crate::error::Result;

use super::{apply_update, default_true, map_db_err, not_found, now};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GroupRow {
    pub id: i64,
    pub group_name: String,
    pub company_name: Option<String>,
    pub group_description: Option<String>,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct NewGroup {
    pub group_name: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub group_description: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct GroupPatch {
    #[serde(default)]
    pub group_name: Patch<String>,
    #[serde(default)]
    pub company_name: Patch<String>,
    #[serde(default)]
    pub group_description: Patch<String>,
    #[serde(default)]
    pub active: Patch<bool>,
}

impl GroupPatch {
    pub fn into_update_set(self) -> UpdateSet {
        let mut set = UpdateSet::new();
        set.set_patch("group_name", self.group_name);
        set.set_patch("company_name", self.company_name);
        set.set_patch("group_description", self.group_description);
        set.set_patch("active", self.active);
        set
    }
}

pub async fn create(pool: &SqlitePool, new: &NewGroup) -> Result<GroupRow> {
    let ts = now();
    let result = sqlx::query(
        "INSERT INTO yt_group (group_name, company_name, group_description, active, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&new.group_name)
    .bind(&new.company_name)
    .bind(&new.group_description)
    .bind(new.active)
    .bind(&ts)
    .bind(&ts)
    .execute(pool)
    .await
    .map_err(|e| map_db_err(e, "group"))?;

    get(pool, result.last_insert_rowid()).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<GroupRow> {
    sqlx::query_as::<_, GroupRow>("SELECT * FROM yt_group WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found("group", id))
}

pub async fn list(pool: &SqlitePool, params: &PageParams) -> Result<Page<GroupRow>> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM yt_group")
        .fetch_one(pool)
        .await?;
    let items = sqlx::query_as::<_, GroupRow>("SELECT * FROM yt_group ORDER BY id LIMIT ? OFFSET ?")
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(pool)
        .await?;
    Ok(Page::new(items, total, params))
}

pub async fn replace(pool: &SqlitePool, id: i64, new: &NewGroup) -> Result<GroupRow> {
    let mut set = UpdateSet::new();
    set.set("group_name", new.group_name.as_str());
    set.set_patch("company_name", Patch::from(new.company_name.clone()));
    set.set_patch("group_description", Patch::from(new.group_description.clone()));
    set.set("active", new.active);
    update(pool, id, set).await
}

pub async fn update(pool: &SqlitePool, id: i64, set: UpdateSet) -> Result<GroupRow> {
    apply_update(pool, "yt_group", "id", id, "group", set).await?;
    get(pool, id).await
}

pub async fn remove(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM yt_group WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(not_found("group", id));
    }
    Ok(())
}
