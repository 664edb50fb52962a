use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use yt_core::page::{Page, PageParams};
use yt_sql::{Patch, UpdateSet};

use crate::error::Result;

use super::{apply_update, map_db_err, not_found, now};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommodityGroupRow {
    pub id: i64,
    pub comm_group_name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct NewCommodityGroup {
    pub comm_group_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommodityGroupPatch {
    #[serde(default)]
    pub comm_group_name: Patch<String>,
}

impl CommodityGroupPatch {
    pub fn into_update_set(self) -> UpdateSet {
        let mut set = UpdateSet::new();
        set.set_patch("comm_group_name", self.comm_group_name);
        set
    }
}

pub async fn create(pool: &SqlitePool, new: &NewCommodityGroup) -> Result<CommodityGroupRow> {
    let ts = now();
    let result = sqlx::query(
        "INSERT INTO yt_comm_group (comm_group_name, created_at, updated_at) VALUES (?, ?, ?)",
    )
    .bind(&new.comm_group_name)
    .bind(&ts)
    .bind(&ts)
    .execute(pool)
    .await
    .map_err(|e| map_db_err(e, "commodity group"))?;

    get(pool, result.last_insert_rowid()).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<CommodityGroupRow> {
    sqlx::query_as::<_, CommodityGroupRow>("SELECT * FROM yt_comm_group WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found("commodity group", id))
}

pub async fn list(pool: &SqlitePool, params: &PageParams) -> Result<Page<CommodityGroupRow>> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM yt_comm_group")
        .fetch_one(pool)
        .await?;
    let items = sqlx::query_as::<_, CommodityGroupRow>(
        "SELECT * FROM yt_comm_group ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(params.limit())
    .bind(params.offset())
    .fetch_all(pool)
    .await?;
    Ok(Page::new(items, total, params))
}

pub async fn replace(
    pool: &SqlitePool,
    id: i64,
    new: &NewCommodityGroup,
) -> Result<CommodityGroupRow> {
    let mut set = UpdateSet::new();
    set.set("comm_group_name", new.comm_group_name.as_str());
    update(pool, id, set).await
}

pub async fn update(pool: &SqlitePool, id: i64, set: UpdateSet) -> Result<CommodityGroupRow> {
    apply_update(pool, "yt_comm_group", "id", id, "commodity group", set).await?;
    get(pool, id).await
}

pub async fn remove(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM yt_comm_group WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(not_found("commodity group", id));
    }
    Ok(())
}
