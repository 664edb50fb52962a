use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use yt_core::page::{Page, PageParams};
use yt_sql::{BindValue, Patch, UpdateSet};

use crate::error::Result;

use super::{apply_update, default_true, map_db_err, not_found, now};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommodityRow {
    pub id: i64,
    pub commodity_name: String,
    pub active: bool,
    pub comm_group_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct NewCommodity {
    pub commodity_name: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub comm_group_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommodityPatch {
    #[serde(default)]
    pub commodity_name: Patch<String>,
    #[serde(default)]
    pub active: Patch<bool>,
    #[serde(default)]
    pub comm_group_id: Patch<i64>,
}

impl CommodityPatch {
    pub fn into_update_set(self) -> UpdateSet {
        let mut set = UpdateSet::new();
        set.set_patch("commodity_name", self.commodity_name);
        set.set_patch("active", self.active);
        set.set_patch("comm_group_id", self.comm_group_id);
        set
    }
}

pub async fn create(pool: &SqlitePool, new: &NewCommodity) -> Result<CommodityRow> {
    let ts = now();
    let result = sqlx::query(
        "INSERT INTO yt_commodity (commodity_name, active, comm_group_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&new.commodity_name)
    .bind(new.active)
    .bind(new.comm_group_id)
    .bind(&ts)
    .bind(&ts)
    .execute(pool)
    .await
    .map_err(|e| map_db_err(e, "commodity"))?;

    get(pool, result.last_insert_rowid()).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<CommodityRow> {
    sqlx::query_as::<_, CommodityRow>("SELECT * FROM yt_commodity WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found("commodity", id))
}

pub async fn list(pool: &SqlitePool, params: &PageParams) -> Result<Page<CommodityRow>> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM yt_commodity")
        .fetch_one(pool)
        .await?;
    let items =
        sqlx::query_as::<_, CommodityRow>("SELECT * FROM yt_commodity ORDER BY id LIMIT ? OFFSET ?")
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(pool)
            .await?;
    Ok(Page::new(items, total, params))
}

pub async fn replace(pool: &SqlitePool, id: i64, new: &NewCommodity) -> Result<CommodityRow> {
    let mut set = UpdateSet::new();
    set.set("commodity_name", new.commodity_name.as_str());
    set.set("active", new.active);
    match new.comm_group_id {
        Some(v) => set.set("comm_group_id", v),
        None => set.set("comm_group_id", BindValue::Null),
    };
    update(pool, id, set).await
}

pub async fn update(pool: &SqlitePool, id: i64, set: UpdateSet) -> Result<CommodityRow> {
    apply_update(pool, "yt_commodity", "id", id, "commodity", set).await?;
    get(pool, id).await
}

pub async fn remove(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM yt_commodity WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(not_found("commodity", id));
    }
    Ok(())
}
