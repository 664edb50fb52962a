use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use yt_core::page::{Page, PageParams};
use yt_sql::{Patch, UpdateSet};

use crate::error::Result;

use super::{apply_update, map_db_err, not_found, now};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LicenseRow {
    pub id: i64,
    pub license_type: String,
    pub license_issue_date: Option<String>,
    pub license_expiry_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct NewLicense {
    pub license_type: String,
    #[serde(default)]
    pub license_issue_date: Option<String>,
    #[serde(default)]
    pub license_expiry_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LicensePatch {
    #[serde(default)]
    pub license_type: Patch<String>,
    #[serde(default)]
    pub license_issue_date: Patch<String>,
    #[serde(default)]
    pub license_expiry_date: Patch<String>,
}

impl LicensePatch {
    pub fn into_update_set(self) -> UpdateSet {
        let mut set = UpdateSet::new();
        set.set_patch("license_type", self.license_type);
        set.set_patch("license_issue_date", self.license_issue_date);
        set.set_patch("license_expiry_date", self.license_expiry_date);
        set
    }
}

pub async fn create(pool: &SqlitePool, new: &NewLicense) -> Result<LicenseRow> {
    let ts = now();
    let result = sqlx::query(
        "INSERT INTO yt_license (license_type, license_issue_date, license_expiry_date, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&new.license_type)
    .bind(&new.license_issue_date)
    .bind(&new.license_expiry_date)
    .bind(&ts)
    .bind(&ts)
    .execute(pool)
    .await
    .map_err(|e| map_db_err(e, "license"))?;

    get(pool, result.last_insert_rowid()).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<LicenseRow> {
    sqlx::query_as::<_, LicenseRow>("SELECT * FROM yt_license WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found("license", id))
}

pub async fn list(pool: &SqlitePool, params: &PageParams) -> Result<Page<LicenseRow>> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM yt_license")
        .fetch_one(pool)
        .await?;
    let items =
        sqlx::query_as::<_, LicenseRow>("SELECT * FROM yt_license ORDER BY id LIMIT ? OFFSET ?")
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(pool)
            .await?;
    Ok(Page::new(items, total, params))
}

pub async fn replace(pool: &SqlitePool, id: i64, new: &NewLicense) -> Result<LicenseRow> {
    let mut set = UpdateSet::new();
    set.set("license_type", new.license_type.as_str());
    set.set_patch("license_issue_date", Patch::from(new.license_issue_date.clone()));
    set.set_patch("license_expiry_date", Patch::from(new.license_expiry_date.clone()));
    update(pool, id, set).await
}

pub async fn update(pool: &SqlitePool, id: i64, set: UpdateSet) -> Result<LicenseRow> {
    apply_update(pool, "yt_license", "id", id, "license", set).await?;
    get(pool, id).await
}

pub async fn remove(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM yt_license WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(not_found("license", id));
    }
    Ok(())
}
