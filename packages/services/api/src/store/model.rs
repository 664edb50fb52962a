use sqlx::{FromRow, SqlitePool};

use crate::error::Result;

use super::not_found;

/// (예측값, 실측값) 쌍
#[derive(Debug, Clone, FromRow)]
pub struct ForecastPair {
    pub forecast_value: f64,
    pub actual_value: f64,
}

#[derive(Debug, Clone, FromRow)]
pub struct MetricTypeRow {
    pub id: i64,
    pub type_name: String,
}

pub async fn forecast_pairs(pool: &SqlitePool, assign_model_id: i64) -> Result<Vec<ForecastPair>> {
    let rows = sqlx::query_as::<_, ForecastPair>(
        "SELECT forecast_value, actual_value FROM yt_model_forecast
         WHERE assign_model_id = ? ORDER BY id",
    )
    .bind(assign_model_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn model_name(pool: &SqlitePool, assign_model_id: i64) -> Result<String> {
    sqlx::query_scalar::<_, String>(
        "SELECT m.model_name FROM yt_assign_model a
         JOIN yt_model m ON m.id = a.model_id
         WHERE a.id = ?",
    )
    .bind(assign_model_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| not_found("model assignment", assign_model_id))
}

pub async fn metric_types(pool: &SqlitePool) -> Result<Vec<MetricTypeRow>> {
    let rows = sqlx::query_as::<_, MetricTypeRow>(
        "SELECT id, type_name FROM yt_model_metric_type ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// 계산된 지표를 타입별로 한 트랜잭션에 기록
pub async fn record_metrics(
    pool: &SqlitePool,
    assign_model_id: i64,
    scores: &[(i64, f64)],
) -> Result<()> {
    let mut tx = pool.begin().await?;
    for (metric_type_id, score) in scores {
        sqlx::query(
            "INSERT INTO yt_model_metric (metric_score, metric_type_id, assign_model_id)
             VALUES (?, ?, ?)",
        )
        .bind(score)
        .bind(metric_type_id)
        .bind(assign_model_id)
        .execute(tx.as_mut())
        .await?;
    }
    tx.commit().await?;
    Ok(())
}
