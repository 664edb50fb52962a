use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use yt_core::metrics::error_metrics;
use yt_core::Error;

use crate::error::Result;
use crate::guard::AuthContext;
use crate::state::AppState;
use crate::store::model;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/error_calculator/get/errors/:assign_model_id", get(get_errors))
}

/// 예측 오차 지표 계산 + 기록
///
/// 배정된 예측/실측 쌍으로 지표를 계산하고, 타입별 점수를
/// 한 트랜잭션으로 기록한 뒤 모델 이름과 함께 반환합니다.
async fn get_errors(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(assign_model_id): Path<i64>,
) -> Result<Json<Vec<Value>>> {
    auth.authorize("REPORTING_USER")?;

    let pairs = model::forecast_pairs(&state.db, assign_model_id).await?;
    if pairs.is_empty() {
        return Err(Error::BadRequest {
            message: format!("no forecasts found for assignment {assign_model_id}"),
        }
        .into());
    }

    let (actual, forecast): (Vec<f64>, Vec<f64>) =
        pairs.iter().map(|p| (p.actual_value, p.forecast_value)).unzip();
    let errors = error_metrics(&actual, &forecast)?;

    let types = model::metric_types(&state.db).await?;
    let scores: Vec<(i64, f64)> = types
        .iter()
        .filter_map(|t| errors.by_name(&t.type_name).map(|score| (t.id, score)))
        .collect();
    model::record_metrics(&state.db, assign_model_id, &scores).await?;

    let name = model::model_name(&state.db, assign_model_id).await?;

    let mut body = serde_json::to_value(&errors).map_err(Error::from)?;
    body["model"] = json!(name);
    Ok(Json(vec![body]))
}
