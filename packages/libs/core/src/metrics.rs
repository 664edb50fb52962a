//! 예측 오차 지표 계산
//!
//! 실측값/예측값 쌍에서 MAPE, MSE, RMSE, MAE, WAPE를 계산합니다.
//! 순수 함수이며 저장소나 HTTP에 의존하지 않습니다.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 예측 오차 지표 묶음
///
/// 직렬화 키는 기존 API와 동일하게 대문자를 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastErrors {
    #[serde(rename = "MAPE")]
    pub mape: f64,
    #[serde(rename = "MSE")]
    pub mse: f64,
    #[serde(rename = "RMSE")]
    pub rmse: f64,
    #[serde(rename = "MAE")]
    pub mae: f64,
    #[serde(rename = "WAPE")]
    pub wape: f64,
}

impl ForecastErrors {
    /// 지표 이름으로 값 조회 (metric type 테이블의 type_name과 대응)
    pub fn by_name(&self, name: &str) -> Option<f64> {
        match name {
            "MAPE" => Some(self.mape),
            "MSE" => Some(self.mse),
            "RMSE" => Some(self.rmse),
            "MAE" => Some(self.mae),
            "WAPE" => Some(self.wape),
            _ => None,
        }
    }
}

/// 오차 지표 계산
///
/// - MAPE = mean(|a − f| / a) × 100
/// - MSE  = mean((f − a)²),  RMSE = √MSE
/// - MAE  = mean(|f − a|)
/// - WAPE = Σ|a − f| / Σa
///
/// 두 배열 길이가 다르거나 비어 있으면 `BadRequest`.
/// 실측값에 0이 포함되면 MAPE/WAPE가 정의되지 않으므로 역시 `BadRequest`.
pub fn error_metrics(actual: &[f64], forecast: &[f64]) -> Result<ForecastErrors> {
    if actual.is_empty() || actual.len() != forecast.len() {
        return Err(Error::BadRequest {
            message: "actual and forecast series must be non-empty and equal length".to_string(),
        });
    }
    if actual.iter().any(|a| *a == 0.0) {
        return Err(Error::BadRequest {
            message: "actual series must not contain zero values".to_string(),
        });
    }

    let n = actual.len() as f64;

    let mut abs_err_sum = 0.0;
    let mut sq_err_sum = 0.0;
    let mut pct_err_sum = 0.0;
    let mut actual_sum = 0.0;

    for (a, f) in actual.iter().zip(forecast.iter()) {
        let diff = a - f;
        abs_err_sum += diff.abs();
        sq_err_sum += diff * diff;
        pct_err_sum += (diff / a).abs();
        actual_sum += a;
    }

    let mse = sq_err_sum / n;

    Ok(ForecastErrors {
        mape: pct_err_sum / n * 100.0,
        mse,
        rmse: mse.sqrt(),
        mae: abs_err_sum / n,
        wape: abs_err_sum / actual_sum,
    })
}

/// 정확도 계산 (accuracy = 100 − MAPE)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastAccuracy {
    #[serde(rename = "Accuracy")]
    pub accuracy: f64,
    #[serde(rename = "Error")]
    pub error: f64,
}

pub fn accuracy(actual: &[f64], forecast: &[f64]) -> Result<ForecastAccuracy> {
    let errors = error_metrics(actual, forecast)?;
    Ok(ForecastAccuracy {
        accuracy: 100.0 - errors.mape,
        error: errors.mape,
    })
}
