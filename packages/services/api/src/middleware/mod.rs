//! API 미들웨어
//!
//! 요청 ID 전파 미들웨어를 정의합니다.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

tokio::task_local! {
    static REQUEST_ID: String;
}

/// 현재 요청의 ID (에러 응답 본문에 실림)
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

/// 클라이언트가 보낸 `x-request-id`를 이어받고, 없으면 새로 발급
///
/// ID는 task-local로 핸들러와 에러 변환기에 전파되며,
/// 응답 헤더로도 되돌려집니다.
pub async fn request_id(req: Request, next: Next) -> Response {
    let id = inbound_request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut resp = REQUEST_ID.scope(id.clone(), async move { next.run(req).await }).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        resp.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    resp
}

fn inbound_request_id(req: &Request) -> Option<String> {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(str::to_string)
}
