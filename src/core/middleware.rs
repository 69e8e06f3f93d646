//! 核心中间件模块

use std::any::Any;
use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::HttpBody,
    extract::{ConnectInfo, Request, State},
    http::{
        header::{self, HeaderName, HeaderValue},
        Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use super::error::{AppError, FailureResponse, UnhandledFailure, INTERNAL_SERVER_ERROR};
use super::response::timestamp;
use super::state::AppState;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// 请求日志中间件
///
/// 每个请求一条访问日志，字段对应 combined 格式；同时确保响应带有 `x-request-id`。
pub async fn request_logging_middleware(mut req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = match req.headers().get(&X_REQUEST_ID) {
        Some(value) => value.clone(),
        None => {
            let generated = HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("-"));
            req.headers_mut()
                .insert(X_REQUEST_ID.clone(), generated.clone());
            generated
        }
    };

    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();
    let referer = header_str(&req, header::REFERER);
    let user_agent = header_str(&req, header::USER_AGENT);

    let mut response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();
    let content_length = body_length(&response);

    info!(
        remote_addr = %remote_addr,
        method = %method,
        uri = %uri,
        version = ?version,
        status = status.as_u16(),
        content_length = %content_length,
        referer = %referer,
        user_agent = %user_agent,
        duration_ms = duration.as_millis() as u64,
        request_id = request_id.to_str().unwrap_or("-"),
        "{} {} - {} - {}ms",
        method,
        uri,
        status,
        duration.as_millis()
    );

    response
        .headers_mut()
        .entry(X_REQUEST_ID.clone())
        .or_insert(request_id);
    response
}

/// 响应体字节数，流式响应长度未知时为 `-`
fn body_length(response: &Response) -> String {
    response
        .body()
        .size_hint()
        .exact()
        .map(|len| len.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn header_str(req: &Request, name: HeaderName) -> String {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string()
}

/// 安全响应头，已存在的同名头不覆盖；不设置 CSP
const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    (
        "strict-transport-security",
        "max-age=15552000; includeSubDomains",
    ),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    for &(name, value) in SECURITY_HEADERS {
        headers
            .entry(HeaderName::from_static(name))
            .or_insert(HeaderValue::from_static(value));
    }
    response
}

/// 错误上下文中间件
///
/// 为未处理失败补齐 `path` / `method`，生产模式下只返回
/// "Internal Server Error"。路径存在但方法不匹配 (405) 按未匹配路由处理。
pub async fn error_context_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    if let Some(failure) = response.extensions().get::<UnhandledFailure>().cloned() {
        error!(
            status = failure.status.as_u16(),
            method = %method,
            path = %path,
            "请求处理失败: {}",
            failure.message
        );

        let message = if state.config.environment.is_production() {
            INTERNAL_SERVER_ERROR.to_string()
        } else {
            failure.message
        };
        let body = FailureResponse {
            success: false,
            error: message,
            timestamp: timestamp(),
            path: Some(path),
            method: Some(method.to_string()),
        };
        return (failure.status, Json(body)).into_response();
    }

    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return not_found_response(&method, &path);
    }

    response
}

#[derive(Serialize)]
struct NotFoundResponse {
    error: &'static str,
    message: String,
    timestamp: String,
}

fn not_found_response(method: &Method, path: &str) -> Response {
    let body = NotFoundResponse {
        error: "Not Found",
        message: format!("Cannot {} {}", method, path),
        timestamp: timestamp(),
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// 未匹配路由的兜底处理器
pub async fn not_found(req: Request) -> Response {
    not_found_response(req.method(), req.uri().path())
}

/// 处理器 panic 时的响应，交由错误上下文中间件渲染
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    AppError::unhandled(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http, middleware::from_fn, routing::get, Router};
    use tower::ServiceExt;

    fn logged_router() -> Router {
        Router::new()
            .route("/", get(|| async { "hello" }))
            .layer(from_fn(request_logging_middleware))
    }

    #[test]
    fn test_body_length_is_exact_for_buffered_bodies() {
        let response = Json(serde_json::json!({ "ok": true })).into_response();
        assert_eq!(body_length(&response), "11");

        let response = "hello".into_response();
        assert_eq!(body_length(&response), "5");
    }

    #[tokio::test]
    async fn test_request_id_is_generated() {
        let response = logged_router()
            .oneshot(http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = response.headers().get(&X_REQUEST_ID).unwrap();
        assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let response = logged_router()
            .oneshot(
                http::Request::builder()
                    .uri("/")
                    .header(&X_REQUEST_ID, "req-7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers().get(&X_REQUEST_ID).unwrap(), "req-7");
    }

    #[test]
    fn test_panic_response_keeps_message() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response
                .extensions()
                .get::<UnhandledFailure>()
                .map(|f| f.message.as_str()),
            Some("boom")
        );
    }

    #[test]
    fn test_not_found_response() {
        let response = not_found_response(&Method::DELETE, "/nope");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
