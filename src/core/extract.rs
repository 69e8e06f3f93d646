//! 请求体提取器
//!
//! 按 `Content-Type` 解析请求体：JSON 与 urlencoded 表单各自解析，
//! 其他类型、空请求体或顶层不是对象的 JSON 得到 `T::default()`。
//! 解析失败以 `AppError::Unhandled` 的形式携带拒绝原因的状态码，
//! 交给错误上下文中间件渲染。

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::AppError;

pub struct Payload<T>(pub T);

enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(content_type) = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return BodyKind::Other;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state).await?;
                if bytes.is_empty() {
                    return Ok(Payload(T::default()));
                }
                let Json(value) = Json::<Value>::from_bytes(&bytes)?;
                // 数组、字符串、null 等视为没有字段
                if !value.is_object() {
                    return Ok(Payload(T::default()));
                }
                let value = serde_json::from_value(value).map_err(|e| AppError::Unhandled {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    message: format!(
                        "Failed to deserialize the JSON body into the target type: {}",
                        e
                    ),
                })?;
                Ok(Payload(value))
            }
            BodyKind::Form => {
                let Form(value) = Form::<T>::from_request(req, state).await?;
                Ok(Payload(value))
            }
            BodyKind::Other => Ok(Payload(T::default())),
        }
    }
}
