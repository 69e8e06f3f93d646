//! 核心错误处理模块

use axum::{
    extract::rejection::{BytesRejection, FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::response::timestamp;
use crate::app::users::error::UserError;

/// 核心错误类型
#[derive(Debug)]
pub enum AppError {
    /// 缺少必填输入 (400)
    ValidationError(String),
    /// 唯一性冲突 (409)
    Conflict(String),
    /// 资源不存在 (404)
    NotFound(String),
    /// 其他未预期的失败，携带状态码
    Unhandled { status: StatusCode, message: String },
}

impl AppError {
    pub fn unhandled(message: impl Into<String>) -> Self {
        AppError::Unhandled {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unhandled { status, .. } => *status,
        }
    }
}

/// 领域错误响应: `{success:false, error}`
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// 未处理失败的响应体，`path` / `method` 由错误上下文中间件补齐
#[derive(Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// 挂在响应扩展上的未处理失败信息
///
/// 错误上下文中间件据此重写响应体，附加请求路径与方法，并按部署模式脱敏。
#[derive(Debug, Clone)]
pub struct UnhandledFailure {
    pub status: StatusCode,
    pub message: String,
}

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::ValidationError(msg) | AppError::Conflict(msg) | AppError::NotFound(msg) => {
                (status, Json(ErrorResponse::new(msg))).into_response()
            }
            AppError::Unhandled { message, .. } => {
                // 中间件缺席时默认脱敏
                let body = FailureResponse {
                    success: false,
                    error: INTERNAL_SERVER_ERROR.to_string(),
                    timestamp: timestamp(),
                    path: None,
                    method: None,
                };
                let mut response = (status, Json(body)).into_response();
                response
                    .extensions_mut()
                    .insert(UnhandledFailure { status, message });
                response
            }
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        let message = err.to_string();
        match err {
            UserError::MissingFields => AppError::ValidationError(message),
            UserError::EmailTaken => AppError::Conflict(message),
            UserError::NotFound => AppError::NotFound(message),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Unhandled {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Unhandled {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::Unhandled {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
