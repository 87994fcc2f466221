//! 核心错误处理模块
//!
//! 客户端与内存后端共用同一个错误类型：后端通过 `IntoResponse` 输出，
//! 客户端再按状态码还原成相同的变体。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("表单校验失败: {0}")]
    Validation(String),
    #[error("产品已存在: {id}")]
    Conflict { id: String },
    #[error("资源不存在 ({status}): {message}")]
    NotFound { status: u16, message: String },
    #[error("请求无效 ({status}): {message}")]
    BadRequest { status: u16, message: String },
    #[error("意外的响应 ({status}): {message}")]
    Unexpected { status: u16, message: String },
    #[error("网络错误: {0}")]
    Network(String),
    #[error("响应解析失败: {0}")]
    Decode(String),
    #[error("无效的地址: {0}")]
    InvalidUrl(String),
    #[error("产品标识为空")]
    MissingId,
    #[error("未选择产品")]
    NoSelection,
    #[error("删除未经确认")]
    NotConfirmed,
}

/// 错误分类，用于日志和展示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    BadRequest,
    Unexpected,
}

impl CatalogError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            status: StatusCode::NOT_FOUND.as_u16(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            status: StatusCode::BAD_REQUEST.as_u16(),
            message: message.into(),
        }
    }

    /// 按 HTTP 状态码还原错误
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => Self::NotFound { status, message },
            400 => Self::BadRequest { status, message },
            _ => Self::Unexpected { status, message },
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) | Self::MissingId | Self::NoSelection | Self::NotConfirmed => {
                ErrorCategory::Validation
            }
            Self::Conflict { .. } => ErrorCategory::Conflict,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::BadRequest { .. } => ErrorCategory::BadRequest,
            Self::Unexpected { .. } | Self::Network(_) | Self::Decode(_) | Self::InvalidUrl(_) => {
                ErrorCategory::Unexpected
            }
        }
    }

    /// 携带的 HTTP 状态码（本地错误没有）
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { status, .. }
            | Self::BadRequest { status, .. }
            | Self::Unexpected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::from_status(status.as_u16(), err.to_string()),
            None => Self::Network(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for CatalogError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{}: {}", field, error.code))
                })
            })
            .collect();

        CatalogError::Validation(messages.join(", "))
    }
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub name: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, name) = match &self {
            CatalogError::Validation(_)
            | CatalogError::MissingId
            | CatalogError::NoSelection
            | CatalogError::NotConfirmed => {
                (StatusCode::BAD_REQUEST, "BadRequestError")
            }
            CatalogError::Conflict { .. } => (StatusCode::BAD_REQUEST, "BadRequestError"),
            CatalogError::NotFound { status, .. }
            | CatalogError::BadRequest { status, .. }
            | CatalogError::Unexpected { status, .. } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                "HttpError",
            ),
            CatalogError::Network(_) => (StatusCode::BAD_GATEWAY, "NetworkError"),
            CatalogError::Decode(_) => (StatusCode::BAD_GATEWAY, "DecodeError"),
            CatalogError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, "BadRequestError"),
        };

        let message = match self {
            CatalogError::NotFound { message, .. }
            | CatalogError::BadRequest { message, .. }
            | CatalogError::Unexpected { message, .. } => message,
            other => other.to_string(),
        };

        let error_response = ErrorResponse {
            name: name.to_string(),
            message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
