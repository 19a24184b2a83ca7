// src/error.rs

//! 服务层统一错误类型。Banner 挑选与页面渲染本身不会失败，
//! 这里只覆盖目录加载、HTTP 拉取和启动阶段的错误。

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog parse error: {0}")]
    SimdJson(#[from] simd_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 数据源返回了不可用的数据
    #[error("feed error for {origin}: {message}")]
    Feed { origin: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn feed(origin: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Feed {
            origin: origin.into(),
            message: message.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Http(_) | AppError::Feed { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_errors_map_to_bad_gateway() {
        let err = AppError::feed("http://cms.local/banners", "status 500");
        assert_eq!(err.to_string(), "feed error for http://cms.local/banners: status 500");
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn config_errors_map_to_internal_error() {
        let err = AppError::config("no catalog source");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
