use crate::domain::model::Source;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Server bind error: {0}")]
    BindError(String),

    #[error("Server error: {0}")]
    ServeError(String),
}

impl AppError {
    /// 給使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::IoError(_) => "無法讀取檔案".to_string(),
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => format!("配置錯誤: {}", self),
            AppError::BindError(_) => "無法綁定監聽位址".to_string(),
            AppError::ServeError(_) => "HTTP 服務異常終止".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// 頁面渲染失敗。核心層不做重試。
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to start rendering engine: {0}")]
    Launch(String),

    #[error("page request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("page returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("table '{selector}' not found on {url}")]
    TableNotFound { url: String, selector: String },

    #[error("timed out after {seconds}s waiting for {url}")]
    Timeout { url: String, seconds: u64 },

    #[error("invalid selector '{0}'")]
    InvalidSelector(String),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("render task failed: {0}")]
    Task(String),
}

/// 某個來源刷新失敗。`cause` 以 `Arc` 共享，同一次渲染的所有等待者拿到同一個錯誤。
#[derive(Error, Debug, Clone)]
#[error("failed to refresh {source_id}: {cause}")]
pub struct RefreshError {
    pub source_id: Source,
    #[source]
    pub cause: Arc<RenderError>,
}

impl RefreshError {
    pub fn new(source_id: Source, cause: Arc<RenderError>) -> Self {
        Self { source_id, cause }
    }
}
