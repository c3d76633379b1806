use crate::domain::model::RawRow;
use crate::utils::error::RenderError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 給定 URL，載入頁面、等待服務通道表格出現並抽出各列。
///
/// 每次呼叫是一次獨立的邏輯渲染；欄位少於 7 格的列不會回傳。
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<Vec<RawRow>, RenderError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
