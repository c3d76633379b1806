use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const WINDOWS11_URL: &str =
    "https://learn.microsoft.com/en-us/windows/release-health/windows11-release-information";
pub const WINDOWS10_URL: &str =
    "https://learn.microsoft.com/en-us/windows/release-health/release-information";

/// 表格列至少要有的欄位數
pub const MIN_ROW_CELLS: usize = 7;

const VERSION_CELL: usize = 0;
const LATEST_BUILD_CELL: usize = 4;
const HOME_PRO_CELL: usize = 5;
const ENTERPRISE_CELL: usize = 6;

/// 追蹤的兩個發行資訊頁面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Windows11,
    Windows10,
}

impl Source {
    pub const ALL: [Source; 2] = [Source::Windows11, Source::Windows10];

    pub fn id(&self) -> &'static str {
        match self {
            Source::Windows11 => "windows11",
            Source::Windows10 => "windows10",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Source::Windows11 => WINDOWS11_URL,
            Source::Windows10 => WINDOWS10_URL,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Source::Windows11 => "Windows 11",
            Source::Windows10 => "Windows 10",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// 渲染器抽出的一列原始儲存格文字
pub type RawRow = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRecord {
    pub version: String,
    pub latest_build: String,
    pub end_of_servicing_home_pro: String,
    pub end_of_servicing_enterprise: String,
}

impl ReleaseRecord {
    /// 從原始列建立記錄；欄位不足或任一必要欄位為空白時回傳 `None`
    pub fn from_row(row: &[String]) -> Option<Self> {
        if row.len() < MIN_ROW_CELLS {
            return None;
        }

        let field = |idx: usize| -> Option<String> {
            let value = row.get(idx)?.trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        Some(Self {
            version: field(VERSION_CELL)?,
            latest_build: field(LATEST_BUILD_CELL)?,
            end_of_servicing_home_pro: field(HOME_PRO_CELL)?,
            end_of_servicing_enterprise: field(ENTERPRISE_CELL)?,
        })
    }

    pub fn from_rows(rows: &[RawRow]) -> Vec<Self> {
        rows.iter().filter_map(|row| Self::from_row(row)).collect()
    }
}

/// 單一來源的快取內容。`data` 與 `fetched_at` 永遠一起替換。
#[derive(Debug, Clone, Default)]
pub struct SourceCacheEntry {
    pub data: Option<Arc<Vec<ReleaseRecord>>>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl SourceCacheEntry {
    pub fn is_empty(&self) -> bool {
        self.data.is_none() && self.fetched_at.is_none()
    }
}
