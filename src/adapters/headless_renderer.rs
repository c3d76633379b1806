use crate::adapters::table::{extract_rows, SERVICING_TABLE_SELECTOR};
use crate::domain::model::RawRow;
use crate::domain::ports::PageRenderer;
use crate::utils::error::RenderError;
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use std::time::Duration;

/// 以無頭 Chrome 渲染頁面，等表格由前端產生後再抽出內容。
///
/// 每次呼叫都會啟動一個瀏覽器，結束時（`Browser` 被 drop）關閉。
pub struct HeadlessRenderer {
    timeout: Duration,
}

impl HeadlessRenderer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl PageRenderer for HeadlessRenderer {
    async fn render(&self, url: &str) -> Result<Vec<RawRow>, RenderError> {
        let url = url.to_string();
        let timeout = self.timeout;

        // headless_chrome 是同步 API
        tokio::task::spawn_blocking(move || render_blocking(&url, timeout))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
    }
}

fn render_blocking(url: &str, timeout: Duration) -> Result<Vec<RawRow>, RenderError> {
    let options = LaunchOptions::default_builder()
        .headless(true)
        .build()
        .map_err(|e| RenderError::Launch(e.to_string()))?;

    tracing::debug!("Launching headless browser for {}", url);
    let browser = Browser::new(options).map_err(|e| RenderError::Launch(e.to_string()))?;

    let tab = browser
        .new_tab()
        .map_err(|e| RenderError::Browser(e.to_string()))?;
    tab.set_default_timeout(timeout);

    tab.navigate_to(url)
        .map_err(|e| RenderError::Browser(format!("navigation to {} failed: {}", url, e)))?;

    tab.wait_for_element_with_custom_timeout(SERVICING_TABLE_SELECTOR, timeout)
        .map_err(|_| RenderError::Timeout {
            url: url.to_string(),
            seconds: timeout.as_secs(),
        })?;

    let html = tab
        .get_content()
        .map_err(|e| RenderError::Browser(e.to_string()))?;

    drop(tab);
    drop(browser);

    extract_rows(url, &html)
}
