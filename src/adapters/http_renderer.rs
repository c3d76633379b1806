use crate::adapters::table::extract_rows;
use crate::domain::model::RawRow;
use crate::domain::ports::PageRenderer;
use crate::utils::error::{AppError, RenderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::Instant;

/// 表格尚未出現時，重新抓取前的等待時間
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// 以 HTTP 抓取頁面並解析 HTML。
///
/// 表格不在回應中時會每隔 `poll_interval` 重新抓取，直到表格出現或
/// 超過 `timeout`。載入失敗（連線錯誤、非 2xx）不重試。
pub struct HttpRenderer {
    client: Client,
    timeout: Duration,
    poll_interval: Duration,
}

impl HttpRenderer {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::ConfigError {
                message: format!("cannot build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn timed_out(&self, url: &str) -> RenderError {
        RenderError::Timeout {
            url: url.to_string(),
            seconds: self.timeout.as_secs(),
        }
    }

    fn classify(&self, url: &str, error: reqwest::Error) -> RenderError {
        if error.is_timeout() {
            self.timed_out(url)
        } else {
            RenderError::Request(error)
        }
    }

    async fn fetch_rows(&self, url: &str) -> std::result::Result<Vec<RawRow>, RenderError> {
        tracing::debug!("Making page request to: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        tracing::debug!("Page response status: {}", response.status());

        if !response.status().is_success() {
            return Err(RenderError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(url, e))?;
        extract_rows(url, &body)
    }

    async fn wait_for_table(
        &self,
        url: &str,
        deadline: Instant,
    ) -> std::result::Result<Vec<RawRow>, RenderError> {
        loop {
            match self.fetch_rows(url).await {
                Err(RenderError::TableNotFound { .. })
                    if Instant::now() + self.poll_interval < deadline =>
                {
                    tracing::debug!("Servicing table not present yet on {}, retrying", url);
                    tokio::time::sleep(self.poll_interval).await;
                }
                other => return other,
            }
        }
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str) -> std::result::Result<Vec<RawRow>, RenderError> {
        let deadline = Instant::now() + self.timeout;

        tokio::time::timeout_at(deadline, self.wait_for_table(url, deadline))
            .await
            .unwrap_or_else(|_| Err(self.timed_out(url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_user_agent_is_a_config_error() {
        let result = HttpRenderer::new(Duration::from_secs(5), "bad\nagent");
        assert!(matches!(result, Err(AppError::ConfigError { .. })));
    }
}
