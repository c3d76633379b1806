#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::Source;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 6000;
pub const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 30;
pub const MAX_RENDER_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_USER_AGENT: &str = concat!("windows-release-health/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Fetch the page over HTTP and parse the served HTML
    #[default]
    Http,
    /// Render with headless Chrome (requires the `headless` feature)
    Headless,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    pub kind: RendererKind,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            kind: RendererKind::default(),
            timeout_seconds: DEFAULT_RENDER_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl RendererConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// 啟動時解析完成的設定：預設值 ← TOML 檔 ← 命令列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub renderer: RendererConfig,
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_positive_number("server.port", usize::from(self.server.port), 1)?;
        validation::validate_range(
            "renderer.timeout_seconds",
            self.renderer.timeout_seconds,
            1,
            MAX_RENDER_TIMEOUT_SECS,
        )?;
        validation::validate_non_empty_string("renderer.user_agent", &self.renderer.user_agent)?;

        for source in Source::ALL {
            validation::validate_url(source.id(), source.url())?;
        }

        Ok(())
    }
}
